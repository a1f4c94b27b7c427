/// Максимальная длина имени тега по умолчанию (самые длинные известные
/// теги `HEADER_START` и `telescope_id` занимают 12 байт).
pub const DEFAULT_MAX_TAG_LEN: usize = 80;

/// Максимальная длина строкового значения по умолчанию (PATH_MAX в Linux).
pub const DEFAULT_MAX_STRING_LEN: usize = 4096;

/// Что делать с тегом, которого нет в таблице.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Вернуть [`fil_types::FilError::MalformedTag`].
    #[default]
    Reject,
    /// Пропустить имя тега, не читая нагрузку.
    ///
    /// Так ведут себя исторические читатели. Безопасно только для тегов без
    /// нагрузки: любой другой неизвестный тег сдвигает разбор остального
    /// заголовка.
    Ignore,
}

/// Параметры разбора заголовка.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Предел длины имени тега в байтах
    pub max_tag_len: usize,
    /// Предел длины строкового значения в байтах
    pub max_string_len: usize,
    /// Реакция на неизвестные теги
    pub unknown_tags: UnknownTagPolicy,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl DecodeOptions {
    /// Настройки, повторяющие поведение исторических читателей:
    /// неизвестные теги молча пропускаются.
    pub fn lenient() -> Self {
        Self {
            unknown_tags: UnknownTagPolicy::Ignore,
            ..Self::default()
        }
    }

    pub fn with_unknown_tags(
        mut self,
        policy: UnknownTagPolicy,
    ) -> Self {
        self.unknown_tags = policy;
        self
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для UnknownTagPolicy, DecodeOptions
////////////////////////////////////////////////////////////////////////////////

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_tag_len: DEFAULT_MAX_TAG_LEN,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            unknown_tags: UnknownTagPolicy::Reject,
        }
    }
}

impl std::fmt::Display for UnknownTagPolicy {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            UnknownTagPolicy::Reject => write!(f, "reject"),
            UnknownTagPolicy::Ignore => write!(f, "ignore"),
        }
    }
}

impl std::str::FromStr for UnknownTagPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" | "strict" | "error" => Ok(UnknownTagPolicy::Reject),
            "ignore" | "skip" | "lenient" => Ok(UnknownTagPolicy::Ignore),
            _ => Err(format!(
                "Unknown tag policy: '{s}'. Use: reject, ignore"
            )),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
