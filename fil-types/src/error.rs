use std::path::PathBuf;

use thiserror::Error;

/// Результат для операций с filterbank файлами
pub type FilResult<T> = std::result::Result<T, FilError>;

/// Типы ошибок чтения/записи filterbank.
#[derive(Debug, Error)]
pub enum FilError {
    /// Файл не удалось открыть или создать
    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Поток закончился раньше HEADER_END или раньше конца данных
    #[error("Truncated stream: {0}")]
    TruncatedStream(String),

    /// Некорректная длина тега/строки или неизвестный тег
    #[error("Malformed tag: {0}")]
    MalformedTag(String),

    /// Значения заголовка, с которыми нельзя вычислить размер данных
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilError {
    /// Удобные конструкторы
    pub fn open<P: Into<PathBuf>>(
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn truncated<S: Into<String>>(s: S) -> Self {
        Self::TruncatedStream(s.into())
    }

    pub fn malformed_tag<S: Into<String>>(s: S) -> Self {
        Self::MalformedTag(s.into())
    }

    pub fn invalid_header<S: Into<String>>(s: S) -> Self {
        Self::InvalidHeader(s.into())
    }

    /// `true` для ошибок, вызванных преждевременным концом потока.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedStream(_))
    }
}
