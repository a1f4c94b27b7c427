/// Форма полезной нагрузки, которая следует за именем тега.
///
/// Сам поток не описывает тип значения: его определяет только имя тега.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Маркер без нагрузки (`HEADER_START`, `HEADER_END`)
    Marker,
    /// Строка: i32 длина + байты
    Str,
    /// 4-байтовое знаковое целое
    Int,
    /// 8-байтовое число с плавающей точкой
    Double,
}

impl TagKind {
    /// Фиксированный размер нагрузки в байтах (`None` для строк).
    pub fn payload_size(&self) -> Option<usize> {
        match self {
            TagKind::Marker => Some(0),
            TagKind::Str => None,
            TagKind::Int => Some(4),
            TagKind::Double => Some(8),
        }
    }
}

/// Известные теги заголовка SIGPROC filterbank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderTag {
    HeaderStart,
    HeaderEnd,
    RawDataFile,
    SourceName,
    MachineId,
    TelescopeId,
    SrcRaj,
    SrcDej,
    AzStart,
    ZaStart,
    DataType,
    RefDm,
    NChans,
    Fch1,
    Foff,
    NBeams,
    IBeam,
    NBits,
    TStart,
    TSamp,
    NIfs,
}

impl HeaderTag {
    /// Все теги таблицы.
    pub const ALL: [HeaderTag; 21] = [
        HeaderTag::HeaderStart,
        HeaderTag::HeaderEnd,
        HeaderTag::RawDataFile,
        HeaderTag::SourceName,
        HeaderTag::MachineId,
        HeaderTag::TelescopeId,
        HeaderTag::SrcRaj,
        HeaderTag::SrcDej,
        HeaderTag::AzStart,
        HeaderTag::ZaStart,
        HeaderTag::DataType,
        HeaderTag::RefDm,
        HeaderTag::NChans,
        HeaderTag::Fch1,
        HeaderTag::Foff,
        HeaderTag::NBeams,
        HeaderTag::IBeam,
        HeaderTag::NBits,
        HeaderTag::TStart,
        HeaderTag::TSamp,
        HeaderTag::NIfs,
    ];

    /// Поиск тега по имени из потока.
    pub fn from_name(name: &[u8]) -> Option<Self> {
        let tag = match name {
            b"HEADER_START" => HeaderTag::HeaderStart,
            b"HEADER_END" => HeaderTag::HeaderEnd,
            b"rawdatafile" => HeaderTag::RawDataFile,
            b"source_name" => HeaderTag::SourceName,
            b"machine_id" => HeaderTag::MachineId,
            b"telescope_id" => HeaderTag::TelescopeId,
            b"src_raj" => HeaderTag::SrcRaj,
            b"src_dej" => HeaderTag::SrcDej,
            b"az_start" => HeaderTag::AzStart,
            b"za_start" => HeaderTag::ZaStart,
            b"data_type" => HeaderTag::DataType,
            b"refdm" => HeaderTag::RefDm,
            b"nchans" => HeaderTag::NChans,
            b"fch1" => HeaderTag::Fch1,
            b"foff" => HeaderTag::Foff,
            b"nbeams" => HeaderTag::NBeams,
            b"ibeam" => HeaderTag::IBeam,
            b"nbits" => HeaderTag::NBits,
            b"tstart" => HeaderTag::TStart,
            b"tsamp" => HeaderTag::TSamp,
            b"nifs" => HeaderTag::NIfs,
            _ => return None,
        };

        Some(tag)
    }

    /// Имя тега в потоке.
    pub fn name(&self) -> &'static str {
        match self {
            HeaderTag::HeaderStart => "HEADER_START",
            HeaderTag::HeaderEnd => "HEADER_END",
            HeaderTag::RawDataFile => "rawdatafile",
            HeaderTag::SourceName => "source_name",
            HeaderTag::MachineId => "machine_id",
            HeaderTag::TelescopeId => "telescope_id",
            HeaderTag::SrcRaj => "src_raj",
            HeaderTag::SrcDej => "src_dej",
            HeaderTag::AzStart => "az_start",
            HeaderTag::ZaStart => "za_start",
            HeaderTag::DataType => "data_type",
            HeaderTag::RefDm => "refdm",
            HeaderTag::NChans => "nchans",
            HeaderTag::Fch1 => "fch1",
            HeaderTag::Foff => "foff",
            HeaderTag::NBeams => "nbeams",
            HeaderTag::IBeam => "ibeam",
            HeaderTag::NBits => "nbits",
            HeaderTag::TStart => "tstart",
            HeaderTag::TSamp => "tsamp",
            HeaderTag::NIfs => "nifs",
        }
    }

    /// Тип нагрузки, определяемый таблицей.
    pub fn kind(&self) -> TagKind {
        match self {
            HeaderTag::HeaderStart | HeaderTag::HeaderEnd => TagKind::Marker,
            HeaderTag::RawDataFile | HeaderTag::SourceName => TagKind::Str,
            HeaderTag::MachineId
            | HeaderTag::TelescopeId
            | HeaderTag::DataType
            | HeaderTag::NChans
            | HeaderTag::NBeams
            | HeaderTag::IBeam
            | HeaderTag::NBits
            | HeaderTag::NIfs => TagKind::Int,
            HeaderTag::SrcRaj
            | HeaderTag::SrcDej
            | HeaderTag::AzStart
            | HeaderTag::ZaStart
            | HeaderTag::RefDm
            | HeaderTag::Fch1
            | HeaderTag::Foff
            | HeaderTag::TStart
            | HeaderTag::TSamp => TagKind::Double,
        }
    }
}

impl std::fmt::Display for HeaderTag {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup_is_symmetric() {
        for tag in HeaderTag::ALL {
            assert_eq!(HeaderTag::from_name(tag.name().as_bytes()), Some(tag));
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(HeaderTag::from_name(b"barycentric"), None);
        assert_eq!(HeaderTag::from_name(b"NCHANS"), None);
        assert_eq!(HeaderTag::from_name(b""), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(HeaderTag::HeaderStart.kind(), TagKind::Marker);
        assert_eq!(HeaderTag::SourceName.kind(), TagKind::Str);
        assert_eq!(HeaderTag::NBits.kind(), TagKind::Int);
        assert_eq!(HeaderTag::Foff.kind(), TagKind::Double);

        assert_eq!(TagKind::Int.payload_size(), Some(4));
        assert_eq!(TagKind::Double.payload_size(), Some(8));
        assert_eq!(TagKind::Str.payload_size(), None);
    }
}
