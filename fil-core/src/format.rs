//! Заголовок SIGPROC filterbank.
//!
//! Заголовок — последовательность записей `[i32 длина][имя тега][нагрузка]`.
//! Тип нагрузки поток не описывает: его задаёт таблица [`HeaderTag`].
//! Разбор принимает теги в любом порядке до `HEADER_END`, запись всегда идёт
//! в одном фиксированном порядке [`ENCODE_ORDER`]. Все числа little-endian.

use std::io::{Cursor, Read, Write};

use fil_types::{FilError, FilHeader, FilResult, HeaderTag};
use log::{debug, trace, warn};

use crate::{
    binary::{
        read_bytes_local, read_f64_local, read_i32_local, read_len_local, read_str_local,
        write_f64_local, write_i32_local, write_str_local, write_tag_local,
    },
    config::{DecodeOptions, UnknownTagPolicy, DEFAULT_MAX_STRING_LEN},
};

/// Первая запись заголовка.
pub const HEADER_START: &str = "HEADER_START";

/// Завершающая запись заголовка, сразу за ней начинаются данные.
pub const HEADER_END: &str = "HEADER_END";

/// Порядок записей при кодировании.
///
/// Часть потребителей формата рассчитывает именно на этот порядок, хотя
/// разбор его не требует.
pub const ENCODE_ORDER: [HeaderTag; 21] = [
    HeaderTag::HeaderStart,
    HeaderTag::TelescopeId,
    HeaderTag::RawDataFile,
    HeaderTag::SourceName,
    HeaderTag::MachineId,
    HeaderTag::DataType,
    HeaderTag::AzStart,
    HeaderTag::ZaStart,
    HeaderTag::SrcRaj,
    HeaderTag::SrcDej,
    HeaderTag::TStart,
    HeaderTag::NChans,
    HeaderTag::NBeams,
    HeaderTag::TSamp,
    HeaderTag::NBits,
    HeaderTag::RefDm,
    HeaderTag::IBeam,
    HeaderTag::Fch1,
    HeaderTag::Foff,
    HeaderTag::NIfs,
    HeaderTag::HeaderEnd,
];

/// Кодек заголовка поверх [`FilHeader`] из `fil-types`.
pub trait FilHeaderExt: Sized {
    /// Читает заголовок до `HEADER_END` включительно.
    ///
    /// Возвращает заголовок и число прочитанных байт. `nsamps` остаётся 0.
    fn read_from<R: Read>(reader: &mut R) -> FilResult<(Self, u64)> {
        Self::read_from_with(reader, &DecodeOptions::default())
    }

    /// То же, что [`FilHeaderExt::read_from`], с явными настройками.
    ///
    /// Длина имени тега должна лежать в `1..=opts.max_tag_len`. Исторические
    /// читатели принимают и нулевую длину (пустое имя, цикл продолжается),
    /// здесь она даёт [`FilError::MalformedTag`], как и любая длина вне
    /// пределов.
    fn read_from_with<R: Read>(
        reader: &mut R,
        opts: &DecodeOptions,
    ) -> FilResult<(Self, u64)>;

    /// Разбор заголовка из байтового среза (данные после него игнорируются).
    fn deserialize(buf: &[u8]) -> FilResult<(Self, usize)> {
        let (header, len) = Self::read_from(&mut Cursor::new(buf))?;
        Ok((header, len as usize))
    }

    /// Пишет заголовок в порядке [`ENCODE_ORDER`].
    ///
    /// Строки длиннее [`DEFAULT_MAX_STRING_LEN`] отклоняются до записи
    /// первого байта (см. [`check_strings`]).
    fn write_to<W: Write>(
        &self,
        writer: &mut W,
    ) -> FilResult<()>;

    /// Сериализация заголовка в байты.
    fn serialize(&self) -> FilResult<Vec<u8>>;

    /// Точный размер закодированного заголовка в байтах.
    fn encoded_len(&self) -> usize;
}

impl FilHeaderExt for FilHeader {
    fn read_from_with<R: Read>(
        reader: &mut R,
        opts: &DecodeOptions,
    ) -> FilResult<(Self, u64)> {
        let mut header = FilHeader::default();
        let mut off = 0u64;

        loop {
            let at = off;
            let len = read_len_local(reader, &mut off, opts.max_tag_len, false, "tag length")?;
            let name = read_bytes_local(reader, &mut off, len, "tag name")?;

            let tag = match HeaderTag::from_name(&name) {
                Some(tag) => tag,
                None => {
                    let name = String::from_utf8_lossy(&name);
                    match opts.unknown_tags {
                        UnknownTagPolicy::Reject => {
                            return Err(FilError::malformed_tag(format!(
                                "unknown tag '{name}' at offset {at}"
                            )));
                        }
                        UnknownTagPolicy::Ignore => {
                            warn!("Skipping unknown tag '{name}' at offset {at} (no payload read)");
                            continue;
                        }
                    }
                }
            };

            trace!("tag {tag} at offset {at}");

            let what = tag.name();
            match tag {
                HeaderTag::HeaderEnd => break,
                HeaderTag::HeaderStart => {}
                HeaderTag::RawDataFile => {
                    header.rawfile = read_str_local(reader, &mut off, opts.max_string_len, what)?
                }
                HeaderTag::SourceName => {
                    header.sourcename = read_str_local(reader, &mut off, opts.max_string_len, what)?
                }
                HeaderTag::MachineId => header.machineid = read_i32_local(reader, &mut off, what)?,
                HeaderTag::TelescopeId => {
                    header.telescopeid = read_i32_local(reader, &mut off, what)?
                }
                HeaderTag::SrcRaj => header.ra = read_f64_local(reader, &mut off, what)?,
                HeaderTag::SrcDej => header.dec = read_f64_local(reader, &mut off, what)?,
                HeaderTag::AzStart => header.az = read_f64_local(reader, &mut off, what)?,
                HeaderTag::ZaStart => header.zn = read_f64_local(reader, &mut off, what)?,
                HeaderTag::DataType => header.datatype = read_i32_local(reader, &mut off, what)?,
                HeaderTag::RefDm => header.rdm = read_f64_local(reader, &mut off, what)?,
                HeaderTag::NChans => header.nchans = read_i32_local(reader, &mut off, what)?,
                HeaderTag::Fch1 => header.topfreq = read_f64_local(reader, &mut off, what)?,
                HeaderTag::Foff => header.chanband = read_f64_local(reader, &mut off, what)?,
                HeaderTag::NBeams => header.nbeams = read_i32_local(reader, &mut off, what)?,
                HeaderTag::IBeam => header.ibeam = read_i32_local(reader, &mut off, what)?,
                HeaderTag::NBits => header.nbits = read_i32_local(reader, &mut off, what)?,
                HeaderTag::TStart => header.tstart = read_f64_local(reader, &mut off, what)?,
                HeaderTag::TSamp => header.tsamp = read_f64_local(reader, &mut off, what)?,
                HeaderTag::NIfs => header.nifs = read_i32_local(reader, &mut off, what)?,
            }
        }

        debug!(
            "Header decoded: {off} bytes, source '{}', nchans={}, nbits={}",
            header.sourcename, header.nchans, header.nbits
        );

        Ok((header, off))
    }

    fn write_to<W: Write>(
        &self,
        writer: &mut W,
    ) -> FilResult<()> {
        check_strings(self)?;

        for tag in ENCODE_ORDER {
            write_tag_local(writer, tag)?;

            match tag {
                HeaderTag::HeaderStart | HeaderTag::HeaderEnd => {}
                HeaderTag::RawDataFile => write_str_local(writer, &self.rawfile)?,
                HeaderTag::SourceName => write_str_local(writer, &self.sourcename)?,
                HeaderTag::MachineId => write_i32_local(writer, self.machineid)?,
                HeaderTag::TelescopeId => write_i32_local(writer, self.telescopeid)?,
                HeaderTag::SrcRaj => write_f64_local(writer, self.ra)?,
                HeaderTag::SrcDej => write_f64_local(writer, self.dec)?,
                HeaderTag::AzStart => write_f64_local(writer, self.az)?,
                HeaderTag::ZaStart => write_f64_local(writer, self.zn)?,
                HeaderTag::DataType => write_i32_local(writer, self.datatype)?,
                HeaderTag::RefDm => write_f64_local(writer, self.rdm)?,
                HeaderTag::NChans => write_i32_local(writer, self.nchans)?,
                HeaderTag::Fch1 => write_f64_local(writer, self.topfreq)?,
                HeaderTag::Foff => write_f64_local(writer, self.chanband)?,
                HeaderTag::NBeams => write_i32_local(writer, self.nbeams)?,
                HeaderTag::IBeam => write_i32_local(writer, self.ibeam)?,
                HeaderTag::NBits => write_i32_local(writer, self.nbits)?,
                HeaderTag::TStart => write_f64_local(writer, self.tstart)?,
                HeaderTag::TSamp => write_f64_local(writer, self.tsamp)?,
                HeaderTag::NIfs => write_i32_local(writer, self.nifs)?,
            }
        }

        Ok(())
    }

    fn serialize(&self) -> FilResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    fn encoded_len(&self) -> usize {
        ENCODE_ORDER
            .iter()
            .map(|tag| {
                let payload = match tag {
                    HeaderTag::RawDataFile => 4 + self.rawfile.len(),
                    HeaderTag::SourceName => 4 + self.sourcename.len(),
                    _ => tag.kind().payload_size().unwrap_or(0),
                };
                4 + tag.name().len() + payload
            })
            .sum()
    }
}

/// Проверяет, что строковые поля поместятся в пределы читателя по умолчанию.
pub fn check_strings(header: &FilHeader) -> FilResult<()> {
    for (tag, value) in [
        (HeaderTag::RawDataFile, &header.rawfile),
        (HeaderTag::SourceName, &header.sourcename),
    ] {
        if value.len() > DEFAULT_MAX_STRING_LEN {
            return Err(FilError::malformed_tag(format!(
                "{tag} of {} bytes exceeds {DEFAULT_MAX_STRING_LEN}",
                value.len()
            )));
        }
    }

    Ok(())
}

/// Количество выборок на канал по размеру области данных.
///
/// Считается как `data_bytes / nchans * (8 / nbits)` в целых числах, строго в
/// этом порядке, чтобы совпадать с существующими инструментами. Для `nbits`,
/// не делящих 8, результат занижен, а при `nbits > 8` равен 0.
pub fn derive_nsamps(
    data_bytes: u64,
    nchans: i32,
    nbits: i32,
) -> FilResult<u64> {
    if nchans <= 0 {
        return Err(FilError::invalid_header(format!(
            "nchans must be positive, got {nchans}"
        )));
    }
    if nbits <= 0 {
        return Err(FilError::invalid_header(format!(
            "nbits must be positive, got {nbits}"
        )));
    }

    Ok(data_bytes / nchans as u64 * (8 / nbits as u64))
}
