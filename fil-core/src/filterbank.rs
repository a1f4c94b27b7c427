use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

use fil_types::{FilError, FilHeader, FilResult};
use log::{debug, info, warn};

use crate::{
    config::DecodeOptions,
    format::{check_strings, derive_nsamps, FilHeaderExt},
};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Filterbank файл в памяти: заголовок и сырые выборки.
///
/// Выборки хранятся как есть, без преобразований; длина буфера всегда
/// `nsamps * nchans * nbits / 8` для заголовка, с которым файл был прочитан.
#[derive(Debug, Clone)]
pub struct Filterbank {
    header: FilHeader,
    data: Vec<u8>,
}

impl Filterbank {
    /// Читает файл по пути с настройками разбора по умолчанию.
    pub fn open<P: AsRef<Path>>(path: P) -> FilResult<Self> {
        Self::open_with(path, &DecodeOptions::default())
    }

    pub fn open_with<P: AsRef<Path>>(
        path: P,
        opts: &DecodeOptions,
    ) -> FilResult<Self> {
        let path = path.as_ref();
        info!("Reading {}", path.display());

        let file = File::open(path).map_err(|e| FilError::open(path, e))?;
        let fil = Self::from_reader(BufReader::new(file), opts)?;

        info!(
            "Read {}: {} samples x {} channels ({} bytes of data)",
            path.display(),
            fil.header.nsamps,
            fil.header.nchans,
            fil.data.len()
        );

        Ok(fil)
    }

    /// Читает заголовок и данные из потока с текущей позиции.
    ///
    /// Количество выборок выводится из размера остатка потока после
    /// `HEADER_END` (см. [`derive_nsamps`]).
    pub fn from_reader<R: Read + Seek>(
        mut reader: R,
        opts: &DecodeOptions,
    ) -> FilResult<Self> {
        let (mut header, header_len) = FilHeader::read_from_with(&mut reader, opts)?;

        let header_end = reader.stream_position()?;
        let stream_end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(header_end))?;

        let data_bytes = stream_end.saturating_sub(header_end);
        header.nsamps = derive_nsamps(data_bytes, header.nchans, header.nbits)?;

        if 8 % header.nbits != 0 {
            warn!(
                "nbits={} does not divide 8, derived nsamps={} is truncated",
                header.nbits, header.nsamps
            );
        }

        let to_read = data_len(&header)?;
        debug!(
            "Header: {header_len} bytes, data region: {data_bytes} bytes, nsamps={}, reading {to_read} bytes",
            header.nsamps
        );

        let mut data = vec![0u8; to_read];
        reader.read_exact(&mut data).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                FilError::truncated(format!(
                    "sample region shorter than {to_read} bytes after {header_end}-byte header"
                ))
            } else {
                FilError::Io(e)
            }
        })?;

        if data_bytes > to_read as u64 {
            debug!("{} trailing bytes ignored", data_bytes - to_read as u64);
        }

        Ok(Self { header, data })
    }

    /// Сохраняет файл: заголовок в каноническом порядке, затем данные.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> FilResult<()> {
        let path = path.as_ref();

        // Проверяем до открытия, чтобы не обрезать существующий файл зря
        self.check_data_len()?;
        check_strings(&self.header)?;

        let file = File::create(path).map_err(|e| FilError::open(path, e))?;
        info!("Saving {}", path.display());

        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;

        info!("Saved {}", path.display());
        Ok(())
    }

    /// Пишет заголовок и данные в поток.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
    ) -> FilResult<()> {
        let to_save = self.check_data_len()?;

        self.header.write_to(writer)?;
        debug!("Header saved ({} bytes)", self.header.encoded_len());

        info!("Will save {:.6} GB of data", to_save as f64 / GIB);
        writer.write_all(&self.data)?;

        Ok(())
    }

    /// Заголовок файла (`nsamps` выведен при чтении).
    pub fn header(&self) -> &FilHeader {
        &self.header
    }

    /// Изменяемый заголовок. Размер данных при сохранении считается заново
    /// из его полей и должен совпадать с длиной буфера.
    pub fn header_mut(&mut self) -> &mut FilHeader {
        &mut self.header
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn nsamps(&self) -> u64 {
        self.header.nsamps
    }

    /// Разбирает файл на заголовок и буфер выборок.
    pub fn into_parts(self) -> (FilHeader, Vec<u8>) {
        (self.header, self.data)
    }

    fn check_data_len(&self) -> FilResult<usize> {
        let expected = data_len(&self.header)?;

        if self.data.len() != expected {
            return Err(FilError::invalid_header(format!(
                "header describes {expected} data bytes (nsamps={}, nchans={}, nbits={}), buffer holds {}",
                self.header.nsamps,
                self.header.nchans,
                self.header.nbits,
                self.data.len()
            )));
        }

        Ok(expected)
    }
}

/// `nsamps * nchans * nbits / 8` как `usize`.
fn data_len(header: &FilHeader) -> FilResult<usize> {
    header
        .data_size()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            FilError::invalid_header(format!(
                "data size overflows: nsamps={}, nchans={}, nbits={}",
                header.nsamps, header.nchans, header.nbits
            ))
        })
}
