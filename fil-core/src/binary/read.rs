use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use fil_types::{FilError, FilResult};

/// Переводит `UnexpectedEof` в [`FilError::TruncatedStream`].
fn eof_as_truncated(
    e: io::Error,
    what: &str,
    off: u64,
) -> FilError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        FilError::truncated(format!("end of stream while reading {what} at offset {off}"))
    } else {
        FilError::Io(e)
    }
}

pub fn read_i32_local<R: Read>(
    reader: &mut R,
    off: &mut u64,
    what: &str,
) -> FilResult<i32> {
    let v = reader
        .read_i32::<LittleEndian>()
        .map_err(|e| eof_as_truncated(e, what, *off))?;
    *off += 4;
    Ok(v)
}

pub fn read_f64_local<R: Read>(
    reader: &mut R,
    off: &mut u64,
    what: &str,
) -> FilResult<f64> {
    let v = reader
        .read_f64::<LittleEndian>()
        .map_err(|e| eof_as_truncated(e, what, *off))?;
    *off += 8;
    Ok(v)
}

/// Читает i32 длину и проверяет, что она лежит в `1..=max` (или `0..=max`
/// при `allow_empty`).
pub fn read_len_local<R: Read>(
    reader: &mut R,
    off: &mut u64,
    max: usize,
    allow_empty: bool,
    what: &str,
) -> FilResult<usize> {
    let at = *off;
    let raw = read_i32_local(reader, off, what)?;
    let min = if allow_empty { 0 } else { 1 };

    match usize::try_from(raw) {
        Ok(len) if len >= min && len <= max => Ok(len),
        _ => Err(FilError::malformed_tag(format!(
            "{what} = {raw} at offset {at} is outside {min}..={max}"
        ))),
    }
}

pub fn read_bytes_local<R: Read>(
    reader: &mut R,
    off: &mut u64,
    len: usize,
    what: &str,
) -> FilResult<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|e| eof_as_truncated(e, what, *off))?;
    *off += len as u64;
    Ok(buf)
}

/// Строковое значение: i32 длина + байты UTF-8.
pub fn read_str_local<R: Read>(
    reader: &mut R,
    off: &mut u64,
    max: usize,
    what: &str,
) -> FilResult<String> {
    let len = read_len_local(reader, off, max, true, what)?;
    let at = *off;
    let bytes = read_bytes_local(reader, off, len, what)?;

    String::from_utf8(bytes).map_err(|e| {
        FilError::malformed_tag(format!("{what} at offset {at} is not valid UTF-8: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_scalars_advance_offset() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&(-7i32).to_le_bytes());
        raw.extend_from_slice(&1550.25f64.to_le_bytes());

        let mut cur = Cursor::new(raw);
        let mut off = 0;

        assert_eq!(read_i32_local(&mut cur, &mut off, "nbits").unwrap(), -7);
        assert_eq!(off, 4);
        assert_eq!(read_f64_local(&mut cur, &mut off, "fch1").unwrap(), 1550.25);
        assert_eq!(off, 12);
    }

    #[test]
    fn test_short_read_is_truncated() {
        let mut cur = Cursor::new(vec![1u8, 2, 3]);
        let mut off = 0;

        let err = read_i32_local(&mut cur, &mut off, "tag length").unwrap_err();
        assert!(err.is_truncated(), "{err}");
        assert_eq!(off, 0);
    }

    #[test]
    fn test_len_bounds() {
        let mut off = 0;

        let mut cur = Cursor::new((-1i32).to_le_bytes().to_vec());
        let err = read_len_local(&mut cur, &mut off, 80, true, "string length").unwrap_err();
        assert!(matches!(err, FilError::MalformedTag(_)));

        let mut cur = Cursor::new(0i32.to_le_bytes().to_vec());
        assert!(read_len_local(&mut cur, &mut off, 80, false, "tag length").is_err());

        let mut cur = Cursor::new(81i32.to_le_bytes().to_vec());
        assert!(read_len_local(&mut cur, &mut off, 80, false, "tag length").is_err());

        let mut cur = Cursor::new(80i32.to_le_bytes().to_vec());
        assert_eq!(read_len_local(&mut cur, &mut off, 80, false, "tag length").unwrap(), 80);
    }

    #[test]
    fn test_read_str() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&4i32.to_le_bytes());
        raw.extend_from_slice(b"B0531");

        let mut cur = Cursor::new(raw);
        let mut off = 0;
        assert_eq!(read_str_local(&mut cur, &mut off, 64, "source_name").unwrap(), "B053");
        assert_eq!(off, 8);

        let mut raw = Vec::new();
        raw.extend_from_slice(&2i32.to_le_bytes());
        raw.extend_from_slice(&[0xC3, 0x28]);

        let err = read_str_local(&mut Cursor::new(raw), &mut 0, 64, "source_name").unwrap_err();
        assert!(matches!(err, FilError::MalformedTag(_)));
    }
}
