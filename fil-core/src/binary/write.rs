use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use fil_types::{FilError, FilResult, HeaderTag};

use crate::config::DEFAULT_MAX_STRING_LEN;

pub fn write_i32_local<W: Write>(
    writer: &mut W,
    val: i32,
) -> FilResult<()> {
    writer.write_i32::<LittleEndian>(val)?;
    Ok(())
}

pub fn write_f64_local<W: Write>(
    writer: &mut W,
    val: f64,
) -> FilResult<()> {
    writer.write_f64::<LittleEndian>(val)?;
    Ok(())
}

/// i32 длина + байты. Общий вид и для имени тега, и для строкового значения.
///
/// Строки длиннее [`DEFAULT_MAX_STRING_LEN`] не пишутся: читатель с
/// настройками по умолчанию их не примет.
pub fn write_str_local<W: Write>(
    writer: &mut W,
    s: &str,
) -> FilResult<()> {
    if s.len() > DEFAULT_MAX_STRING_LEN {
        return Err(FilError::malformed_tag(format!(
            "string of {} bytes exceeds {DEFAULT_MAX_STRING_LEN}",
            s.len()
        )));
    }

    write_i32_local(writer, s.len() as i32)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

pub fn write_tag_local<W: Write>(
    writer: &mut W,
    tag: HeaderTag,
) -> FilResult<()> {
    write_str_local(writer, tag.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_layout() {
        let mut buf = Vec::new();
        write_tag_local(&mut buf, HeaderTag::HeaderStart).unwrap();

        assert_eq!(&buf[0..4], &12i32.to_le_bytes());
        assert_eq!(&buf[4..], b"HEADER_START");
    }

    #[test]
    fn test_scalars_little_endian() {
        let mut buf = Vec::new();
        write_i32_local(&mut buf, 0x0102_0304).unwrap();
        write_f64_local(&mut buf, -0.390625).unwrap();

        assert_eq!(&buf[0..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&buf[4..12], &(-0.390625f64).to_le_bytes());
    }

    #[test]
    fn test_string_length_limit() {
        let mut buf = Vec::new();
        write_str_local(&mut buf, &"x".repeat(DEFAULT_MAX_STRING_LEN)).unwrap();
        assert_eq!(buf.len(), 4 + DEFAULT_MAX_STRING_LEN);

        let mut buf = Vec::new();
        let err = write_str_local(&mut buf, &"x".repeat(DEFAULT_MAX_STRING_LEN + 1)).unwrap_err();
        assert!(matches!(err, FilError::MalformedTag(_)), "{err}");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_string() {
        let mut buf = Vec::new();
        write_str_local(&mut buf, "").unwrap();

        assert_eq!(buf, 0i32.to_le_bytes());
    }
}
