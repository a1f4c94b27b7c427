//! Примитивы чтения/записи полей заголовка (little-endian).

pub mod read;
pub mod write;

pub use read::*;
pub use write::*;
