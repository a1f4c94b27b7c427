//! Чтение и запись SIGPROC filterbank (.fil) файлов
//!
//! Заголовок из тегированных записей разбирается в [`FilHeader`], область
//! выборок передаётся без изменений.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use fil_core::Filterbank;
//!
//! let mut fil = Filterbank::open("observation.fil")?;
//! println!("{} samples x {} channels", fil.nsamps(), fil.header().nchans);
//!
//! fil.header_mut().sourcename = "J0534+2200".to_string();
//! fil.save("observation_renamed.fil")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod config;
pub mod filterbank;
pub mod format;

pub use config::*;
pub use fil_types::{FilError, FilHeader, FilResult, HeaderTag, TagKind};
pub use filterbank::*;
pub use format::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(ENCODE_ORDER.len(), HeaderTag::ALL.len());
        assert_eq!(ENCODE_ORDER[0].name(), HEADER_START);
        assert_eq!(ENCODE_ORDER[ENCODE_ORDER.len() - 1].name(), HEADER_END);
        assert!(!VERSION.is_empty());
    }
}
