pub mod error;
pub mod header;
pub mod tag;

pub use error::*;
pub use header::*;
pub use tag::*;
