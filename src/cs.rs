pub mod compression;
pub mod error;

pub use compression::*;
pub use error::{Error, Result};
