pub mod types;
pub mod kdf;
pub mod cipher;

pub use types::*;
pub use kdf::*;
pub use cipher::*;
