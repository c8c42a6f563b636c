pub mod config;
pub mod error;
pub mod fetch;
pub mod process;
pub mod store;

pub use error::EtlError;
pub use process::{normalize, PriceRecord, RawTable};
