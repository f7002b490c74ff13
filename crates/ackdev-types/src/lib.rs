pub mod config;
pub mod crd;
pub mod error;

pub use config::*;
pub use crd::*;
pub use error::{Error, Result};
