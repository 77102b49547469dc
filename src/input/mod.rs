mod config;
mod date_format;
#[cfg(feature = "lettre")]
mod mail;

pub mod json_input;
pub mod sheet;

pub use config::*;
pub use date_format::*;
#[cfg(feature = "lettre")]
pub use mail::*;
