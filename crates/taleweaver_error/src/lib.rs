//! Error types for Taleweaver.
//!
//! This crate provides the error taxonomy shared by every Taleweaver crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The five failure classes of a generation run map onto these types:
//!
//! | Class | Type | Recovery |
//! |---|---|---|
//! | malformed input | [`ValidationError`] | none, generation never starts |
//! | transient provider failure | [`ProviderError`] with a 429/5xx status | bounded retry |
//! | permanent provider failure | [`ProviderError`] otherwise | placeholder for that page |
//! | run abort | [`RunError`] | whole run fails |
//! | export image failure | [`ExportError`] | placeholder for that page |
//!
//! # Examples
//!
//! ```
//! use taleweaver_error::{TaleweaverResult, ValidationError, ValidationErrorKind};
//!
//! fn check_age(age: u8) -> TaleweaverResult<u8> {
//!     if !(1..=12).contains(&age) {
//!         Err(ValidationError::new(ValidationErrorKind::AgeOutOfRange(age)))?
//!     }
//!     Ok(age)
//! }
//!
//! assert!(check_age(4).is_ok());
//! assert!(check_age(13).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod export;
mod provider;
mod run;
mod server;
mod validation;

pub use config::ConfigError;
pub use error::{TaleweaverError, TaleweaverErrorKind, TaleweaverResult};
pub use export::{ExportError, ExportErrorKind};
pub use provider::{ProviderError, ProviderErrorKind, ProviderResult, RetryableError};
pub use run::{RunError, RunErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
