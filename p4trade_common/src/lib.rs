//!
//! Common protocol types shared by the P4 trade client and any future tooling.
//!
//! This crate aggregates:
//! - `error` — unified error type `TradeError` used across the workspace.
//! - `result` — handy `Result<T, TradeError>` alias.
//! - `parser` — parser combinators that turn an input line into numeric tokens.
//! - `frame` — encoding/decoding of the fixed-layout request/response frames.
//! - `net` — protocol constants (magic, version, ethertype, addressing, timeout).
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod parser;
pub mod frame;
pub mod net;

pub use error::TradeError;
pub use result::Result;
