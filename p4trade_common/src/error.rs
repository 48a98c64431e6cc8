//! Error types shared between the parser, frame codec, and transport.
//!
//! The `TradeError` enum unifies the failure cases of all protocol stages so
//! the interactive loop can catch any of them at one boundary, print a single
//! line, and keep running. A response timeout is deliberately *not* an error:
//! the transport reports it as an `Ok(None)` outcome instead.
use std::io;

use thiserror::Error;

/// Unified error type for parsing, frame encoding/decoding, and transport.
#[derive(Error, Debug)]
pub enum TradeError {
    /// The parser found no decimal digits at the current input position.
    #[error("Expected number literal.")]
    ExpectedNumber,

    /// A parsed value does not fit the wire field it would be encoded into.
    #[error("value {value} does not fit the {bits}-bit {field} field")]
    FieldOverflow {
        /// Name of the wire field that rejected the value.
        field: &'static str,
        /// Raw digit text as the user typed it.
        value: String,
        /// Width of the target field in bits.
        bits: u32,
    },

    /// A response buffer ended before the fixed frame layout was complete.
    #[error("short response buffer: got {actual} bytes, need {expected}")]
    ShortBuffer {
        /// Fixed response frame length in bytes.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// The response does not start with the protocol magic, or carries an
    /// unrecognized version byte.
    #[error("bad protocol magic or unsupported version")]
    BadMagic,

    /// No network interface with the requested name exists on this host.
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),

    /// Raw access to the interface was refused (typically missing privileges).
    #[error("permission denied opening raw channel on {0}")]
    PermissionDenied(String),

    /// A link-layer send or receive failed for a reason other than a timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// I/O error originating from the standard library (stdin/stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
