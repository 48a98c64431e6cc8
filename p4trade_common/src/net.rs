//! Protocol constants shared by the codec and the transport session.
//!
//! The protocol rides directly on Ethernet: frames carry a dedicated ethertype
//! so they can share a link with unrelated traffic, and the payload starts
//! with a two-byte magic plus a version byte. The interface name and response
//! timeout are the only configuration points; both are compile-time constants.
use std::time::Duration;

/// Two-byte magic identifying protocol payloads on the wire.
pub const MAGIC: [u8; 2] = *b"P4";
/// Protocol version byte following the magic.
pub const VERSION: u8 = 0x01;
/// Ethertype distinguishing protocol frames from other traffic on the link.
pub const PROTOCOL_ETHERTYPE: u16 = 0x1234;
/// Fixed broadcast-style destination MAC the request is addressed to.
pub const DEST_MAC: [u8; 6] = [0x00, 0x04, 0x00, 0x00, 0x00, 0x00];
/// Name of the raw network interface the session binds at startup.
pub const INTERFACE: &str = "veth0-1";
/// How long `request` waits for a matching response before giving up.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);
