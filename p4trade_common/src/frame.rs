//! Fixed-layout frame codec for the trade protocol.
//!
//! Both directions use one big-endian layout with fixed offsets and no
//! variable-length fields, so the server-side datapath can parse it as a
//! direct struct-of-integers:
//!
//! ```text
//! request  (15 bytes): 'P' '4' version  identifier:u16  quantity:u16
//!                      bought_price:u32  current_price:u32
//! response (16 bytes): request layout + decision:u8
//! ```
//!
//! Field-width validation happens here, at encode time, against the raw digit
//! text the parser captured. Decoding performs no range validation beyond the
//! magic/version and length checks: the wire format guarantees range by width.
use strum_macros::{Display, FromRepr};

use crate::error::TradeError;
use crate::net;
use crate::parser::Token;
use crate::result::Result;

/// Fixed length of an encoded request payload in bytes.
pub const REQUEST_LEN: usize = 15;
/// Fixed length of a response payload in bytes.
pub const RESPONSE_LEN: usize = REQUEST_LEN + 1;

/// Known values of the response decision byte.
///
/// The byte itself is passed through undecoded; this enumeration only backs
/// the human-readable report, so an unknown value is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum Decision {
    /// Keep the position.
    Hold = 0,
    /// Sell now.
    Sell = 1,
}

/// One outgoing request, built fresh from the four parsed tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestFrame {
    /// Position identifier.
    pub identifier: u16,
    /// Number of units held.
    pub quantity: u16,
    /// Price the position was bought at.
    pub bought_price: u32,
    /// Current market price.
    pub current_price: u32,
}

impl RequestFrame {
    /// Builds a frame, validating each value against its wire field width.
    pub fn new(
        identifier: u64,
        quantity: u64,
        bought_price: u64,
        current_price: u64,
    ) -> Result<Self> {
        Ok(RequestFrame {
            identifier: narrow(identifier, "identifier", 16)? as u16,
            quantity: narrow(quantity, "quantity", 16)? as u16,
            bought_price: narrow(bought_price, "bought_price", 32)? as u32,
            current_price: narrow(current_price, "current_price", 32)? as u32,
        })
    }

    /// Builds a frame from the four tokens produced by the request grammar.
    ///
    /// Integer conversion of the raw digit text happens here; a digit run too
    /// large for its target field fails with `FieldOverflow`.
    pub fn from_tokens(tokens: &[Token]) -> Result<Self> {
        let [id, qty, bought, current] = tokens else {
            return Err(TradeError::ExpectedNumber);
        };
        RequestFrame::new(
            token_value(id, "identifier", 16)?,
            token_value(qty, "quantity", 16)?,
            token_value(bought, "bought_price", 32)?,
            token_value(current, "current_price", 32)?,
        )
    }

    /// Serializes the frame into its fixed 15-byte payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(REQUEST_LEN);
        buf.extend_from_slice(&net::MAGIC);
        buf.push(net::VERSION);
        buf.extend_from_slice(&self.identifier.to_be_bytes());
        buf.extend_from_slice(&self.quantity.to_be_bytes());
        buf.extend_from_slice(&self.bought_price.to_be_bytes());
        buf.extend_from_slice(&self.current_price.to_be_bytes());
        buf
    }
}

/// One decoded response: the echoed request fields plus the decision byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFrame {
    /// Echoed position identifier.
    pub identifier: u16,
    /// Echoed quantity.
    pub quantity: u16,
    /// Echoed bought price.
    pub bought_price: u32,
    /// Echoed current price.
    pub current_price: u32,
    /// Raw decision byte as classified by the remote peer.
    pub decision: u8,
}

impl ResponseFrame {
    /// Decodes a response payload.
    ///
    /// Fails with `ShortBuffer` when fewer than [`RESPONSE_LEN`] bytes are
    /// present and with `BadMagic` on a wrong magic or version byte. Trailing
    /// bytes beyond the fixed layout (link-layer padding) are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < RESPONSE_LEN {
            return Err(TradeError::ShortBuffer {
                expected: RESPONSE_LEN,
                actual: bytes.len(),
            });
        }
        if bytes[..2] != net::MAGIC || bytes[2] != net::VERSION {
            return Err(TradeError::BadMagic);
        }
        Ok(ResponseFrame {
            identifier: u16::from_be_bytes([bytes[3], bytes[4]]),
            quantity: u16::from_be_bytes([bytes[5], bytes[6]]),
            bought_price: u32::from_be_bytes([bytes[7], bytes[8], bytes[9], bytes[10]]),
            current_price: u32::from_be_bytes([bytes[11], bytes[12], bytes[13], bytes[14]]),
            decision: bytes[15],
        })
    }

    /// Symbolic form of the decision byte, when it matches a known value.
    pub fn decision_label(&self) -> Option<Decision> {
        Decision::from_repr(self.decision)
    }
}

/// Checks that `value` fits in a `bits`-wide unsigned wire field.
fn narrow(value: u64, field: &'static str, bits: u32) -> Result<u64> {
    if value >> bits != 0 {
        return Err(TradeError::FieldOverflow {
            field,
            value: value.to_string(),
            bits,
        });
    }
    Ok(value)
}

/// Converts a token's digit text to an integer destined for `field`.
fn token_value(token: &Token, field: &'static str, bits: u32) -> Result<u64> {
    token.text.parse().map_err(|_| TradeError::FieldOverflow {
        field,
        value: token.text.clone(),
        bits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_the_documented_byte_layout() {
        let frame = RequestFrame::new(42, 7, 100, 105).unwrap();
        assert_eq!(
            frame.encode(),
            vec![
                0x50, 0x34, 0x01, // 'P' '4' version
                0x00, 0x2A, // identifier
                0x00, 0x07, // quantity
                0x00, 0x00, 0x00, 0x64, // bought_price
                0x00, 0x00, 0x00, 0x69, // current_price
            ]
        );
    }

    #[test]
    fn rejects_identifier_wider_than_16_bits() {
        let err = RequestFrame::new(1 << 16, 0, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            TradeError::FieldOverflow {
                field: "identifier",
                bits: 16,
                ..
            }
        ));
    }

    #[test]
    fn rejects_quantity_wider_than_16_bits() {
        assert!(RequestFrame::new(0, u64::from(u16::MAX) + 1, 0, 0).is_err());
    }

    #[test]
    fn rejects_prices_wider_than_32_bits() {
        assert!(RequestFrame::new(0, 0, 1 << 32, 0).is_err());
        assert!(RequestFrame::new(0, 0, 0, u64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn accepts_maximum_field_values() {
        let frame = RequestFrame::new(
            u64::from(u16::MAX),
            u64::from(u16::MAX),
            u64::from(u32::MAX),
            u64::from(u32::MAX),
        )
        .unwrap();
        assert_eq!(frame.identifier, u16::MAX);
        assert_eq!(frame.current_price, u32::MAX);
    }

    #[test]
    fn from_tokens_rejects_digits_beyond_u64() {
        let tokens = vec![
            Token::number("99999999999999999999999999"),
            Token::number("1"),
            Token::number("2"),
            Token::number("3"),
        ];
        assert!(matches!(
            RequestFrame::from_tokens(&tokens),
            Err(TradeError::FieldOverflow {
                field: "identifier",
                ..
            })
        ));
    }

    #[test]
    fn decode_rejects_short_buffers() {
        for len in 0..RESPONSE_LEN {
            let err = ResponseFrame::decode(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, TradeError::ShortBuffer { .. }), "len {len}");
        }
    }

    #[test]
    fn decode_rejects_wrong_magic_and_version() {
        let mut bytes = RequestFrame::new(1, 1, 1, 1).unwrap().encode();
        bytes.push(0); // decision
        let mut wrong_magic = bytes.clone();
        wrong_magic[0] = b'Q';
        assert!(matches!(
            ResponseFrame::decode(&wrong_magic),
            Err(TradeError::BadMagic)
        ));
        let mut wrong_version = bytes.clone();
        wrong_version[2] = 0x7F;
        assert!(matches!(
            ResponseFrame::decode(&wrong_version),
            Err(TradeError::BadMagic)
        ));
    }

    #[test]
    fn decode_ignores_trailing_padding() {
        let mut bytes = RequestFrame::new(5, 6, 7, 8).unwrap().encode();
        bytes.push(1);
        bytes.extend_from_slice(&[0u8; 30]); // minimum-frame padding
        let resp = ResponseFrame::decode(&bytes).unwrap();
        assert_eq!(resp.identifier, 5);
        assert_eq!(resp.decision, 1);
    }

    #[test]
    fn decision_byte_passes_through_unvalidated() {
        let mut bytes = RequestFrame::new(1, 2, 3, 4).unwrap().encode();
        bytes.push(0xEE);
        let resp = ResponseFrame::decode(&bytes).unwrap();
        assert_eq!(resp.decision, 0xEE);
        assert_eq!(resp.decision_label(), None);
    }

    #[test]
    fn known_decisions_have_labels() {
        assert_eq!(Decision::from_repr(0), Some(Decision::Hold));
        assert_eq!(Decision::from_repr(1), Some(Decision::Sell));
        assert_eq!(Decision::Sell.to_string(), "sell");
    }
}
