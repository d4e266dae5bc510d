//! Core ledger types: addresses, transaction hashes, token identifiers, and
//! loosely typed call values.

use std::fmt;

/// A 20-byte account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// The zero address, used as the `from` of mint events.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create an address from raw bytes.
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn to_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Whether this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A 32-byte transaction hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Create a transaction hash from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw hash bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// An opaque numeric token identifier, unique within its owning contract's
/// namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u128);

impl TokenId {
    /// Encode this identifier as 32-byte big-endian transfer data.
    ///
    /// This is the wire shape a composable contract expects in the data
    /// argument of `safeTransferFrom`: the destination parent token id,
    /// left-padded to 32 bytes.
    pub fn to_transfer_data(&self) -> Vec<u8> {
        let mut data = vec![0u8; 32];
        data[16..].copy_from_slice(&self.0.to_be_bytes());
        data
    }

    /// Decode a token identifier from 32-byte big-endian transfer data.
    ///
    /// Returns `None` if the data is not exactly 32 bytes or the value does
    /// not fit in the identifier range.
    pub fn from_transfer_data(data: &[u8]) -> Option<TokenId> {
        if data.len() != 32 || data[..16].iter().any(|b| *b != 0) {
            return None;
        }
        let mut raw = [0u8; 16];
        raw.copy_from_slice(&data[16..]);
        Some(TokenId(u128::from_be_bytes(raw)))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A loosely typed call or event argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An account or contract address
    Address(Address),
    /// An unsigned integer (token ids, amounts, flags)
    Uint(u128),
    /// Opaque bytes (encoded transfer data)
    Bytes(Vec<u8>),
}

impl Value {
    /// Interpret this value as an address.
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Address(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Interpret this value as an unsigned integer.
    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Value::Uint(value) => Some(*value),
            _ => None,
        }
    }

    /// Interpret this value as a token identifier.
    pub fn as_token_id(&self) -> Option<TokenId> {
        self.as_uint().map(TokenId)
    }

    /// Interpret this value as raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<Address> for Value {
    fn from(addr: Address) -> Self {
        Value::Address(addr)
    }
}

impl From<TokenId> for Value {
    fn from(token: TokenId) -> Self {
        Value::Uint(token.0)
    }
}

impl From<u128> for Value {
    fn from(value: u128) -> Self {
        Value::Uint(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_data_round_trip() {
        let token = TokenId(42);
        let data = token.to_transfer_data();
        assert_eq!(data.len(), 32);
        assert_eq!(TokenId::from_transfer_data(&data), Some(token));
    }

    #[test]
    fn test_transfer_data_rejects_short_input() {
        assert_eq!(TokenId::from_transfer_data(&[0u8; 16]), None);
        assert_eq!(TokenId::from_transfer_data(&[]), None);
    }

    #[test]
    fn test_address_display() {
        let addr = Address::new([0xab; 20]);
        assert_eq!(addr.to_string(), format!("0x{}", "ab".repeat(20)));
    }
}
