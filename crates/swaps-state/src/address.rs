//! Address parsing and canonical forms.

use tiny_keccak::{Hasher, Keccak};

use crate::error::Error;

/// Parse a hex address (with or without `0x`) into its 20 raw bytes.
pub fn parse(address: &str) -> Result<[u8; 20], Error> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    let bytes = hex::decode(digits).map_err(|_| Error::InvalidAddress(address.to_string()))?;
    <[u8; 20]>::try_from(bytes.as_slice()).map_err(|_| Error::InvalidAddress(address.to_string()))
}

/// EIP-55 checksummed form of an address, as used by the metadata catalog.
pub fn checksum(address: &str) -> Result<String, Error> {
    parse(address).map(|bytes| eip55_checksum(&bytes))
}

/// Lowercase identity key of an address.
pub fn normalize(address: &str) -> String {
    address.to_lowercase()
}

/// Case-insensitive address comparison.
pub fn same(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// EIP-55 mixed-case checksum encoding.
fn eip55_checksum(addr: &[u8; 20]) -> String {
    let hex_addr = hex::encode(addr);
    let mut hasher = Keccak::v256();
    hasher.update(hex_addr.as_bytes());
    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);

    let mut result = String::with_capacity(42);
    result.push_str("0x");
    for (i, c) in hex_addr.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }
    result
}
