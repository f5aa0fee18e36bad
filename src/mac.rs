// src/mac.rs

// 48-bit hardware address used as the policer key

// dependencies
use std::fmt;
use std::str::FromStr;

use crate::errors::PolicerError;

const MAC_MASK: u64 = (1 << 48) - 1;

/// A 48-bit MAC address stored in the low bits of a `u64`.
///
/// Octet 0 (the first byte on the wire) is the most significant byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MacAddr(u64);

impl MacAddr {
    /// Wraps `value`, discarding anything above bit 47.
    pub const fn new(value: u64) -> Self {
        Self(value & MAC_MASK)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub fn octets(self) -> [u8; 6] {
        let bytes = self.0.to_be_bytes();
        [bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7]]
    }

    /// Reads an address from the first six bytes of `bytes`, if present.
    pub(crate) fn from_slice(bytes: &[u8]) -> Option<Self> {
        let octets: [u8; 6] = bytes.get(..6)?.try_into().ok()?;
        Some(Self::from(octets))
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        let mut bytes = [0u8; 8];
        bytes[2..].copy_from_slice(&octets);
        Self(u64::from_be_bytes(bytes))
    }
}

impl From<MacAddr> for u64 {
    fn from(mac: MacAddr) -> Self {
        mac.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let o = self.octets();
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = PolicerError;

    /// Accepts `b4de3113cdeb`, `b4:de:31:13:cd:eb` or `b4-de-31-13-cd-eb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PolicerError::InvalidMacAddr(s.to_string());

        let digits: String = match s.len() {
            12 => s.to_string(),
            17 => {
                let sep = s.as_bytes()[2];
                if sep != b':' && sep != b'-' {
                    return Err(invalid());
                }
                let mut parts = s.split(sep as char);
                let mut joined = String::with_capacity(12);
                for _ in 0..6 {
                    match parts.next() {
                        Some(part) if part.len() == 2 => joined.push_str(part),
                        _ => return Err(invalid()),
                    }
                }
                if parts.next().is_some() {
                    return Err(invalid());
                }
                joined
            }
            _ => return Err(invalid()),
        };

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u64::from_str_radix(&digits, 16)
            .map(MacAddr::new)
            .map_err(|_| invalid())
    }
}
