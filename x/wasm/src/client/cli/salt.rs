//! Encoding selectors for the salt argument of `instantiate2`.
use base64::{engine::general_purpose::STANDARD, Engine};
use clap::Args;

use super::error::SaltError;

/// At most one selector may be set. Without any the salt is read as hex.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SaltEncodingFlags {
    /// ASCII encoded salt
    #[arg(long)]
    pub ascii: bool,
    /// Hex encoded salt
    #[arg(long)]
    pub hex: bool,
    /// Base64 encoded salt
    #[arg(long)]
    pub b64: bool,
}

impl SaltEncodingFlags {
    pub fn decode(&self, salt: &str) -> Result<Vec<u8>, SaltError> {
        match (self.ascii, self.hex, self.b64) {
            (true, false, false) => {
                tracing::debug!("decoding salt as ascii");
                Ok(salt.as_bytes().to_vec())
            }
            (false, false, true) => {
                tracing::debug!("decoding salt as base64");
                Ok(STANDARD.decode(salt)?)
            }
            (false, _, false) => {
                tracing::debug!("decoding salt as hex");
                Ok(hex::decode(salt)?)
            }
            _ => Err(SaltError::MultipleEncodings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_hex() {
        let flags = SaltEncodingFlags::default();
        assert_eq!(flags.decode("0a0b").unwrap(), vec![0x0a, 0x0b]);
    }

    #[test]
    fn odd_hex_fails() {
        let err = SaltEncodingFlags::default().decode("abc").unwrap_err();
        assert_eq!(err, SaltError::Hex(hex::FromHexError::OddLength));
    }

    #[test]
    fn ascii_and_base64() {
        let ascii = SaltEncodingFlags {
            ascii: true,
            ..Default::default()
        };
        assert_eq!(ascii.decode("salt").unwrap(), b"salt".to_vec());

        let b64 = SaltEncodingFlags {
            b64: true,
            ..Default::default()
        };
        assert_eq!(b64.decode("c2FsdA==").unwrap(), b"salt".to_vec());
    }

    #[test]
    fn rejects_multiple_selectors() {
        let flags = SaltEncodingFlags {
            ascii: true,
            hex: true,
            b64: false,
        };
        assert_eq!(flags.decode("00"), Err(SaltError::MultipleEncodings));
    }
}
