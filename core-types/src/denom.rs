use std::{fmt, str::FromStr, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::DenomError;

/// Denomination grammar of the SDK: a letter followed by 2 to 127 letters,
/// digits or one of `/:._-`.
pub(crate) const DENOM_PATTERN: &str = r"[a-zA-Z][a-zA-Z0-9/:._-]{2,127}";

fn denom_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^{DENOM_PATTERN}$")).expect("denom pattern is a valid regex")
    })
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Denom(String);

impl Denom {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Denom {
    type Err = DenomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if denom_regex().is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(DenomError::Invalid(s.to_owned()))
        }
    }
}

impl TryFrom<String> for Denom {
    type Error = DenomError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Denom> for String {
    fn from(value: Denom) -> Self {
        value.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sdk_denoms() {
        for denom in [
            "stake",
            "uatom",
            "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2",
            "factory/wasm1x/sub.token-1",
        ] {
            assert!(Denom::from_str(denom).is_ok(), "{denom}");
        }
    }

    #[test]
    fn rejects_malformed_denoms() {
        for denom in ["", "ab", "1stake", "st ake", "stake!"] {
            assert_eq!(
                Denom::from_str(denom),
                Err(DenomError::Invalid(denom.to_owned()))
            );
        }
    }
}
