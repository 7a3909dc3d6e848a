use std::{fmt, str::FromStr, sync::OnceLock};

use cosmwasm_std::Uint256;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{denom::DENOM_PATTERN, errors::CoinError, Denom};

fn coin_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^([0-9]+)\s*({DENOM_PATTERN})$"))
            .expect("coin pattern is a valid regex")
    })
}

/// A single non-negative amount of one denomination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedCoin {
    pub denom: Denom,
    pub amount: Uint256,
}

impl UnsignedCoin {
    pub fn new(amount: impl Into<Uint256>, denom: Denom) -> Self {
        Self {
            denom,
            amount: amount.into(),
        }
    }
}

impl FromStr for UnsignedCoin {
    type Err = CoinError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let captures = coin_regex()
            .captures(input)
            .ok_or_else(|| CoinError::InvalidExpression(input.to_owned()))?;

        let amount = Uint256::from_str(&captures[1])
            .map_err(|_| CoinError::Amount(captures[1].to_owned()))?;
        let denom = Denom::from_str(&captures[2])?;

        Ok(Self { denom, amount })
    }
}

impl fmt::Display for UnsignedCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl From<UnsignedCoin> for cosmos_sdk_proto::cosmos::base::v1beta1::Coin {
    fn from(UnsignedCoin { denom, amount }: UnsignedCoin) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_coin() {
        let coin = UnsignedCoin::from_str("100uwasm").unwrap();

        assert_eq!(coin.amount, Uint256::from(100u32));
        assert_eq!(coin.denom.as_str(), "uwasm");
        assert_eq!(coin.to_string(), "100uwasm");
    }

    #[test]
    fn whitespace_between_amount_and_denom() {
        let coin = UnsignedCoin::from_str(" 7 stake ").unwrap();

        assert_eq!(coin.to_string(), "7stake");
    }

    #[test]
    fn rejects_missing_amount_or_sign() {
        for input in ["stake", "-1stake", "1.5stake", "10"] {
            assert!(UnsignedCoin::from_str(input).is_err(), "{input}");
        }
    }

    #[test]
    fn into_proto() {
        let coin: cosmos_sdk_proto::cosmos::base::v1beta1::Coin =
            UnsignedCoin::from_str("42uatom").unwrap().into();

        assert_eq!(coin.denom, "uatom");
        assert_eq!(coin.amount, "42");
    }
}
