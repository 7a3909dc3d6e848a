use std::{collections::BTreeMap, fmt, str::FromStr, sync::OnceLock};

use cosmwasm_std::Uint256;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    denom::DENOM_PATTERN,
    errors::{CoinError, CoinsError},
    Denom, UnsignedCoin,
};

fn dec_coin_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"^([0-9]+(?:\.[0-9]+)?|\.[0-9]+)\s*({DENOM_PATTERN})$"
        ))
        .expect("decimal coin pattern is a valid regex")
    })
}

/// Set of coins with unique denominations sorted by denomination and without
/// zero amounts. May be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<UnsignedCoin>", into = "Vec<UnsignedCoin>")]
pub struct UnsignedCoins(Vec<UnsignedCoin>);

impl UnsignedCoins {
    /// Accepts coins that are already in canonical form.
    pub fn new(coins: impl IntoIterator<Item = UnsignedCoin>) -> Result<Self, CoinsError> {
        let coins: Vec<_> = coins.into_iter().collect();

        for coin in &coins {
            if coin.amount.is_zero() {
                return Err(CoinsError::Zero(coin.denom.to_string()));
            }
        }

        for pair in coins.windows(2) {
            match pair[0].denom.cmp(&pair[1].denom) {
                std::cmp::Ordering::Less => (),
                std::cmp::Ordering::Equal => {
                    return Err(CoinsError::Duplicate(pair[0].denom.to_string()))
                }
                std::cmp::Ordering::Greater => return Err(CoinsError::Unsorted),
            }
        }

        Ok(Self(coins))
    }

    /// Merge duplicate denominations, drop zero amounts and sort.
    pub fn normalize(coins: impl IntoIterator<Item = UnsignedCoin>) -> Result<Self, CoinsError> {
        let mut merged = BTreeMap::<Denom, Uint256>::new();

        for UnsignedCoin { denom, amount } in coins {
            let total = merged.entry(denom.clone()).or_default();
            *total = total
                .checked_add(amount)
                .map_err(|_| CoinsError::Overflow {
                    denom: denom.to_string(),
                })?;
        }

        Ok(Self(
            merged
                .into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(denom, amount)| UnsignedCoin { denom, amount })
                .collect(),
        ))
    }

    /// Parse a comma separated coin list such as `10uatom,5stake`.
    ///
    /// Decimal amounts are truncated to their integer part, duplicate
    /// denominations are summed and zero amounts removed. An empty or blank
    /// string yields an empty set.
    pub fn parse_normalized(input: &str) -> Result<Self, CoinsError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::default());
        }

        let coins = input
            .split(',')
            .map(parse_truncated_coin)
            .collect::<Result<Vec<_>, _>>()?;

        Self::normalize(coins)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnsignedCoin> {
        self.0.iter()
    }

    pub fn amount_of(&self, denom: &str) -> Uint256 {
        self.0
            .iter()
            .find(|coin| coin.denom.as_str() == denom)
            .map(|coin| coin.amount)
            .unwrap_or_default()
    }

    pub fn into_inner(self) -> Vec<UnsignedCoin> {
        self.0
    }
}

fn parse_truncated_coin(input: &str) -> Result<UnsignedCoin, CoinError> {
    let input = input.trim();
    let captures = dec_coin_regex()
        .captures(input)
        .ok_or_else(|| CoinError::InvalidExpression(input.to_owned()))?;

    let integer = captures[1].split('.').next().unwrap_or_default();
    let amount = if integer.is_empty() {
        Uint256::zero()
    } else {
        Uint256::from_str(integer).map_err(|_| CoinError::Amount(captures[1].to_owned()))?
    };

    Ok(UnsignedCoin {
        denom: Denom::from_str(&captures[2])?,
        amount,
    })
}

impl FromStr for UnsignedCoins {
    type Err = CoinsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_normalized(s)
    }
}

impl TryFrom<Vec<UnsignedCoin>> for UnsignedCoins {
    type Error = CoinsError;

    fn try_from(value: Vec<UnsignedCoin>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnsignedCoins> for Vec<UnsignedCoin> {
    fn from(value: UnsignedCoins) -> Self {
        value.0
    }
}

impl From<UnsignedCoins> for Vec<cosmos_sdk_proto::cosmos::base::v1beta1::Coin> {
    fn from(value: UnsignedCoins) -> Self {
        value.0.into_iter().map(Into::into).collect()
    }
}

impl<'a> IntoIterator for &'a UnsignedCoins {
    type Item = &'a UnsignedCoin;
    type IntoIter = std::slice::Iter<'a, UnsignedCoin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for UnsignedCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}
