use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenomError {
    #[error("invalid denom: {0}")]
    Invalid(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinError {
    #[error("invalid decimal coin expression: {0}")]
    InvalidExpression(String),
    #[error("{0}")]
    Denom(#[from] DenomError),
    #[error("invalid amount {0}")]
    Amount(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinsError {
    #[error("{0}")]
    Coin(#[from] CoinError),
    #[error("amount of {denom} overflows 256 bits")]
    Overflow { denom: String },
    #[error("duplicate denomination {0}")]
    Duplicate(String),
    #[error("coin {0} amount is not positive")]
    Zero(String),
    #[error("coins are not sorted by denomination")]
    Unsorted,
}
