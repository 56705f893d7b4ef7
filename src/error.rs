// src/error.rs
use std::fmt;

#[derive(Debug)]
pub enum MarketError {
    Unauthorized,
    InvalidReference,
    NotForSale,
    SelfTradeForbidden,
    ValueMismatch,
    InvalidAmount,
    NotFound,
    InvalidPrice,
    InvalidSharePercent(u8),
    InsufficientFunds,
    Storage(String),
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Caller is not the market owner"),
            Self::InvalidReference => write!(f, "The asset reference is not valid"),
            Self::NotForSale => write!(f, "This asset is not for sale"),
            Self::SelfTradeForbidden => write!(f, "Seller and buyer must be different"),
            Self::ValueMismatch => write!(f, "Payment and price are different"),
            Self::InvalidAmount => write!(f, "Not an acceptable withdrawal amount"),
            Self::NotFound => write!(f, "Asset not found"),
            Self::InvalidPrice => write!(f, "Price must be positive"),
            Self::InvalidSharePercent(pct) => {
                write!(f, "Share percent out of range: {}", pct)
            }
            Self::InsufficientFunds => write!(f, "Insufficient funds"),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for MarketError {}
