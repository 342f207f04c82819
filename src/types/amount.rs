//! [`Amount`] represents a monetary amount in the checkout protocol.
//!
//! This module holds its type definition and implementations.

use std::{fmt::Display, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Represents a monetary amount in the checkout protocol.
///
/// The wire form always carries exactly two fractional digits, since the
/// gateway signs the literal string:
///
/// ```
/// use walletone_kit::types::Amount;
///
/// assert_eq!(Amount::from(100u32).to_string(), "100.00");
/// assert_eq!("12.5".parse::<Amount>().unwrap().to_string(), "12.50");
/// assert_eq!("0.125".parse::<Amount>().unwrap().to_string(), "0.13");
/// ```
///
/// A [`Decimal`] holds 96 bits of mantissa, so amounts with more than 26
/// integer digits cannot carry two fractional digits and render with fewer.
/// [`Amount::fits_minor_scale`] tells the two cases apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub Decimal);

impl Amount {
    /// The amount rounded half away from zero to two fractional digits.
    ///
    /// Values too large for scale 2 keep the highest scale that fits.
    pub fn to_minor_scale(self) -> Decimal {
        let mut value = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(2);
        value
    }

    /// Whether the amount renders with exactly two fractional digits.
    pub fn fits_minor_scale(self) -> bool {
        self.to_minor_scale().scale() == 2
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount(Decimal::from(value))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount(Decimal::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Amount)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_minor_scale())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Amount>().map_err(serde::de::Error::custom)
    }
}
