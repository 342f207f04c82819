//! Miscellaneous common types used throughout the crate.

use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

/// Represents a field-name to value mapping of the checkout protocol.
pub type Record<V> = std::collections::HashMap<String, V>;

/// ISO 4217 numeric currency code, e.g. `643` for the Russian rouble.
///
/// ```
/// use walletone_kit::types::CurrencyId;
///
/// assert_eq!(CurrencyId::from(643).to_string(), "643");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurrencyId(pub u16);

impl CurrencyId {
    pub const RUB: CurrencyId = CurrencyId(643);
    pub const USD: CurrencyId = CurrencyId(840);
    pub const EUR: CurrencyId = CurrencyId(978);
    pub const UAH: CurrencyId = CurrencyId(980);
    pub const KZT: CurrencyId = CurrencyId(398);
}

impl From<u16> for CurrencyId {
    fn from(value: u16) -> Self {
        CurrencyId(value)
    }
}

impl std::str::FromStr for CurrencyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u16>().map(CurrencyId)
    }
}

impl Display for CurrencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CurrencyId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(CurrencyId)
    }
}

/// A base64-encoded MD5 signature token, as carried in `WMI_SIGNATURE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(pub String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Signature(s))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle token of a payment.
///
/// The gateway is authoritative for order states, so values are opaque strings
/// (`Accepted`, `Rejected`, ...). A payment that has not been confirmed by a
/// valid notification is [`OrderState::UNDEFINED`].
///
/// ```
/// use walletone_kit::types::OrderState;
///
/// let state = OrderState::default();
/// assert!(state.is_undefined());
/// assert_eq!(state.to_string(), "undefined");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderState(String);

impl OrderState {
    pub const UNDEFINED: &'static str = "undefined";

    pub fn new(state: impl Into<String>) -> Self {
        OrderState(state.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_undefined(&self) -> bool {
        self.0 == Self::UNDEFINED
    }
}

impl Default for OrderState {
    fn default() -> Self {
        OrderState(Self::UNDEFINED.to_string())
    }
}

impl Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for OrderState {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for OrderState {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
