use bon::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{Error, Result};

/// The gateway's checkout form action.
pub const DEFAULT_CHECKOUT_URL: &str = "https://wl.walletone.com/checkout/checkout/Index";

/// Merchant identity shared by every payment of a shop.
///
/// Sourcing the values (files, environment, vaults) is left to the host
/// application; the struct deserializes from any serde format.
///
/// ```
/// use walletone_kit::config::MerchantConfig;
///
/// let config = MerchantConfig::builder()
///     .merchant_id("119175088534")
///     .secret_key("XkZMYW56NzVbNV1aekxGNVxvT3xwVHExZ005")
///     .build();
///
/// assert!(config.is_signing());
/// assert!(!format!("{config:?}").contains("XkZMYW56"));
/// ```
#[derive(Builder, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantConfig {
    /// The merchant's wallet id, sent as `WMI_MERCHANT_ID`.
    #[builder(into)]
    pub merchant_id: String,
    /// Shared secret for signatures. Without it forms are sent unsigned.
    #[builder(into)]
    #[serde(default, skip_serializing)]
    pub secret_key: Option<String>,
    /// Overrides [`DEFAULT_CHECKOUT_URL`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<Url>,
}

impl MerchantConfig {
    /// Whether outbound forms carry a `WMI_SIGNATURE`.
    pub fn is_signing(&self) -> bool {
        self.secret_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// The secret used for signatures; empty in unsigned mode.
    pub(crate) fn secret(&self) -> &str {
        self.secret_key.as_deref().unwrap_or_default()
    }

    /// The form action the checkout form is posted to.
    pub fn checkout_url(&self) -> Result<Url> {
        match &self.checkout_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(DEFAULT_CHECKOUT_URL).map_err(|err| {
                Error::Config(format!("invalid default checkout url: {err}"))
            }),
        }
    }
}

impl std::fmt::Debug for MerchantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantConfig")
            .field("merchant_id", &self.merchant_id)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("checkout_url", &self.checkout_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_disables_signing() {
        let config = MerchantConfig::builder()
            .merchant_id("1")
            .secret_key("")
            .build();
        assert!(!config.is_signing());

        let config = MerchantConfig::builder().merchant_id("1").build();
        assert!(!config.is_signing());
        assert_eq!(config.secret(), "");
    }

    #[test]
    fn test_default_checkout_url() {
        let config = MerchantConfig::builder().merchant_id("1").build();
        assert_eq!(config.checkout_url().unwrap().as_str(), DEFAULT_CHECKOUT_URL);
    }

    #[test]
    fn test_deserialize_and_never_serialize_secret() {
        let config: MerchantConfig = serde_json::from_value(serde_json::json!({
            "merchant_id": "119175088534",
            "secret_key": "s3cr3t",
            "checkout_url": "https://sandbox.example.com/checkout"
        }))
        .unwrap();

        assert_eq!(config.secret(), "s3cr3t");
        assert_eq!(
            config.checkout_url().unwrap().as_str(),
            "https://sandbox.example.com/checkout"
        );

        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("secret_key").is_none());
        assert_eq!(json["merchant_id"], "119175088534");
    }
}
