//! Gateway notifications and their validation.
//!
//! For details, see [`Payment::validate`].

use serde::{Deserialize, Serialize};

use crate::{
    errors::ValidationError,
    fields,
    payment::Payment,
    signature,
    types::Record,
};

/// The field set of a gateway notification.
///
/// ```
/// use walletone_kit::notification::Notification;
///
/// let notification = Notification::from_form_body(
///     "WMI_MERCHANT_ID=119175088534&WMI_ORDER_STATE=Accepted&MyShopParam1=Value+1",
/// );
/// assert_eq!(notification.merchant_id(), Some("119175088534"));
/// assert_eq!(notification.get("MyShopParam1"), Some("Value 1"));
/// assert_eq!(notification.signature(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notification(Record<String>);

impl Notification {
    pub fn new(fields: Record<String>) -> Self {
        Notification(fields)
    }

    /// Parses an `application/x-www-form-urlencoded` UTF-8 body.
    ///
    /// A repeated name keeps its last value.
    pub fn from_form_body(body: &str) -> Self {
        Self::from_form_bytes(body.as_bytes())
    }

    pub fn from_form_bytes(body: &[u8]) -> Self {
        url::form_urlencoded::parse(body).into_owned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// `WMI_MERCHANT_ID`, if present and non-empty.
    pub fn merchant_id(&self) -> Option<&str> {
        self.non_empty(fields::MERCHANT_ID)
    }

    /// `WMI_SIGNATURE`, if present and non-empty.
    pub fn signature(&self) -> Option<&str> {
        self.non_empty(fields::SIGNATURE)
    }

    /// `WMI_ORDER_STATE`, if present.
    pub fn order_state(&self) -> Option<&str> {
        self.get(fields::ORDER_STATE)
    }

    pub fn fields(&self) -> &Record<String> {
        &self.0
    }

    pub fn into_fields(self) -> Record<String> {
        self.0
    }

    /// Every field except `WMI_SIGNATURE`: the signature input.
    pub fn signed_fields(&self) -> Record<String> {
        self.0
            .iter()
            .filter(|(name, _)| name.as_str() != fields::SIGNATURE)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }
}

impl From<Record<String>> for Notification {
    fn from(value: Record<String>) -> Self {
        Notification(value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Notification {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Notification(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Payment {
    /// Validates a gateway notification and, on success, applies it.
    ///
    /// The checks run in order and the first failure is returned:
    ///
    /// 1. `WMI_MERCHANT_ID` is present and equals the configured merchant id.
    /// 2. `WMI_SIGNATURE` is present.
    /// 3. The signature recomputed over every other field with the configured
    ///    secret equals `WMI_SIGNATURE` exactly.
    ///
    /// Only then are the fields written through
    /// [`apply_inbound_fields`](Payment::apply_inbound_fields) and the payment
    /// marked as validated. A failed call leaves the payment unchanged. Validating
    /// the same notification again succeeds with the same outcome.
    pub fn validate(&mut self, notification: &Notification) -> Result<(), ValidationError> {
        let result = self.check_and_apply(notification);

        #[cfg(feature = "tracing")]
        match &result {
            Ok(()) => tracing::info!(
                "Notification accepted: payment_no='{}', order_id='{}', state='{}'",
                self.payment_id(),
                self.order_id().unwrap_or_default(),
                self.state()
            ),
            Err(err) => tracing::warn!(
                "Notification rejected: payment_no='{}': {err}",
                notification.get(fields::PAYMENT_NO).unwrap_or_default()
            ),
        }

        result
    }

    fn check_and_apply(&mut self, notification: &Notification) -> Result<(), ValidationError> {
        let received = notification
            .merchant_id()
            .ok_or(ValidationError::MissingMerchantId)?;
        if received != self.merchant_id() {
            return Err(ValidationError::MerchantMismatch {
                expected: self.merchant_id().to_string(),
                received: received.to_string(),
            });
        }

        let claimed = notification
            .signature()
            .ok_or(ValidationError::MissingSignature)?;
        let signed = notification.signed_fields();
        if !signature::verify(&signed, self.config().secret(), claimed)? {
            return Err(ValidationError::SignatureMismatch);
        }

        self.apply_inbound_fields(notification.fields());
        self.mark_validated();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MerchantConfig;

    const SECRET: &str = "XkZMYW56NzVbNV1aekxGNVxvT3xwVHExZ005";

    fn payment() -> Payment {
        Payment::new(
            MerchantConfig::builder()
                .merchant_id("119175088534")
                .secret_key(SECRET)
                .build(),
        )
    }

    fn signed(pairs: &[(&str, &str)], secret: &str) -> Notification {
        let mut notification: Notification = pairs.iter().copied().collect();
        let token = signature::sign(notification.fields(), secret).unwrap();
        notification.insert(fields::SIGNATURE, token.0);
        notification
    }

    #[test]
    fn test_form_body_decoding() {
        let n = Notification::from_form_body("a=1&b=%D0%96&c=x%2By&a=2");
        assert_eq!(n.get("a"), Some("2"));
        assert_eq!(n.get("b"), Some("Ж"));
        assert_eq!(n.get("c"), Some("x+y"));
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let n = Notification::from_form_body("WMI_MERCHANT_ID=&WMI_SIGNATURE=");
        assert_eq!(n.merchant_id(), None);
        assert_eq!(n.signature(), None);
    }

    #[test]
    fn test_signed_fields_exclude_signature() {
        let n = signed(&[("WMI_MERCHANT_ID", "1")], "k");
        assert!(n.fields().contains_key("WMI_SIGNATURE"));
        assert!(!n.signed_fields().contains_key("WMI_SIGNATURE"));
        assert_eq!(n.signed_fields().len(), 1);
    }

    #[test]
    fn test_check_order_merchant_before_signature() {
        let mut p = payment();
        let n: Notification = [("WMI_MERCHANT_ID", "other")].into_iter().collect();
        assert!(matches!(
            p.validate(&n),
            Err(ValidationError::MerchantMismatch { .. })
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let mut p = payment();
        let n = signed(
            &[("WMI_MERCHANT_ID", "119175088534"), ("WMI_ORDER_STATE", "Accepted")],
            "not-the-secret",
        );
        assert_eq!(p.validate(&n), Err(ValidationError::SignatureMismatch));
        assert!(p.state().is_undefined());
        assert!(!p.is_validated());
    }

    #[test]
    fn test_accepts_and_marks_validated() {
        let mut p = payment();
        let n = signed(
            &[("WMI_MERCHANT_ID", "119175088534"), ("WMI_ORDER_STATE", "Accepted")],
            SECRET,
        );
        p.validate(&n).unwrap();
        assert_eq!(p.state(), &"Accepted");
        assert!(p.is_validated());
    }

    #[test]
    fn test_encoding_failure_is_reported() {
        let mut p = payment();
        let mut n: Notification = [
            ("WMI_MERCHANT_ID", "119175088534"),
            ("Note", "🎁"),
        ]
        .into_iter()
        .collect();
        n.insert(fields::SIGNATURE, "AAAAAAAAAAAAAAAAAAAAAA==");
        assert!(matches!(p.validate(&n), Err(ValidationError::Encoding(_))));
    }
}
