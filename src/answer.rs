//! Replies to gateway notifications.
//!
//! The gateway expects a form-encoded body: `WMI_RESULT=OK` to confirm receipt,
//! or `WMI_RESULT=RETRY` to have the notification delivered again later. Both can
//! carry a `WMI_DESCRIPTION` message.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use url::form_urlencoded::byte_serialize;

use crate::{errors::ValidationError, fields};

/// The `WMI_RESULT` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultCode {
    Ok,
    Retry,
}

impl ResultCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::Ok => "OK",
            ResultCode::Retry => "RETRY",
        }
    }
}

/// The body returned to the gateway after a notification.
///
/// ```
/// use walletone_kit::answer::Acknowledgement;
///
/// assert_eq!(Acknowledgement::ok().to_string(), "WMI_RESULT=OK");
/// assert_eq!(
///     Acknowledgement::ok().with_description("Order paid").to_string(),
///     "WMI_RESULT=OK&WMI_DESCRIPTION=Order+paid"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub result: ResultCode,
    pub description: Option<String>,
}

impl Acknowledgement {
    /// Confirms receipt.
    pub fn ok() -> Self {
        Acknowledgement {
            result: ResultCode::Ok,
            description: None,
        }
    }

    /// Asks the gateway to deliver the notification again.
    pub fn retry() -> Self {
        Acknowledgement {
            result: ResultCode::Retry,
            description: None,
        }
    }

    /// Attaches a human-readable message. An empty message is dropped.
    pub fn with_description(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.description = (!message.is_empty()).then_some(message);
        self
    }

    /// `OK` for an accepted notification, `RETRY` carrying the reason otherwise.
    ///
    /// The protocol has no "reject" code, so every error answers `RETRY`,
    /// including ones a redelivery cannot fix (a foreign merchant id, a forged
    /// or missing signature). The gateway keeps redelivering such a
    /// notification until its own retry schedule gives up. A genuine
    /// notification rejected because of a wrong local secret is picked up
    /// once the configuration is corrected. Callers that would rather stop
    /// redelivery of a permanent rejection can answer [`Acknowledgement::ok`]
    /// themselves, since the payment state is untouched either way.
    pub fn for_validation(result: &Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Acknowledgement::ok(),
            Err(err) => Acknowledgement::retry().with_description(err.to_string()),
        }
    }

    /// The form-encoded response body.
    pub fn to_body(&self) -> String {
        self.to_string()
    }
}

impl Display for Acknowledgement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", fields::RESULT, self.result.as_str())?;
        if let Some(message) = &self.description {
            write!(f, "&{}=", fields::DESCRIPTION)?;
            for chunk in byte_serialize(message.as_bytes()) {
                f.write_str(chunk)?;
            }
        }
        Ok(())
    }
}

/// The success body, optionally with a message.
pub fn success_answer(message: Option<&str>) -> String {
    match message {
        Some(message) => Acknowledgement::ok().with_description(message).to_body(),
        None => Acknowledgement::ok().to_body(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_answer() {
        assert_eq!(success_answer(None), "WMI_RESULT=OK");
        assert_eq!(success_answer(Some("")), "WMI_RESULT=OK");
        assert_eq!(
            success_answer(Some("Оплачено & done")),
            "WMI_RESULT=OK&WMI_DESCRIPTION=%D0%9E%D0%BF%D0%BB%D0%B0%D1%87%D0%B5%D0%BD%D0%BE+%26+done"
        );
    }

    #[test]
    fn test_retry_for_rejected_notification() {
        let ack = Acknowledgement::for_validation(&Err(ValidationError::SignatureMismatch));
        assert_eq!(ack.result, ResultCode::Retry);
        assert_eq!(
            ack.to_body(),
            "WMI_RESULT=RETRY&WMI_DESCRIPTION=signatures+don%27t+match"
        );
        assert_eq!(
            Acknowledgement::for_validation(&Ok(())).to_body(),
            "WMI_RESULT=OK"
        );
    }

    #[test]
    fn test_permanent_rejection_still_asks_for_redelivery() {
        let ack = Acknowledgement::for_validation(&Err(ValidationError::MerchantMismatch {
            expected: "1".to_string(),
            received: "2".to_string(),
        }));
        assert_eq!(ack.result, ResultCode::Retry);
        assert_eq!(
            ack.description.as_deref(),
            Some("merchants don't match: expected '1', received '2'")
        );

        let ack = Acknowledgement::for_validation(&Err(ValidationError::MissingMerchantId));
        assert_eq!(
            ack.to_body(),
            "WMI_RESULT=RETRY&WMI_DESCRIPTION=WMI_MERCHANT_ID+is+not+specified"
        );
    }
}
