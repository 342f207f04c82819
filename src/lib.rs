//! # WalletOne Kit
//!
//! Merchant-side toolkit for the WalletOne checkout protocol.
//!
//! The crate builds the signed field set of a checkout form and validates the
//! gateway's payment notification. Rendering the form and running the HTTP
//! endpoints are left to the host application.
//!
//! ## Quick Start
//!
//! ```rust
//! use walletone_kit::{
//!     answer::Acknowledgement,
//!     config::MerchantConfig,
//!     notification::Notification,
//!     payment::Payment,
//!     types::CurrencyId,
//! };
//!
//! let config = MerchantConfig::builder()
//!     .merchant_id("119175088534")
//!     .secret_key("XkZMYW56NzVbNV1aekxGNVxvT3xwVHExZ005")
//!     .build();
//!
//! let mut payment = Payment::builder(config)
//!     .amount(100u32)
//!     .currency_id(CurrencyId::RUB)
//!     .payment_id("12345-001")
//!     .description("Payment for order #12345-001 in MYSHOP.com")
//!     .success_url("https://myshop.com/w1/success.php")
//!     .fail_url("https://myshop.com/w1/fail.php")
//!     .build();
//!
//! // Hidden inputs of the form posted to `payment.checkout_url()`.
//! let form = payment.form_fields().unwrap();
//! assert!(form.iter().any(|(name, _)| name == "WMI_SIGNATURE"));
//!
//! // Later, the gateway posts its notification back.
//! let notification = Notification::from_form_body("WMI_MERCHANT_ID=119175088534");
//! let result = payment.validate(&notification);
//! assert!(result.is_err());
//! assert!(payment.state().is_undefined());
//!
//! let reply = Acknowledgement::for_validation(&result);
//! assert!(reply.to_body().starts_with("WMI_RESULT=RETRY"));
//! ```
//!
//! ## Modules
//!
//! - [`payment`]: The [`Payment`](payment::Payment) aggregate and its outbound field set.
//! - [`notification`]: [`Notification`](notification::Notification) payloads and
//!   [`Payment::validate`](payment::Payment::validate).
//! - [`signature`]: Signing and verification of field sets.
//! - [`canonical`]: Field ordering and concatenation used as the digest input.
//! - [`encoding`]: The Windows-1251 transcoding step.
//! - [`answer`]: Replies to the gateway.
//! - [`config`]: Merchant configuration.
//! - [`fields`]: Protocol field names.
//! - [`errors`]: Error types.
//!
//! ## Feature Flags
//!
//! - `tracing` (default): emits `tracing` events on validation and signing.

pub mod answer;
pub mod canonical;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod fields;
pub mod notification;
pub mod payment;
pub mod signature;
pub mod types;
