//! The payment aggregate.
//!
//! A [`Payment`] is one transaction attempt: it produces the signed checkout form
//! and is later confirmed by the gateway's notification (see
//! [`Payment::validate`](crate::notification)).

use base64::{Engine, prelude::BASE64_STANDARD};
use bon::Builder;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    config::MerchantConfig,
    errors::{EncodingError, Result},
    fields::{self, FieldKind, InboundField},
    signature,
    types::{Amount, CurrencyId, OrderState, Record, Signature, Timestamp},
};

/// Lifetime of a payment when no expiry is given.
pub const DEFAULT_TTL_DAYS: i64 = 30;

/// Marks a description carried as base64 of its UTF-8 bytes.
pub const BASE64_DESCRIPTION_PREFIX: &str = "BASE64:";

/// How the description is put on the wire.
///
/// `Base64` lets any Unicode text pass through the Windows-1251 signing step and
/// is what the gateway recommends. `Plain` sends the text as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionEncoding {
    #[default]
    Base64,
    Plain,
}

impl DescriptionEncoding {
    pub fn encode(self, description: &str) -> String {
        match self {
            DescriptionEncoding::Base64 => format!(
                "{BASE64_DESCRIPTION_PREFIX}{}",
                BASE64_STANDARD.encode(description)
            ),
            DescriptionEncoding::Plain => description.to_string(),
        }
    }
}

fn default_expired_date() -> Timestamp {
    Timestamp::expiring_in(TimeDelta::days(DEFAULT_TTL_DAYS))
}

/// A single payment with the checkout gateway.
///
/// Outbound attributes are set through the builder or the `set_*` methods.
/// Inbound attributes (commission, payer, order id, dates, state) can only be
/// written by a notification that passed validation.
///
/// ```
/// use walletone_kit::{config::MerchantConfig, payment::Payment, types::CurrencyId};
///
/// let config = MerchantConfig::builder()
///     .merchant_id("119175088534")
///     .secret_key("XkZMYW56NzVbNV1aekxGNVxvT3xwVHExZ005")
///     .build();
///
/// let payment = Payment::builder(config)
///     .amount(100u32)
///     .currency_id(CurrencyId::RUB)
///     .payment_id("12345-001")
///     .description("Order #12345-001")
///     .build();
///
/// let form = payment.form_fields().unwrap();
/// assert_eq!(form[1], ("WMI_PAYMENT_AMOUNT".to_string(), "100.00".to_string()));
/// assert_eq!(form.last().unwrap().0, "WMI_SIGNATURE");
/// assert!(payment.state().is_undefined());
/// ```
#[derive(Builder, Debug, Clone)]
pub struct Payment {
    #[builder(start_fn)]
    config: MerchantConfig,

    #[builder(default, into)]
    amount: Amount,
    #[builder(default, into)]
    currency_id: CurrencyId,
    #[builder(default, into)]
    payment_id: String,
    #[builder(default, into)]
    description: String,
    #[builder(default)]
    description_encoding: DescriptionEncoding,
    #[builder(default, into)]
    success_url: String,
    #[builder(default, into)]
    fail_url: String,
    /// Defaults to [`DEFAULT_TTL_DAYS`] from construction.
    #[builder(default = default_expired_date(), into)]
    expired_date: Timestamp,
    /// Merchant-defined fields sent along with the form.
    #[builder(default)]
    custom_fields: Record<String>,

    #[builder(skip)]
    commission: Option<Amount>,
    #[builder(skip)]
    payer_id: Option<String>,
    #[builder(skip)]
    order_id: Option<String>,
    #[builder(skip)]
    create_date: Option<Timestamp>,
    #[builder(skip)]
    update_date: Option<Timestamp>,
    #[builder(skip)]
    state: OrderState,
    #[builder(skip)]
    validated: bool,
}

impl Payment {
    /// A payment with default outbound attributes.
    pub fn new(config: MerchantConfig) -> Self {
        Payment::builder(config).build()
    }

    pub fn config(&self) -> &MerchantConfig {
        &self.config
    }

    pub fn merchant_id(&self) -> &str {
        &self.config.merchant_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency_id(&self) -> CurrencyId {
        self.currency_id
    }

    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn description_encoding(&self) -> DescriptionEncoding {
        self.description_encoding
    }

    pub fn success_url(&self) -> &str {
        &self.success_url
    }

    pub fn fail_url(&self) -> &str {
        &self.fail_url
    }

    pub fn expired_date(&self) -> &Timestamp {
        &self.expired_date
    }

    pub fn custom_fields(&self) -> &Record<String> {
        &self.custom_fields
    }

    /// Gateway commission, known after validation.
    pub fn commission(&self) -> Option<Amount> {
        self.commission
    }

    /// Payer wallet id (`WMI_TO_USER_ID`), known after validation.
    pub fn payer_id(&self) -> Option<&str> {
        self.payer_id.as_deref()
    }

    /// Gateway-assigned order id, known after validation.
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    pub fn create_date(&self) -> Option<&Timestamp> {
        self.create_date.as_ref()
    }

    pub fn update_date(&self) -> Option<&Timestamp> {
        self.update_date.as_ref()
    }

    /// Order state reported by the gateway, `undefined` before validation.
    pub fn state(&self) -> &OrderState {
        &self.state
    }

    /// Whether a notification for this payment has passed validation.
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub fn set_amount(&mut self, amount: impl Into<Amount>) -> &mut Self {
        self.amount = amount.into();
        self
    }

    /// Parses and sets an amount given as text, e.g. from an order record.
    ///
    /// Amounts too large to render with two fractional digits are rejected.
    pub fn try_set_amount(&mut self, amount: &str) -> Result<&mut Self> {
        let amount = amount.parse::<Amount>()?;
        if !amount.fits_minor_scale() {
            return Err(rust_decimal::Error::ExceedsMaximumPossibleValue.into());
        }
        self.amount = amount;
        Ok(self)
    }

    pub fn set_currency_id(&mut self, currency_id: impl Into<CurrencyId>) -> &mut Self {
        self.currency_id = currency_id.into();
        self
    }

    pub fn set_payment_id(&mut self, payment_id: impl Into<String>) -> &mut Self {
        self.payment_id = payment_id.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    pub fn set_description_encoding(&mut self, encoding: DescriptionEncoding) -> &mut Self {
        self.description_encoding = encoding;
        self
    }

    pub fn set_success_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.success_url = url.into();
        self
    }

    pub fn set_fail_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.fail_url = url.into();
        self
    }

    /// Accepts a `DateTime<Utc>` or the literal wire text.
    pub fn set_expired_date(&mut self, expired_date: impl Into<Timestamp>) -> &mut Self {
        self.expired_date = expired_date.into();
        self
    }

    /// Replaces the custom field bag.
    pub fn set_custom_fields(&mut self, custom_fields: Record<String>) -> &mut Self {
        self.custom_fields = custom_fields;
        self
    }

    /// The description as sent in `WMI_DESCRIPTION`.
    pub fn description_wire(&self) -> String {
        self.description_encoding.encode(&self.description)
    }

    /// The unsigned outbound field set.
    ///
    /// Custom fields are merged last and win over protocol fields of the same name.
    pub fn outbound_fields(&self) -> Record<String> {
        let mut out = Record::with_capacity(8 + self.custom_fields.len());
        for (name, value) in self.protocol_fields() {
            out.insert(name.to_string(), value);
        }
        out.extend(self.custom_fields.clone());
        out
    }

    fn protocol_fields(&self) -> [(&'static str, String); 8] {
        [
            (fields::MERCHANT_ID, self.config.merchant_id.clone()),
            (fields::PAYMENT_AMOUNT, self.amount.to_string()),
            (fields::CURRENCY_ID, self.currency_id.to_string()),
            (fields::PAYMENT_NO, self.payment_id.clone()),
            (fields::DESCRIPTION, self.description_wire()),
            (fields::EXPIRED_DATE, self.expired_date.to_string()),
            (fields::SUCCESS_URL, self.success_url.clone()),
            (fields::FAIL_URL, self.fail_url.clone()),
        ]
    }

    /// Signature of [`outbound_fields`](Self::outbound_fields).
    ///
    /// Returns `None` when no secret key is configured; the form is then sent
    /// unsigned.
    pub fn sign(&self) -> std::result::Result<Option<Signature>, EncodingError> {
        if !self.config.is_signing() {
            return Ok(None);
        }
        signature::sign(&self.outbound_fields(), self.config.secret()).map(Some)
    }

    /// Ordered form inputs, ready to be rendered as hidden fields.
    ///
    /// Protocol fields come first in their canonical order, custom fields follow
    /// sorted by name, and `WMI_SIGNATURE` closes the list when signing is on.
    pub fn form_fields(&self) -> std::result::Result<Vec<(String, String)>, EncodingError> {
        let mut outbound = self.outbound_fields();
        let mut form = Vec::with_capacity(outbound.len() + 1);

        for (name, _) in self.protocol_fields() {
            if let Some(value) = outbound.remove(name) {
                form.push((name.to_string(), value));
            }
        }
        let mut custom: Vec<(String, String)> = outbound.into_iter().collect();
        custom.sort_by(|a, b| a.0.cmp(&b.0));
        form.extend(custom);

        if let Some(signature) = self.sign()? {
            form.push((fields::SIGNATURE.to_string(), signature.0));
        }
        Ok(form)
    }

    /// The URL the checkout form is posted to.
    pub fn checkout_url(&self) -> Result<Url> {
        self.config.checkout_url()
    }

    /// Writes notification fields into the payment without checking the signature.
    ///
    /// Recognised protocol fields update their attribute, unknown `WMI_` fields are
    /// ignored and every other field ends up in the custom bag, which is replaced
    /// rather than merged.
    ///
    /// The gateway is authoritative for what it sends, so this never fails. A
    /// numeric value that does not parse leaves its slot as it was (the commission
    /// becomes `None`), and an undecodable `BASE64:` description is kept verbatim
    /// as plain text.
    pub fn apply_inbound_fields(&mut self, payload: &Record<String>) {
        let mut update = InboundUpdate::default();
        for (name, value) in payload {
            match fields::classify(name) {
                FieldKind::Inbound(field) => update.set(field, value),
                FieldKind::Reserved => {}
                FieldKind::Custom => {
                    update.custom_fields.insert(name.clone(), value.clone());
                }
            }
        }
        update.commit(self);
    }

    pub(crate) fn mark_validated(&mut self) {
        self.validated = true;
    }
}

/// Parsed notification values waiting to be committed.
#[derive(Default)]
struct InboundUpdate {
    amount: Option<Amount>,
    // Present-but-unparseable clears the commission.
    commission: Option<Option<Amount>>,
    currency_id: Option<CurrencyId>,
    payer_id: Option<String>,
    payment_id: Option<String>,
    order_id: Option<String>,
    description: Option<(String, DescriptionEncoding)>,
    success_url: Option<String>,
    fail_url: Option<String>,
    expired_date: Option<Timestamp>,
    create_date: Option<Timestamp>,
    update_date: Option<Timestamp>,
    state: Option<OrderState>,
    custom_fields: Record<String>,
}

impl InboundUpdate {
    fn set(&mut self, field: InboundField, value: &str) {
        match field {
            InboundField::Amount => self.amount = parse_lenient(field, value),
            InboundField::Commission => self.commission = Some(parse_lenient(field, value)),
            InboundField::Currency => self.currency_id = parse_lenient(field, value),
            InboundField::PayerId => self.payer_id = Some(value.to_string()),
            InboundField::PaymentId => self.payment_id = Some(value.to_string()),
            InboundField::OrderId => self.order_id = Some(value.to_string()),
            InboundField::Description => self.description = Some(decode_description(value)),
            InboundField::SuccessUrl => self.success_url = Some(value.to_string()),
            InboundField::FailUrl => self.fail_url = Some(value.to_string()),
            InboundField::ExpiredDate => self.expired_date = Some(Timestamp::from(value)),
            InboundField::CreateDate => self.create_date = Some(Timestamp::from(value)),
            InboundField::UpdateDate => self.update_date = Some(Timestamp::from(value)),
            InboundField::State => self.state = Some(OrderState::new(value)),
        }
    }

    fn commit(self, payment: &mut Payment) {
        if let Some(amount) = self.amount {
            payment.amount = amount;
        }
        if let Some(commission) = self.commission {
            payment.commission = commission;
        }
        if let Some(currency_id) = self.currency_id {
            payment.currency_id = currency_id;
        }
        if let Some(payer_id) = self.payer_id {
            payment.payer_id = Some(payer_id);
        }
        if let Some(payment_id) = self.payment_id {
            payment.payment_id = payment_id;
        }
        if let Some(order_id) = self.order_id {
            payment.order_id = Some(order_id);
        }
        if let Some((description, encoding)) = self.description {
            payment.description = description;
            payment.description_encoding = encoding;
        }
        if let Some(success_url) = self.success_url {
            payment.success_url = success_url;
        }
        if let Some(fail_url) = self.fail_url {
            payment.fail_url = fail_url;
        }
        if let Some(expired_date) = self.expired_date {
            payment.expired_date = expired_date;
        }
        if let Some(create_date) = self.create_date {
            payment.create_date = Some(create_date);
        }
        if let Some(update_date) = self.update_date {
            payment.update_date = Some(update_date);
        }
        if let Some(state) = self.state {
            payment.state = state;
        }
        payment.custom_fields = self.custom_fields;
    }
}

/// Parses a typed slot, dropping values that do not fit it.
fn parse_lenient<T>(_field: InboundField, value: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Ignoring unparseable {}='{}': {}",
                _field.wire_name(),
                value,
                _err
            )
        })
        .ok()
}

fn decode_description(value: &str) -> (String, DescriptionEncoding) {
    let decoded = value.strip_prefix(BASE64_DESCRIPTION_PREFIX).and_then(|encoded| {
        let bytes = BASE64_STANDARD.decode(encoded).ok()?;
        String::from_utf8(bytes).ok()
    });
    match decoded {
        Some(text) => (text, DescriptionEncoding::Base64),
        None => (value.to_string(), DescriptionEncoding::Plain),
    }
}
