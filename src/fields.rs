//! Protocol field names.
//!
//! Every name owned by the gateway starts with [`RESERVED_PREFIX`]. Anything
//! else in a form or notification belongs to the merchant.

pub const RESERVED_PREFIX: &str = "WMI_";

pub const MERCHANT_ID: &str = "WMI_MERCHANT_ID";
pub const PAYMENT_AMOUNT: &str = "WMI_PAYMENT_AMOUNT";
pub const COMMISSION_AMOUNT: &str = "WMI_COMMISSION_AMOUNT";
pub const CURRENCY_ID: &str = "WMI_CURRENCY_ID";
pub const TO_USER_ID: &str = "WMI_TO_USER_ID";
pub const PAYMENT_NO: &str = "WMI_PAYMENT_NO";
pub const ORDER_ID: &str = "WMI_ORDER_ID";
pub const DESCRIPTION: &str = "WMI_DESCRIPTION";
pub const SUCCESS_URL: &str = "WMI_SUCCESS_URL";
pub const FAIL_URL: &str = "WMI_FAIL_URL";
pub const EXPIRED_DATE: &str = "WMI_EXPIRED_DATE";
pub const CREATE_DATE: &str = "WMI_CREATE_DATE";
pub const UPDATE_DATE: &str = "WMI_UPDATE_DATE";
pub const ORDER_STATE: &str = "WMI_ORDER_STATE";
pub const SIGNATURE: &str = "WMI_SIGNATURE";
pub const RESULT: &str = "WMI_RESULT";

/// Payment attributes a notification is allowed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InboundField {
    Amount,
    Commission,
    Currency,
    PayerId,
    PaymentId,
    OrderId,
    Description,
    SuccessUrl,
    FailUrl,
    ExpiredDate,
    CreateDate,
    UpdateDate,
    State,
}

impl InboundField {
    pub const ALL: [InboundField; 13] = [
        InboundField::Amount,
        InboundField::Commission,
        InboundField::Currency,
        InboundField::PayerId,
        InboundField::PaymentId,
        InboundField::OrderId,
        InboundField::Description,
        InboundField::SuccessUrl,
        InboundField::FailUrl,
        InboundField::ExpiredDate,
        InboundField::CreateDate,
        InboundField::UpdateDate,
        InboundField::State,
    ];

    /// The wire name carrying this attribute.
    pub const fn wire_name(self) -> &'static str {
        match self {
            InboundField::Amount => PAYMENT_AMOUNT,
            InboundField::Commission => COMMISSION_AMOUNT,
            InboundField::Currency => CURRENCY_ID,
            InboundField::PayerId => TO_USER_ID,
            InboundField::PaymentId => PAYMENT_NO,
            InboundField::OrderId => ORDER_ID,
            InboundField::Description => DESCRIPTION,
            InboundField::SuccessUrl => SUCCESS_URL,
            InboundField::FailUrl => FAIL_URL,
            InboundField::ExpiredDate => EXPIRED_DATE,
            InboundField::CreateDate => CREATE_DATE,
            InboundField::UpdateDate => UPDATE_DATE,
            InboundField::State => ORDER_STATE,
        }
    }

    /// Looks up a wire name. Matching is exact.
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

/// What a notification key means to the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A recognised protocol attribute.
    Inbound(InboundField),
    /// A protocol name with no attribute (e.g. `WMI_SIGNATURE`); ignored.
    Reserved,
    /// A merchant-defined field.
    Custom,
}

/// Classifies a notification key.
///
/// ```
/// use walletone_kit::fields::{classify, FieldKind, InboundField};
///
/// assert_eq!(classify("WMI_ORDER_STATE"), FieldKind::Inbound(InboundField::State));
/// assert_eq!(classify("WMI_SIGNATURE"), FieldKind::Reserved);
/// assert_eq!(classify("wmi_something"), FieldKind::Reserved);
/// assert_eq!(classify("MyShopParam1"), FieldKind::Custom);
/// ```
pub fn classify(name: &str) -> FieldKind {
    if let Some(field) = InboundField::from_wire(name) {
        FieldKind::Inbound(field)
    } else if has_reserved_prefix(name) {
        FieldKind::Reserved
    } else {
        FieldKind::Custom
    }
}

/// Case-insensitive check for [`RESERVED_PREFIX`].
pub fn has_reserved_prefix(name: &str) -> bool {
    name.get(..RESERVED_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(RESERVED_PREFIX))
}
