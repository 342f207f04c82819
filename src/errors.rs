/// Text that cannot be represented in the legacy code page used for signing.
///
/// The gateway hashes Windows-1251 bytes, so a character outside that code page
/// would otherwise be lost before hashing and produce a signature the gateway
/// never agrees with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("character {character:?} at byte {position} has no {encoding} representation")]
pub struct EncodingError {
    /// The first offending character.
    pub character: char,
    /// Byte offset of the character in the UTF-8 input.
    pub position: usize,
    /// Name of the target encoding.
    pub encoding: &'static str,
}

/// Reasons a gateway notification is rejected.
///
/// All variants are final: the payment is left untouched and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The payload carries no `WMI_MERCHANT_ID`.
    #[error("WMI_MERCHANT_ID is not specified")]
    MissingMerchantId,

    /// The payload was issued for another merchant.
    #[error("merchants don't match: expected '{expected}', received '{received}'")]
    MerchantMismatch { expected: String, received: String },

    /// The payload carries no `WMI_SIGNATURE`.
    #[error("WMI_SIGNATURE is not specified")]
    MissingSignature,

    /// The recomputed signature differs from the supplied one.
    #[error("signatures don't match")]
    SignatureMismatch,

    /// The payload cannot be transcoded for signature verification.
    #[error("signature input cannot be encoded: {0}")]
    Encoding(#[from] EncodingError),
}

/// Error types for crate operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Notification validation errors.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Signature input encoding errors.
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Amount parsing errors.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] rust_decimal::Error),

    /// Merchant configuration errors.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// A specialized `Result` type for crate operations.
pub type Result<T> = std::result::Result<T, Error>;
