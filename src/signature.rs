//! Signature engine.
//!
//! A signature is `base64(md5(encode(canonical_string(fields, secret))))`, where
//! `encode` is the gateway's legacy code page and base64 is applied to the 16
//! raw digest bytes rather than to their hex form.

use base64::{Engine, prelude::BASE64_STANDARD};
use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

use crate::{
    canonical::canonical_string,
    encoding::{LegacyEncoding, Windows1251},
    errors::EncodingError,
    types::{Record, Signature},
};

/// Signs `fields` with `secret` using the gateway's Windows-1251 encoding.
///
/// ```
/// use walletone_kit::{signature::sign, types::Record};
///
/// let fields = Record::from([("WMI_MERCHANT_ID".to_string(), "1".to_string())]);
/// let token = sign(&fields, "secret").unwrap();
/// assert_eq!(token.as_str().len(), 24);
/// assert!(token.as_str().ends_with("=="));
/// ```
pub fn sign(fields: &Record<String>, secret: &str) -> Result<Signature, EncodingError> {
    sign_with(&Windows1251, fields, secret)
}

/// Signs `fields` with `secret`, transcoding through `encoding`.
pub fn sign_with<E: LegacyEncoding + ?Sized>(
    encoding: &E,
    fields: &Record<String>,
    secret: &str,
) -> Result<Signature, EncodingError> {
    let text = canonical_string(fields, secret);
    let bytes = encoding.encode(&text)?;
    let digest = Md5::digest(&bytes);

    #[cfg(feature = "tracing")]
    tracing::trace!(
        "Signed {} fields over {} {} bytes",
        fields.len(),
        bytes.len(),
        encoding.name()
    );

    Ok(Signature(BASE64_STANDARD.encode(digest)))
}

/// Checks `claimed` against the signature of `fields` and `secret`.
///
/// Comparison is exact: no case folding or whitespace trimming.
pub fn verify(
    fields: &Record<String>,
    secret: &str,
    claimed: &str,
) -> Result<bool, EncodingError> {
    verify_with(&Windows1251, fields, secret, claimed)
}

/// [`verify`] with an explicit encoding.
pub fn verify_with<E: LegacyEncoding + ?Sized>(
    encoding: &E,
    fields: &Record<String>,
    secret: &str,
    claimed: &str,
) -> Result<bool, EncodingError> {
    let expected = sign_with(encoding, fields, secret)?;
    Ok(tokens_match(expected.as_str(), claimed))
}

/// Constant-time string equality.
pub(crate) fn tokens_match(expected: &str, claimed: &str) -> bool {
    expected.as_bytes().ct_eq(claimed.as_bytes()).into()
}
