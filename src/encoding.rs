//! Transcoding of the signature input into the gateway's legacy code page.
//!
//! The gateway computes its digest over Windows-1251 bytes. The step lives
//! behind [`LegacyEncoding`] so it can be replaced or audited separately from
//! the rest of the signature pipeline.

use std::borrow::Cow;

use encoding_rs::{EncoderResult, WINDOWS_1251};

use crate::errors::EncodingError;

/// A text encoding applied to the canonical string before hashing.
pub trait LegacyEncoding {
    /// The encoding label, used in error messages.
    fn name(&self) -> &'static str;

    /// Encodes `text`, failing on the first unrepresentable character.
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodingError>;
}

/// The single-byte Cyrillic code page used by the gateway.
///
/// ```
/// use walletone_kit::encoding::{LegacyEncoding, Windows1251};
///
/// assert_eq!(Windows1251.encode("Ok").unwrap().into_owned(), b"Ok".to_vec());
/// assert_eq!(
///     Windows1251.encode("Жёлтый").unwrap().into_owned(),
///     vec![0xC6, 0xB8, 0xEB, 0xF2, 0xFB, 0xE9]
/// );
/// assert!(Windows1251.encode("日本").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Windows1251;

impl LegacyEncoding for Windows1251 {
    fn name(&self) -> &'static str {
        WINDOWS_1251.name()
    }

    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodingError> {
        // Windows-1251 is ASCII compatible.
        if text.is_ascii() {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }

        let mut encoder = WINDOWS_1251.new_encoder();
        let mut out = Vec::with_capacity(text.len());
        let mut consumed = 0;
        loop {
            let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(
                &text[consumed..],
                &mut out,
                true,
            );
            consumed += read;
            match result {
                EncoderResult::InputEmpty => return Ok(Cow::Owned(out)),
                EncoderResult::OutputFull => out.reserve(text.len() - consumed + 1),
                EncoderResult::Unmappable(character) => {
                    return Err(EncodingError {
                        character,
                        position: consumed - character.len_utf8(),
                        encoding: self.name(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_borrowed() {
        let encoded = Windows1251.encode("WMI_PAYMENT_AMOUNT100.00").unwrap();
        assert!(matches!(encoded, Cow::Borrowed(_)));
    }

    #[test]
    fn test_cyrillic_maps_to_single_bytes() {
        let encoded = Windows1251.encode("Оплата заказа №5").unwrap();
        assert_eq!(encoded.len(), "Оплата заказа №5".chars().count());
        // NUMERO SIGN has its own slot in the code page.
        assert_eq!(encoded[14], 0xB9);
    }

    #[test]
    fn test_unmappable_character_is_reported_with_position() {
        let err = Windows1251.encode("Заказ 🎁 готов").unwrap_err();
        assert_eq!(err.character, '🎁');
        assert_eq!(err.position, "Заказ ".len());
        assert_eq!(err.encoding, "windows-1251");
    }

    #[test]
    fn test_empty_input() {
        assert!(Windows1251.encode("").unwrap().is_empty());
    }
}
