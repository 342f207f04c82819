//! Canonical form of a field set, the input of the signature digest.
//!
//! Field names are sorted case-insensitively, values are concatenated in that
//! order without separators and the shared secret is appended last. Names do
//! not take part in the hashed material.

use std::cmp::Ordering;

use crate::types::Record;

/// Orders two field names the way the gateway does before signing.
///
/// ASCII letters compare case-insensitively by their lowercase form. Names that
/// fold to the same text fall back to plain byte order, so the result is total
/// and independent of map iteration order.
pub fn compare_field_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()));
    folded.then_with(|| a.cmp(b))
}

/// Field names of `fields` in signing order.
pub fn sorted_names(fields: &Record<String>) -> Vec<&str> {
    let mut names: Vec<&str> = fields.keys().map(String::as_str).collect();
    names.sort_unstable_by(|a, b| compare_field_names(a, b));
    names
}

/// Builds the text that is transcoded and hashed for `fields` and `secret`.
///
/// ```
/// use walletone_kit::{canonical::canonical_string, types::Record};
///
/// let fields = Record::from([
///     ("b".to_string(), "2".to_string()),
///     ("A".to_string(), "1".to_string()),
///     ("C".to_string(), "3".to_string()),
/// ]);
/// assert_eq!(canonical_string(&fields, "key"), "123key");
/// ```
pub fn canonical_string(fields: &Record<String>, secret: &str) -> String {
    let capacity = fields.values().map(String::len).sum::<usize>() + secret.len();
    let mut out = String::with_capacity(capacity);
    for name in sorted_names(fields) {
        out.push_str(&fields[name]);
    }
    out.push_str(secret);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record<String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_sort_ignores_letter_case() {
        let fields = record(&[("WMI_B", "b"), ("wmi_a", "a"), ("Wmi_C", "c")]);
        assert_eq!(sorted_names(&fields), vec!["wmi_a", "WMI_B", "Wmi_C"]);
    }

    #[test]
    fn test_case_only_duplicates_use_byte_order() {
        let fields = record(&[("abc", "lower"), ("ABC", "upper"), ("Abc", "mixed")]);
        assert_eq!(sorted_names(&fields), vec!["ABC", "Abc", "abc"]);
        assert_eq!(canonical_string(&fields, ""), "uppermixedlower");
    }

    #[test]
    fn test_shorter_prefix_sorts_first() {
        let fields = record(&[("WMI_PAYMENT_NO", "2"), ("WMI_PAYMENT", "1")]);
        assert_eq!(canonical_string(&fields, "s"), "12s");
    }

    #[test]
    fn test_underscore_sorts_before_letters() {
        // '_' (0x5F) sits between the upper- and lowercase ranges, so the
        // folding direction decides where it lands.
        let fields = record(&[("MyShopParam", "custom"), ("MY_PARAM", "protocol")]);
        assert_eq!(sorted_names(&fields), vec!["MY_PARAM", "MyShopParam"]);
    }

    #[test]
    fn test_keys_are_not_hashed() {
        let a = record(&[("x", "1"), ("y", "2")]);
        let b = record(&[("p", "1"), ("q", "2")]);
        assert_eq!(canonical_string(&a, "k"), canonical_string(&b, "k"));
    }

    #[test]
    fn test_empty_fields_yield_secret_only() {
        assert_eq!(canonical_string(&Record::new(), "secret"), "secret");
    }
}
