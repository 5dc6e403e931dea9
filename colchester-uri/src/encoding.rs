//! Percent-encoding of URI field values

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::SyntaxError;

/// Everything except RFC 3986 unreserved characters gets escaped.
///
/// In particular space becomes `%20` (never `+`), and `&`, `=`, `+`, `?`
/// are escaped so a value can never be mistaken for query structure.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a field value for use in a payment URI
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Decode a percent-encoded field value.
///
/// `+` is read as a space for compatibility with form-encoding producers;
/// a literal plus sign must arrive as `%2B`.
pub fn decode_component(field: &str, raw: &str) -> Result<String, SyntaxError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| SyntaxError::InvalidUtf8 {
            field: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reserved() {
        assert_eq!(encode_component("Hello World"), "Hello%20World");
        assert_eq!(encode_component("Mess & age + hope"), "Mess%20%26%20age%20%2B%20hope");
        assert_eq!(encode_component("a=b?c"), "a%3Db%3Fc");
        assert_eq!(encode_component("safe-._~"), "safe-._~");
    }

    #[test]
    fn test_encode_unicode() {
        // Moscow, in Cyrillic
        assert_eq!(
            encode_component("\u{041c}\u{043e}\u{0441}\u{043a}\u{0432}\u{0430}"),
            "%D0%9C%D0%BE%D1%81%D0%BA%D0%B2%D0%B0"
        );
    }

    #[test]
    fn test_decode_plus_and_percent_space() {
        assert_eq!(decode_component("label", "Hello+World").unwrap(), "Hello World");
        assert_eq!(decode_component("label", "Hello%20World").unwrap(), "Hello World");
        assert_eq!(decode_component("label", "1%2B1").unwrap(), "1+1");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = decode_component("message", "%FF%FE").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::InvalidUtf8 {
                field: "message".to_string()
            }
        );
    }
}
