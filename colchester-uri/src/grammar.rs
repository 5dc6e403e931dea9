//! Tokenizer for `scheme:address?name=value&...` strings.
//!
//! This stage only checks structure. Field values come out still
//! percent-encoded and nothing is known yet about what the names mean.

use crate::config::ParseOptions;
use crate::error::{Error, Result, SyntaxError};
use crate::SCHEME;

/// Which scheme separator the input used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriForm {
    /// `scheme:address`
    Canonical,
    /// `scheme://address`, as emitted by some third-party wallets
    Authority,
}

/// One `name=value` query segment, value still encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPair<'a> {
    /// Field name, taken verbatim
    pub name: &'a str,
    /// Percent-encoded value, possibly empty
    pub value: &'a str,
}

/// A structurally valid payment URI, not yet interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUri<'a> {
    /// The scheme as written (matches [`SCHEME`] ignoring ASCII case)
    pub scheme: &'a str,
    /// Separator form used after the scheme
    pub form: UriForm,
    /// Percent-encoded, non-empty address token
    pub address: &'a str,
    /// Query pairs in the order they appear
    pub pairs: Vec<RawPair<'a>>,
}

/// Split `input` into scheme, address and raw query pairs
pub fn tokenize(input: &str, options: ParseOptions) -> Result<RawUri<'_>> {
    check_uri_syntax(input)?;

    let (scheme, rest) = match input.split_once(':') {
        Some((scheme, rest)) => (scheme, rest),
        None if input.eq_ignore_ascii_case(SCHEME) => return Err(Error::MissingAddress),
        None => return Err(Error::BadScheme(input.to_string())),
    };

    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return Err(Error::BadScheme(scheme.to_string()));
    }

    let (form, rest) = match rest.strip_prefix("//") {
        Some(_) if options.strict => return Err(SyntaxError::AuthorityForm.into()),
        Some(stripped) => {
            tracing::warn!("accepting non-canonical '{}://' payment URI", SCHEME);
            (UriForm::Authority, stripped)
        }
        None => (UriForm::Canonical, rest),
    };

    if rest.is_empty() {
        return Err(SyntaxError::ExpectedSchemeSpecificPart.into());
    }

    let mut parts = rest.split('?');
    let address = parts.next().unwrap_or_default();
    let query = parts.next();
    if parts.next().is_some() {
        return Err(SyntaxError::TooManyQuestionMarks.into());
    }

    if address.is_empty() {
        return Err(Error::MissingAddress);
    }

    let pairs = match query {
        Some(query) if !query.is_empty() => query
            .split('&')
            .map(split_pair)
            .collect::<std::result::Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };

    Ok(RawUri {
        scheme,
        form,
        address,
        pairs,
    })
}

/// Exactly one `=`, with a non-empty name on its left
fn split_pair(segment: &str) -> std::result::Result<RawPair<'_>, SyntaxError> {
    match segment.split_once('=') {
        Some((name, value)) if !name.is_empty() && !value.contains('=') => {
            Ok(RawPair { name, value })
        }
        _ => Err(SyntaxError::MalformedPair(segment.to_string())),
    }
}

/// Reject anything that could not appear in a well-formed URI.
///
/// Allowed: RFC 3986 unreserved and sub-delimiter characters, `: / ? @`,
/// `%XX` escapes, and printable non-ASCII text.
pub fn check_uri_syntax(input: &str) -> std::result::Result<(), SyntaxError> {
    let bytes = input.as_bytes();

    for (index, ch) in input.char_indices() {
        let legal = match ch {
            '%' => {
                let escape = bytes.get(index + 1..index + 3);
                if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return Err(SyntaxError::MalformedEscape { index });
                }
                true
            }
            c if c.is_ascii_alphanumeric() => true,
            '-' | '.' | '_' | '~' => true,
            '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' => true,
            ':' | '/' | '?' | '@' => true,
            c => !c.is_ascii() && !c.is_control() && !c.is_whitespace(),
        };

        if !legal {
            return Err(SyntaxError::IllegalCharacter { ch, index });
        }
    }

    Ok(())
}
