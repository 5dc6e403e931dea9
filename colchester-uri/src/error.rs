//! Error types for payment request URIs

use colchester_params::AddressError;
use thiserror::Error;

use crate::{FIELD_ADDRESS, FIELD_AMOUNT, FIELD_LABEL, FIELD_MESSAGE};

/// Result type alias for payment request operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a payment request URI is rejected.
///
/// Parsing is all-or-nothing: any of these aborts the parse and no partial
/// request is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Leading token is not the payment scheme
    #[error("Unsupported URI scheme: {0}")]
    BadScheme(String),

    /// Structural or character-level problem with the URI
    #[error(transparent)]
    BadSyntax(#[from] SyntaxError),

    /// Nothing between the scheme and the query
    #[error("Missing address")]
    MissingAddress,

    /// Address present but not valid for the network
    #[error("Bad address '{address}': {source}")]
    BadAddressType {
        /// The decoded address token
        address: String,
        /// Why the network rejected it
        source: AddressError,
    },

    /// A field name occurs more than once
    #[error("'{0}' is duplicated, URI is invalid")]
    DuplicateField(String),

    /// A `req-` field the parser does not understand
    #[error("'{0}' is required but not known, this URI is not valid")]
    UnknownRequiredField(String),

    /// The amount field is malformed or out of range
    #[error("Invalid amount: {0}")]
    BadAmount(#[from] AmountError),

    /// The label field is present but empty
    #[error("Field 'label' is present but empty")]
    BadLabel,

    /// The message field is present but empty
    #[error("Field 'message' is present but empty")]
    BadMessage,
}

impl Error {
    /// Name of the field the error is about, where there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::BadScheme(_) => None,
            Self::BadSyntax(e) => e.field(),
            Self::MissingAddress | Self::BadAddressType { .. } => Some(FIELD_ADDRESS),
            Self::DuplicateField(name) | Self::UnknownRequiredField(name) => Some(name.as_str()),
            Self::BadAmount(_) => Some(FIELD_AMOUNT),
            Self::BadLabel => Some(FIELD_LABEL),
            Self::BadMessage => Some(FIELD_MESSAGE),
        }
    }

    /// Short stable name of the error kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadScheme(_) => "bad_scheme",
            Self::BadSyntax(_) => "bad_syntax",
            Self::MissingAddress => "missing_address",
            Self::BadAddressType { .. } => "bad_address_type",
            Self::DuplicateField(_) => "duplicate_field",
            Self::UnknownRequiredField(_) => "unknown_required_field",
            Self::BadAmount(_) => "bad_amount",
            Self::BadLabel => "bad_label",
            Self::BadMessage => "bad_message",
        }
    }
}

/// Syntax violations found before any field is interpreted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Character outside the URI character set
    #[error("Bad URI syntax: illegal character {ch:?} at index {index}")]
    IllegalCharacter {
        /// The offending character
        ch: char,
        /// Byte offset into the input
        index: usize,
    },

    /// `%` not followed by two hex digits
    #[error("Bad URI syntax: malformed escape at index {index}")]
    MalformedEscape {
        /// Byte offset of the `%`
        index: usize,
    },

    /// Scheme separator with nothing after it
    #[error("Bad URI syntax: expected scheme-specific part")]
    ExpectedSchemeSpecificPart,

    /// `scheme://address` while running in strict mode
    #[error("Bad URI syntax: authority form 'scheme://' is not accepted in strict mode")]
    AuthorityForm,

    /// More than one `?`
    #[error("Too many question marks in URI")]
    TooManyQuestionMarks,

    /// A query segment that is not exactly `name=value`
    #[error("Malformed URI - cannot parse name value pair '{0}'")]
    MalformedPair(String),

    /// Percent-decoded bytes are not UTF-8
    #[error("Bad URI syntax: field '{field}' is not valid UTF-8 after decoding")]
    InvalidUtf8 {
        /// The field being decoded
        field: String,
    },
}

impl SyntaxError {
    fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidUtf8 { field } => Some(field.as_str()),
            _ => None,
        }
    }
}

/// Problems with a decimal amount
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Nothing to parse
    #[error("amount is empty")]
    Empty,

    /// Not `digits[.digits]` or `.digits`
    #[error("'{0}' is not a valid amount")]
    InvalidFormat(String),

    /// More than eight fractional digits
    #[error("'{0}' has too many decimal places (max 8)")]
    TooManyDecimalPlaces(String),

    /// At or above the maximum issuable supply
    #[error("'{0}' is not below the maximum supply")]
    ExceedsMaxSupply(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let cases = [
            Error::MissingAddress,
            Error::DuplicateField("address".to_string()),
            Error::UnknownRequiredField("req-aardvark".to_string()),
            Error::BadAmount(AmountError::Empty),
            Error::BadAmount(AmountError::TooManyDecimalPlaces("0.123456789".to_string())),
            Error::BadLabel,
            Error::BadMessage,
        ];

        for err in cases {
            let field = err.field().expect("field-specific error");
            assert!(
                err.to_string().to_lowercase().contains(field),
                "{err} should mention {field}"
            );
        }
    }

    #[test]
    fn test_syntax_messages() {
        let err = Error::from(SyntaxError::IllegalCharacter { ch: '|', index: 14 });
        assert!(err.to_string().contains("Bad URI syntax"));
        assert_eq!(err.kind(), "bad_syntax");

        let err = Error::from(SyntaxError::TooManyQuestionMarks);
        assert!(err.to_string().contains("Too many question marks"));

        let err = Error::from(SyntaxError::MalformedPair("aardvark".to_string()));
        assert!(err.to_string().contains("cannot parse name value pair"));
    }
}
