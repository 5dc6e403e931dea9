//! # Colchestercoin Payment Request URIs
//!
//! This crate turns "pay this address this amount, with this label and
//! message" into a single shareable string and back, following the BIP 21
//! conventions.
//!
//! ## URI Format
//!
//! ```text
//! colchestercoin:CNDy88apTEXMoUPWgkBqpZibSNJT3vhjiC?amount=12.34&label=Hello%20World&message=Be%20well
//! ```
//!
//! - `amount` is a decimal number of coins with at most 8 fractional digits
//! - `label` and `message` are percent-encoded UTF-8 text
//! - any other field is kept as an extension, unless its name starts with
//!   `req-`, in which case the whole URI is rejected
//! - a field name may appear only once, and `address` may not appear in the
//!   query at all
//!
//! ## Example
//!
//! ```
//! use colchester_params::NetworkParams;
//! use colchester_uri::{PaymentRequest, PaymentRequestBuilder};
//!
//! let uri = PaymentRequestBuilder::new("CNDy88apTEXMoUPWgkBqpZibSNJT3vhjiC")
//!     .amount(1_234_000_000)
//!     .label("Hello World")
//!     .build_uri();
//! assert_eq!(
//!     uri,
//!     "colchestercoin:CNDy88apTEXMoUPWgkBqpZibSNJT3vhjiC?amount=12.34&label=Hello%20World"
//! );
//!
//! let request = PaymentRequest::parse(NetworkParams::mainnet(), &uri).unwrap();
//! assert_eq!(request.amount(), Some(1_234_000_000));
//! assert_eq!(request.label(), Some("Hello World"));
//! ```

mod amount;
mod builder;
mod config;
mod encoding;
mod error;
mod grammar;
mod request;

pub use amount::{decimal_to_units, ensure_below_supply, units_to_decimal, MAX_DECIMAL_PLACES};
pub use builder::{build_uri, PaymentRequestBuilder};
pub use config::{ParseOptions, UriConfig};
pub use encoding::{decode_component, encode_component};
pub use error::{AmountError, Error, Result, SyntaxError};
pub use grammar::{check_uri_syntax, tokenize, RawPair, RawUri, UriForm};
pub use request::{Extensions, PaymentRequest};

/// URI scheme for payment requests
pub const SCHEME: &str = "colchestercoin";

/// Prefix marking a field the parser must understand
pub const REQUIRED_PREFIX: &str = "req-";

/// Payee address; only valid in the URI path
pub const FIELD_ADDRESS: &str = "address";

/// Decimal amount in coins
pub const FIELD_AMOUNT: &str = "amount";

/// Label for the payee
pub const FIELD_LABEL: &str = "label";

/// Message describing the payment
pub const FIELD_MESSAGE: &str = "message";
