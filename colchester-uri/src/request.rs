//! Validated payment requests

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use colchester_params::{AddressValidator, AnyNetwork, NetworkParams};
use serde::{Serialize, Serializer};

use crate::amount::{decimal_to_units, units_to_decimal};
use crate::builder::build_uri;
use crate::config::ParseOptions;
use crate::encoding::decode_component;
use crate::error::{Error, Result};
use crate::grammar::tokenize;
use crate::{FIELD_ADDRESS, FIELD_AMOUNT, FIELD_LABEL, FIELD_MESSAGE, REQUIRED_PREFIX};

/// Query fields without native meaning, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions(Vec<(String, String)>);

impl Extensions {
    /// Value of the named extension field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` in the order they appeared
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of extension fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no extension fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, name: String, value: String) {
        self.0.push((name, value));
    }
}

impl Serialize for Extensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// A parsed, fully validated payment request.
///
/// Only a successful parse (or [`PaymentRequestBuilder::build`](crate::PaymentRequestBuilder::build))
/// produces one, and it is never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    extensions: Extensions,
}

impl PaymentRequest {
    pub(crate) fn from_parts(
        address: String,
        amount: Option<u64>,
        label: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            address,
            amount,
            label,
            message,
            extensions: Extensions::default(),
        }
    }

    /// Parse a URI whose address must belong to `params`' network
    pub fn parse(params: &NetworkParams, input: &str) -> Result<Self> {
        Self::parse_with(params, ParseOptions::default(), input)
    }

    /// Parse a URI accepting a checksum-valid address from any network
    pub fn parse_any_network(input: &str) -> Result<Self> {
        Self::parse_with(&AnyNetwork, ParseOptions::default(), input)
    }

    /// Parse with an explicit validator and options
    pub fn parse_with<V>(validator: &V, options: ParseOptions, input: &str) -> Result<Self>
    where
        V: AddressValidator + ?Sized,
    {
        let result = parse_request(validator, options, input);
        match &result {
            Ok(request) => tracing::debug!(
                address = %request.address,
                amount = ?request.amount,
                extensions = request.extensions.len(),
                "parsed payment request"
            ),
            Err(e) => tracing::debug!(kind = e.kind(), error = %e, "rejected payment URI"),
        }
        result
    }

    /// The payee address, exactly as it appeared after percent-decoding
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Requested amount in smallest units
    pub fn amount(&self) -> Option<u64> {
        self.amount
    }

    /// Label for the payee
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Message describing the payment
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Every other field, in first-seen order
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Look up any field by its URI name.
    ///
    /// The amount comes back in decimal coin notation, as it would appear in a URI.
    pub fn parameter(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            FIELD_ADDRESS => Some(Cow::Borrowed(self.address.as_str())),
            FIELD_AMOUNT => self.amount.map(|units| Cow::Owned(units_to_decimal(units))),
            FIELD_LABEL => self.label().map(Cow::Borrowed),
            FIELD_MESSAGE => self.message().map(Cow::Borrowed),
            other => self.extensions.get(other).map(Cow::Borrowed),
        }
    }

    /// Canonical URI for this request. Extension fields are not carried over.
    pub fn to_uri(&self) -> String {
        build_uri(
            &self.address,
            self.amount,
            self.label.as_deref(),
            self.message.as_deref(),
        )
    }
}

impl FromStr for PaymentRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_any_network(s)
    }
}

impl fmt::Display for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PaymentRequest['{}'='{}'", FIELD_ADDRESS, self.address)?;
        if let Some(amount) = self.amount {
            write!(f, ",'{}'='{}'", FIELD_AMOUNT, amount)?;
        }
        if let Some(label) = &self.label {
            write!(f, ",'{}'='{}'", FIELD_LABEL, label)?;
        }
        if let Some(message) = &self.message {
            write!(f, ",'{}'='{}'", FIELD_MESSAGE, message)?;
        }
        for (name, value) in self.extensions.iter() {
            write!(f, ",'{}'='{}'", name, value)?;
        }
        f.write_str("]")
    }
}

fn parse_request<V>(validator: &V, options: ParseOptions, input: &str) -> Result<PaymentRequest>
where
    V: AddressValidator + ?Sized,
{
    let raw = tokenize(input, options)?;

    let address = decode_component(FIELD_ADDRESS, raw.address)?;
    if let Err(source) = validator.decode_address(&address) {
        return Err(Error::BadAddressType { address, source });
    }

    let mut request = PaymentRequest::from_parts(address, None, None, None);

    // The path address counts as the first occurrence of `address`
    let mut seen: HashSet<&str> = HashSet::from([FIELD_ADDRESS]);

    for pair in raw.pairs {
        if !seen.insert(pair.name) {
            return Err(Error::DuplicateField(pair.name.to_string()));
        }

        match pair.name {
            FIELD_AMOUNT => {
                let units = decimal_to_units(pair.value, validator.max_supply_units())?;
                request.amount = Some(units);
            }
            FIELD_LABEL => {
                let label = decode_component(FIELD_LABEL, pair.value)?;
                if label.is_empty() {
                    return Err(Error::BadLabel);
                }
                request.label = Some(label);
            }
            FIELD_MESSAGE => {
                let message = decode_component(FIELD_MESSAGE, pair.value)?;
                if message.is_empty() {
                    return Err(Error::BadMessage);
                }
                request.message = Some(message);
            }
            name if name.starts_with(REQUIRED_PREFIX) => {
                return Err(Error::UnknownRequiredField(name.to_string()));
            }
            name => {
                let value = decode_component(name, pair.value)?;
                request.extensions.push(name.to_string(), value);
            }
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AmountError, SyntaxError};

    const ADDR: &str = "CNDy88apTEXMoUPWgkBqpZibSNJT3vhjiC";

    fn mainnet(input: &str) -> Result<PaymentRequest> {
        PaymentRequest::parse(NetworkParams::mainnet(), input)
    }

    #[test]
    fn test_parse_simple() {
        let request = mainnet(&format!("colchestercoin:{ADDR}")).unwrap();
        assert_eq!(request.address(), ADDR);
        assert_eq!(request.amount(), None);
        assert_eq!(request.label(), None);
        assert_eq!(request.message(), None);
        assert!(request.extensions().is_empty());
    }

    #[test]
    fn test_parse_combination() {
        let request = mainnet(&format!(
            "colchestercoin:{ADDR}?amount=6543210&label=Hello%20World&message=Be%20well"
        ))
        .unwrap();

        assert_eq!(request.amount(), Some(654_321_000_000_000));
        assert_eq!(request.label(), Some("Hello World"));
        assert_eq!(request.message(), Some("Be well"));
        assert_eq!(
            request.to_string(),
            format!(
                "PaymentRequest['address'='{ADDR}','amount'='654321000000000','label'='Hello World','message'='Be well']"
            )
        );
    }

    #[test]
    fn test_unknown_optional_field() {
        let request = mainnet(&format!("colchestercoin:{ADDR}?aardvark=true")).unwrap();
        assert_eq!(request.extensions().get("aardvark"), Some("true"));
        assert_eq!(request.parameter("aardvark").as_deref(), Some("true"));
        assert_eq!(
            request.to_string(),
            format!("PaymentRequest['address'='{ADDR}','aardvark'='true']")
        );
    }

    #[test]
    fn test_extensions_keep_order_and_empty_values() {
        let request =
            mainnet(&format!("colchestercoin:{ADDR}?zebra=1&aardvark=&mole=a%20b")).unwrap();
        let fields: Vec<_> = request.extensions().iter().collect();
        assert_eq!(fields, vec![("zebra", "1"), ("aardvark", ""), ("mole", "a b")]);
    }

    #[test]
    fn test_unknown_required_field() {
        let err = mainnet(&format!("colchestercoin:{ADDR}?req-aardvark=true")).unwrap_err();
        assert_eq!(err, Error::UnknownRequiredField("req-aardvark".to_string()));
        assert!(err.to_string().contains("req-aardvark"));
    }

    #[test]
    fn test_duplicate_address() {
        let err = mainnet(&format!("colchestercoin:{ADDR}?address=aardvark")).unwrap_err();
        assert_eq!(err, Error::DuplicateField("address".to_string()));
        assert!(err.to_string().contains("address"));
    }

    #[test]
    fn test_duplicate_fields_even_when_equal() {
        for query in ["amount=1&amount=1", "label=a&label=b", "x=1&x=1", "message=m&message=m"] {
            let err = mainnet(&format!("colchestercoin:{ADDR}?{query}")).unwrap_err();
            assert!(matches!(err, Error::DuplicateField(_)), "{query}");
        }
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let request = mainnet(&format!("colchestercoin:{ADDR}?label=a&Label=b")).unwrap();
        assert_eq!(request.label(), Some("a"));
        assert_eq!(request.extensions().get("Label"), Some("b"));
    }

    #[test]
    fn test_empty_label_and_message() {
        assert_eq!(mainnet(&format!("colchestercoin:{ADDR}?label=")), Err(Error::BadLabel));
        assert_eq!(mainnet(&format!("colchestercoin:{ADDR}?message=")), Err(Error::BadMessage));
    }

    #[test]
    fn test_bad_amounts() {
        assert_eq!(
            mainnet(&format!("colchestercoin:{ADDR}?amount=")),
            Err(Error::BadAmount(AmountError::Empty))
        );
        for amount in ["12X4", "-1", "0.123456789", "100000000", "84000000"] {
            let err = mainnet(&format!("colchestercoin:{ADDR}?amount={amount}")).unwrap_err();
            assert!(matches!(err, Error::BadAmount(_)), "{amount}");
            assert!(err.to_string().contains("amount"));
        }
    }

    #[test]
    fn test_wrong_network_address() {
        let err = PaymentRequest::parse(NetworkParams::testnet(), &format!("colchestercoin:{ADDR}"))
            .unwrap_err();
        assert!(matches!(err, Error::BadAddressType { .. }));
        assert!(err.to_string().contains("Bad address"));
    }

    #[test]
    fn test_invalid_utf8_value() {
        let err = mainnet(&format!("colchestercoin:{ADDR}?label=%C3%28")).unwrap_err();
        assert_eq!(
            err,
            Error::BadSyntax(SyntaxError::InvalidUtf8 {
                field: "label".to_string()
            })
        );
    }

    #[test]
    fn test_parameter_lookup() {
        let request =
            mainnet(&format!("colchestercoin:{ADDR}?amount=0.1&message=glory")).unwrap();
        assert_eq!(request.parameter("address").as_deref(), Some(ADDR));
        assert_eq!(request.parameter("amount").as_deref(), Some("0.1"));
        assert_eq!(request.parameter("message").as_deref(), Some("glory"));
        assert_eq!(request.parameter("label"), None);
        assert_eq!(request.parameter("nope"), None);
    }

    #[test]
    fn test_from_str_any_network() {
        let request: PaymentRequest =
            "colchestercoin://1KzTSfqjF2iKCduwz59nv2uqh1W2JsTxZH?amount=0.01000000"
                .parse()
                .unwrap();
        assert_eq!(request.address(), "1KzTSfqjF2iKCduwz59nv2uqh1W2JsTxZH");
        assert_eq!(request.amount(), Some(1_000_000));
    }

    #[test]
    fn test_serialize_json() {
        let request =
            mainnet(&format!("colchestercoin:{ADDR}?amount=1&zeta=z&alpha=a")).unwrap();
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            format!(r#"{{"address":"{ADDR}","amount":100000000,"extensions":{{"zeta":"z","alpha":"a"}}}}"#)
        );
    }
}
