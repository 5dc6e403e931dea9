//! Canonical payment URI generation

use colchester_params::AddressValidator;

use crate::amount::{ensure_below_supply, units_to_decimal};
use crate::encoding::encode_component;
use crate::error::{Error, Result};
use crate::{PaymentRequest, FIELD_AMOUNT, FIELD_LABEL, FIELD_MESSAGE, SCHEME};

/// Serialize the canonical fields of a payment request.
///
/// Output is `scheme:address[?amount=..][&label=..][&message=..]` in that
/// fixed order. An empty label or message is omitted exactly like a missing
/// one; an amount of zero is still written. Inputs are assumed to be
/// validated already.
pub fn build_uri(
    address: &str,
    amount: Option<u64>,
    label: Option<&str>,
    message: Option<&str>,
) -> String {
    let amount = amount.map(|units| format!("{}={}", FIELD_AMOUNT, units_to_decimal(units)));
    let label = non_empty(label).map(|label| format!("{}={}", FIELD_LABEL, encode_component(label)));
    let message =
        non_empty(message).map(|message| format!("{}={}", FIELD_MESSAGE, encode_component(message)));

    let query: Vec<String> = [amount, label, message].into_iter().flatten().collect();
    let address = encode_component(address);

    if query.is_empty() {
        format!("{}:{}", SCHEME, address)
    } else {
        format!("{}:{}?{}", SCHEME, address, query.join("&"))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Builder for payment requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequestBuilder {
    address: String,
    amount: Option<u64>,
    label: Option<String>,
    message: Option<String>,
}

impl PaymentRequestBuilder {
    /// Start a request paying to `address`
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount: None,
            label: None,
            message: None,
        }
    }

    /// Set the amount in smallest units
    pub fn amount(mut self, units: u64) -> Self {
        self.amount = Some(units);
        self
    }

    /// Set the label; an empty label counts as none
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the message; an empty message counts as none
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Serialize without validating anything
    pub fn build_uri(&self) -> String {
        build_uri(
            &self.address,
            self.amount,
            self.label.as_deref(),
            self.message.as_deref(),
        )
    }

    /// Check the address and amount against `validator` and produce a request
    pub fn build<V>(self, validator: &V) -> Result<PaymentRequest>
    where
        V: AddressValidator + ?Sized,
    {
        if self.address.is_empty() {
            return Err(Error::MissingAddress);
        }
        if let Err(source) = validator.decode_address(&self.address) {
            return Err(Error::BadAddressType {
                address: self.address,
                source,
            });
        }
        if let Some(units) = self.amount {
            ensure_below_supply(units, validator.max_supply_units())?;
        }

        Ok(PaymentRequest::from_parts(
            self.address,
            self.amount,
            self.label.filter(|label| !label.is_empty()),
            self.message.filter(|message| !message.is_empty()),
        ))
    }
}
