//! Parser configuration

use colchester_params::{AddressValidator, AnyNetwork, Network};
use serde::{Deserialize, Serialize};

use crate::{PaymentRequest, Result};

/// Per-call parser knobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Reject the `scheme://address` form instead of tolerating it
    #[serde(default)]
    pub strict: bool,
}

impl ParseOptions {
    /// Options that accept only the canonical `scheme:address` form
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Serializable parser configuration.
///
/// ```json
/// { "network": "mainnet", "strict": true }
/// ```
///
/// Leaving `network` out accepts checksum-valid addresses from any network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriConfig {
    /// Network addresses must belong to
    #[serde(default)]
    pub network: Option<Network>,

    /// Reject the `scheme://address` compatibility form
    #[serde(default)]
    pub strict: bool,
}

impl UriConfig {
    /// Configuration bound to one network
    pub fn for_network(network: Network) -> Self {
        Self {
            network: Some(network),
            strict: false,
        }
    }

    /// Parser options derived from this configuration
    pub fn options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.strict,
        }
    }

    /// The address validator this configuration selects
    pub fn validator(&self) -> &'static dyn AddressValidator {
        match self.network {
            Some(network) => network.params(),
            None => &AnyNetwork,
        }
    }

    /// Parse a payment URI under this configuration
    pub fn parse(&self, input: &str) -> Result<PaymentRequest> {
        PaymentRequest::parse_with(self.validator(), self.options(), input)
    }
}
