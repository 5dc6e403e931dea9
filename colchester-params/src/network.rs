//! Per-network parameter tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{AddressKind, ADDRESS_HASH_LEN, MAX_SUPPLY_UNITS};

/// Network identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network
    #[default]
    Mainnet,
    /// Public test network
    Testnet,
}

impl Network {
    /// All known networks
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    /// Lowercase name, as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// The canonical parameters for this network
    pub fn params(&self) -> &'static NetworkParams {
        NetworkParams::for_network(*self)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a network name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown network: {0}")]
pub struct ParseNetworkError(String);

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(ParseNetworkError(s.to_string())),
        }
    }
}

/// Parameters of a single network.
///
/// Only the canonical instances returned by [`NetworkParams::mainnet`] and
/// [`NetworkParams::testnet`] exist; they are plain `static` data, so there is
/// nothing to initialize and nothing to lock.
#[derive(Debug, PartialEq, Eq)]
pub struct NetworkParams {
    network: Network,
    pubkey_address_version: u8,
    script_address_version: u8,
    max_supply_units: u64,
    default_port: u16,
}

static MAINNET: NetworkParams = NetworkParams {
    network: Network::Mainnet,
    pubkey_address_version: 28,
    script_address_version: 22,
    max_supply_units: MAX_SUPPLY_UNITS,
    default_port: 29333,
};

static TESTNET: NetworkParams = NetworkParams {
    network: Network::Testnet,
    pubkey_address_version: 111,
    script_address_version: 196,
    max_supply_units: MAX_SUPPLY_UNITS,
    default_port: 29333,
};

impl NetworkParams {
    /// Main network parameters
    pub fn mainnet() -> &'static NetworkParams {
        &MAINNET
    }

    /// Test network parameters
    pub fn testnet() -> &'static NetworkParams {
        &TESTNET
    }

    /// Parameters for the given network
    pub fn for_network(network: Network) -> &'static NetworkParams {
        match network {
            Network::Mainnet => &MAINNET,
            Network::Testnet => &TESTNET,
        }
    }

    /// Which network these parameters describe
    pub fn network(&self) -> Network {
        self.network
    }

    /// Version byte of pay-to-pubkey-hash addresses
    pub fn pubkey_address_version(&self) -> u8 {
        self.pubkey_address_version
    }

    /// Version byte of pay-to-script-hash addresses
    pub fn script_address_version(&self) -> u8 {
        self.script_address_version
    }

    /// Version bytes accepted in addresses on this network
    pub fn acceptable_address_versions(&self) -> [u8; 2] {
        [self.pubkey_address_version, self.script_address_version]
    }

    /// Maximum issuable supply in smallest units
    pub fn max_supply_units(&self) -> u64 {
        self.max_supply_units
    }

    /// Default peer-to-peer port
    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// Encode a 20-byte hash as a Base58Check address for this network
    pub fn encode_address(&self, kind: AddressKind, hash: &[u8; ADDRESS_HASH_LEN]) -> String {
        let version = match kind {
            AddressKind::PubkeyHash => self.pubkey_address_version,
            AddressKind::ScriptHash => self.script_address_version,
        };
        let mut payload = Vec::with_capacity(1 + ADDRESS_HASH_LEN);
        payload.push(version);
        payload.extend_from_slice(hash);
        bs58::encode(payload).with_check().into_string()
    }

    /// Classify a version byte
    pub fn address_kind(&self, version: u8) -> Option<AddressKind> {
        if version == self.pubkey_address_version {
            Some(AddressKind::PubkeyHash)
        } else if version == self.script_address_version {
            Some(AddressKind::ScriptHash)
        } else {
            None
        }
    }
}
