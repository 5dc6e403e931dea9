//! # Colchestercoin Network Parameters
//!
//! The small slice of the Colchestercoin network tables that payment-request
//! handling depends on: the Base58Check version bytes each network accepts
//! and the maximum issuable supply.
//!
//! Every network has exactly one canonical [`NetworkParams`] value, built at
//! compile time and handed out as `&'static`. Callers pass it by reference
//! into whatever needs it instead of reaching for a global.
//!
//! ## Address validation
//!
//! Consumers that only need "is this a good address for the network I'm on"
//! go through the [`AddressValidator`] trait, which is implemented both by
//! [`NetworkParams`] and by [`AnyNetwork`] (checksum-only validation for
//! input whose network is not known up front).

mod address;
mod network;

pub use address::{AddressError, AddressKind, AddressValidator, AnyNetwork, DecodedAddress};
pub use network::{Network, NetworkParams, ParseNetworkError};

/// Number of smallest units in one coin (1 coin = 10^8 units)
pub const UNITS_PER_COIN: u64 = 100_000_000;

/// Total number of coins that will ever be issued
pub const MAX_SUPPLY_COINS: u64 = 84_000_000;

/// Maximum issuable supply expressed in smallest units
pub const MAX_SUPPLY_UNITS: u64 = MAX_SUPPLY_COINS * UNITS_PER_COIN;

/// Length of the hash carried by pay-to-pubkey-hash and pay-to-script-hash addresses
pub const ADDRESS_HASH_LEN: usize = 20;
