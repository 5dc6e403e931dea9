//! Base58Check address decoding and the [`AddressValidator`] capability

use thiserror::Error;

use crate::{Network, NetworkParams, ADDRESS_HASH_LEN, MAX_SUPPLY_UNITS};

/// Errors produced while decoding an address string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Not Base58, or the checksum does not match
    #[error("Invalid Base58Check encoding: {0}")]
    Base58(#[from] bs58::decode::Error),

    /// Decoded payload is not a version byte followed by a 20-byte hash
    #[error("Invalid address payload: expected 21 bytes, got {0}")]
    InvalidPayloadLength(usize),

    /// Version byte belongs to some other network (or to none)
    #[error("Address version {version} is not acceptable on {network}")]
    WrongNetwork {
        /// The version byte found in the address
        version: u8,
        /// The network the address was checked against
        network: Network,
    },
}

/// What an address pays to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Pay to pubkey hash
    PubkeyHash,
    /// Pay to script hash
    ScriptHash,
}

/// A successfully decoded address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedAddress {
    version: u8,
    kind: Option<AddressKind>,
    hash: [u8; ADDRESS_HASH_LEN],
}

impl DecodedAddress {
    /// The version byte
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The address kind, if the version byte is known
    pub fn kind(&self) -> Option<AddressKind> {
        self.kind
    }

    /// The hash carried by the address
    pub fn hash(&self) -> &[u8; ADDRESS_HASH_LEN] {
        &self.hash
    }

    /// Length of the decoded payload, excluding the version byte and checksum
    pub fn payload_len(&self) -> usize {
        self.hash.len()
    }
}

/// Decode a Base58Check string into its version byte and 20-byte hash
fn decode_base58check(candidate: &str) -> Result<(u8, [u8; ADDRESS_HASH_LEN]), AddressError> {
    let payload = bs58::decode(candidate).with_check(None).into_vec()?;

    match payload.split_first() {
        Some((&version, rest)) if rest.len() == ADDRESS_HASH_LEN => {
            let mut hash = [0u8; ADDRESS_HASH_LEN];
            hash.copy_from_slice(rest);
            Ok((version, hash))
        }
        _ => Err(AddressError::InvalidPayloadLength(payload.len())),
    }
}

/// Capability to decide whether a string is a good address.
///
/// The payment-request parser only ever talks to network parameters through
/// this trait.
pub trait AddressValidator {
    /// The network addresses are checked against, or `None` if any network is accepted
    fn network_id(&self) -> Option<Network>;

    /// Decode `candidate`, checking encoding, checksum, length and version byte
    fn decode_address(&self, candidate: &str) -> Result<DecodedAddress, AddressError>;

    /// Whether `candidate` is a well-formed address for this validator's network
    fn is_acceptable_address(&self, candidate: &str) -> bool {
        self.decode_address(candidate).is_ok()
    }

    /// Maximum issuable supply in smallest units
    fn max_supply_units(&self) -> u64;
}

impl AddressValidator for NetworkParams {
    fn network_id(&self) -> Option<Network> {
        Some(self.network())
    }

    fn decode_address(&self, candidate: &str) -> Result<DecodedAddress, AddressError> {
        let (version, hash) = decode_base58check(candidate)?;
        let kind = self.address_kind(version).ok_or(AddressError::WrongNetwork {
            version,
            network: self.network(),
        })?;

        Ok(DecodedAddress {
            version,
            kind: Some(kind),
            hash,
        })
    }

    fn max_supply_units(&self) -> u64 {
        NetworkParams::max_supply_units(self)
    }
}

/// Validator that accepts a checksum-valid address from any network.
///
/// Used when a URI arrives without any indication of which network it is
/// meant for; the version byte is reported but not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyNetwork;

impl AddressValidator for AnyNetwork {
    fn network_id(&self) -> Option<Network> {
        None
    }

    fn decode_address(&self, candidate: &str) -> Result<DecodedAddress, AddressError> {
        let (version, hash) = decode_base58check(candidate)?;
        let kind = Network::ALL
            .iter()
            .find_map(|network| network.params().address_kind(version));

        Ok(DecodedAddress { version, kind, hash })
    }

    fn max_supply_units(&self) -> u64 {
        MAX_SUPPLY_UNITS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET_P2PKH: &str = "CNDy88apTEXMoUPWgkBqpZibSNJT3vhjiC";
    const MAINNET_P2SH: &str = "9xCMDUo6C9k6tsYzYEBvup5sfLknnfs5DA";
    const TESTNET_P2PKH: &str = "mmH2r9KjPCz5gSxhiZqJ4yJtgEgk128gvB";
    const HASH_HEX: &str = "3f2ebb6c8d88e586b551303d2c29eba15518d8d1";

    fn sample_hash() -> [u8; ADDRESS_HASH_LEN] {
        let mut hash = [0u8; ADDRESS_HASH_LEN];
        hash.copy_from_slice(&hex::decode(HASH_HEX).unwrap());
        hash
    }

    #[test]
    fn test_mainnet_accepts_both_kinds() {
        let params = NetworkParams::mainnet();

        let p2pkh = params.decode_address(MAINNET_P2PKH).unwrap();
        assert_eq!(p2pkh.version(), 28);
        assert_eq!(p2pkh.kind(), Some(AddressKind::PubkeyHash));
        assert_eq!(p2pkh.hash(), &sample_hash());
        assert_eq!(p2pkh.payload_len(), 20);

        let p2sh = params.decode_address(MAINNET_P2SH).unwrap();
        assert_eq!(p2sh.kind(), Some(AddressKind::ScriptHash));
    }

    #[test]
    fn test_wrong_network() {
        let err = NetworkParams::testnet().decode_address(MAINNET_P2PKH).unwrap_err();
        assert_eq!(
            err,
            AddressError::WrongNetwork {
                version: 28,
                network: Network::Testnet
            }
        );
        assert!(!NetworkParams::mainnet().is_acceptable_address(TESTNET_P2PKH));
        assert!(NetworkParams::testnet().is_acceptable_address(TESTNET_P2PKH));
    }

    #[test]
    fn test_bad_checksum() {
        let err = NetworkParams::mainnet()
            .decode_address("CNDy88apTEXMoUPWgkBqpZibSNJT3vhji1")
            .unwrap_err();
        assert!(matches!(err, AddressError::Base58(_)));
    }

    #[test]
    fn test_not_base58() {
        // '0' and 'l' are outside the Base58 alphabet
        assert!(!NetworkParams::mainnet().is_acceptable_address("C0l"));
        assert!(!NetworkParams::mainnet().is_acceptable_address(""));
    }

    #[test]
    fn test_short_payload() {
        let short = bs58::encode([28u8, 1, 2, 3]).with_check().into_string();
        let err = NetworkParams::mainnet().decode_address(&short).unwrap_err();
        assert_eq!(err, AddressError::InvalidPayloadLength(4));
    }

    #[test]
    fn test_encode_roundtrip() {
        let params = NetworkParams::mainnet();
        assert_eq!(params.encode_address(AddressKind::PubkeyHash, &sample_hash()), MAINNET_P2PKH);
        assert_eq!(params.encode_address(AddressKind::ScriptHash, &sample_hash()), MAINNET_P2SH);
        assert_eq!(
            NetworkParams::testnet().encode_address(AddressKind::PubkeyHash, &sample_hash()),
            TESTNET_P2PKH
        );
    }

    #[test]
    fn test_any_network() {
        // A Bitcoin mainnet address: version 0 is unknown here but the checksum is fine
        let decoded = AnyNetwork.decode_address("1KzTSfqjF2iKCduwz59nv2uqh1W2JsTxZH").unwrap();
        assert_eq!(decoded.version(), 0);
        assert_eq!(decoded.kind(), None);

        let decoded = AnyNetwork.decode_address(TESTNET_P2PKH).unwrap();
        assert_eq!(decoded.kind(), Some(AddressKind::PubkeyHash));

        assert_eq!(AnyNetwork.network_id(), None);
        assert_eq!(AnyNetwork.max_supply_units(), MAX_SUPPLY_UNITS);
    }
}
