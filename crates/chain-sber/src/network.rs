/// Scale factor from display-unit SBER amounts to the integer units used in
/// transaction outputs. Deployed contract transactions use 1e7.
pub const COIN_SCALE: u64 = 10_000_000;

/// The unit upstream indexers document UTXO `value` fields in (1e-8 SBER).
/// Intentionally distinct from [`COIN_SCALE`]; transaction building applies
/// `COIN_SCALE` only.
pub const UTXO_VALUE_SCALE: u64 = 100_000_000;

/// Chain parameters consumed by the address and signing layers.
///
/// Only `pubkey_hash` is interpreted by this crate (destination address
/// decoding); the remaining fields are opaque configuration for external
/// key and message-signing tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkParams {
    /// Prefix for signed-message digests.
    pub message_prefix: &'static str,
    /// Bech32 human-readable part.
    pub bech32_hrp: &'static str,
    /// BIP-32 extended public key version bytes.
    pub bip32_public: u32,
    /// BIP-32 extended private key version bytes.
    pub bip32_private: u32,
    /// Base58 version byte for P2PKH addresses.
    pub pubkey_hash: u8,
    /// Base58 version byte for P2SH addresses.
    pub script_hash: u8,
    /// Base58 version byte for WIF private keys.
    pub wif: u8,
}

/// Sbercoin mainnet parameters.
pub const MAINNET: NetworkParams = NetworkParams {
    message_prefix: "\x15SBER Signed Message:\n",
    bech32_hrp: "sber",
    bip32_public: 0x0488b21e,
    bip32_private: 0x0488ade4,
    pubkey_hash: 0x3f,
    script_hash: 0x1a,
    wif: 0x3c,
};

/// Sbercoin testnet parameters.
pub const TESTNET: NetworkParams = NetworkParams {
    message_prefix: "\x15SBER Signed Message:\n",
    bech32_hrp: "tb",
    bip32_public: 0x043587cf,
    bip32_private: 0x04358394,
    pubkey_hash: 0x55,
    script_hash: 0x6e,
    wif: 0xef,
};

/// Supported Sbercoin networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SberNetwork {
    Mainnet,
    Testnet,
}

impl SberNetwork {
    /// Return the parameter table for this network.
    pub fn params(self) -> &'static NetworkParams {
        match self {
            SberNetwork::Mainnet => &MAINNET,
            SberNetwork::Testnet => &TESTNET,
        }
    }
}

impl std::fmt::Display for SberNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SberNetwork::Mainnet => write!(f, "mainnet"),
            SberNetwork::Testnet => write!(f, "testnet"),
        }
    }
}
