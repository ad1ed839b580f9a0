use bitcoin::hashes::Hash;
use bitcoin::PubkeyHash;

use crate::error::SberError;
use crate::network::NetworkParams;

/// Decode a base58check P2PKH address into its public key hash.
///
/// The payload must be 21 bytes (version byte + 20-byte hash) and the
/// version byte must match `params.pubkey_hash` for the target network.
pub fn decode_p2pkh_address(
    address: &str,
    params: &NetworkParams,
) -> Result<PubkeyHash, SberError> {
    let payload = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| SberError::InvalidAddress(format!("base58check decode failed: {e}")))?;

    if payload.len() != 21 {
        return Err(SberError::InvalidAddress(format!(
            "expected 21-byte payload, got {}",
            payload.len()
        )));
    }

    if payload[0] != params.pubkey_hash {
        return Err(SberError::InvalidAddress(format!(
            "version byte {:#04x} does not match network ({:#04x})",
            payload[0], params.pubkey_hash
        )));
    }

    PubkeyHash::from_slice(&payload[1..])
        .map_err(|e| SberError::InvalidAddress(e.to_string()))
}
