//! Sbercoin chain support for the crypto-wallet.
//!
//! Provides maturity-aware UTXO coin selection, contract output script
//! construction (OP_CREATE / OP_CALL), and legacy P2PKH transaction
//! building and signing. Elliptic-curve signing and transaction
//! serialization are delegated to the `bitcoin` crate.

pub mod address;
pub mod contract;
pub mod error;
pub mod network;
pub mod script_num;
pub mod transaction;
pub mod utxo;
