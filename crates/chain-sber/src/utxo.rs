use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::SberError;
use crate::network::COIN_SCALE;

/// A single unspent transaction output as reported by an indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utxo {
    /// Funding transaction ID as a hex string.
    pub hash: String,
    /// Output index within that transaction.
    pub pos: u32,
    /// Value in the smallest indivisible unit.
    pub value: u64,
    /// Number of confirming blocks; 0 means unconfirmed.
    pub confirmations: u32,
    /// Coinbase/stake output subject to maturity rules.
    #[serde(default)]
    pub is_stake: bool,
}

impl Utxo {
    /// A UTXO is spendable without maturity concerns once confirmed,
    /// unless it is a stake output.
    pub fn is_mature(&self) -> bool {
        self.confirmations > 0 && !self.is_stake
    }
}

/// Result of coin selection: the chosen UTXOs and their aggregate value.
#[derive(Debug, Clone)]
pub struct UtxoSelection {
    /// The selected UTXOs, in spending order.
    pub selected: Vec<Utxo>,
    /// Total value of the selected UTXOs in the smallest unit.
    pub total: u64,
}

/// Selection ordering: mature outputs first, largest value first among
/// them; immature outputs after, fewest confirmations first.
fn selection_order(a: &Utxo, b: &Utxo) -> Ordering {
    match (a.is_mature(), b.is_mature()) {
        (true, true) => b.value.cmp(&a.value),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.confirmations.cmp(&b.confirmations),
    }
}

/// Convert a display-unit amount to integer units.
pub(crate) fn units(amount: f64) -> u64 {
    (amount * COIN_SCALE as f64).round() as u64
}

/// Select UTXOs covering `amount + fee`, both in display units.
///
/// Greedy walk over the selection ordering; returns the first prefix whose
/// cumulative value reaches the scaled target, or `InsufficientFunds` if
/// the whole set falls short. The caller's list is not modified.
pub fn select_utxos(utxos: &[Utxo], amount: f64, fee: f64) -> Result<UtxoSelection, SberError> {
    select_for_target(utxos, units(amount) + units(fee))
}

/// Select UTXOs covering `target` smallest units.
///
/// A zero target against a non-empty list still selects one UTXO: every
/// transaction needs at least one input, and contract builds may carry
/// their entire cost in gas.
pub fn select_for_target(utxos: &[Utxo], target: u64) -> Result<UtxoSelection, SberError> {
    let mut sorted = utxos.to_vec();
    // The ordering is only pairwise-consistent across the maturity branches;
    // the stable sort keeps equal-rank UTXOs in input order.
    sorted.sort_by(selection_order);

    let mut selected = Vec::new();
    let mut total: u64 = 0;
    for utxo in sorted {
        total += utxo.value;
        selected.push(utxo);
        if total >= target {
            break;
        }
    }

    if total < target {
        return Err(SberError::InsufficientFunds {
            available: total,
            required: target,
        });
    }

    Ok(UtxoSelection { selected, total })
}
