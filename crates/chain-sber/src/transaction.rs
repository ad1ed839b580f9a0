use bitcoin::absolute::LockTime;
use bitcoin::consensus;
use bitcoin::hashes::Hash;
use bitcoin::script::{Builder, PushBytesBuf, ScriptBuf};
use bitcoin::secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use bitcoin::sighash::{EcdsaSighashType, SighashCache};
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, Sequence, Transaction, TxIn, TxOut, Txid, Witness};
use tracing::debug;

use crate::address::decode_p2pkh_address;
use crate::contract::{call_contract_script, create_contract_script, GasParams};
use crate::error::SberError;
use crate::network::SberNetwork;
use crate::utxo::{select_for_target, units, Utxo, UtxoSelection};

/// Build and sign a pubkeyhash (plain value transfer) transaction.
///
/// Selects UTXOs covering `amount + fee`, pays `amount` to the `to`
/// address, and returns any remainder to the sender's own P2PKH script.
/// `amount` and `fee` are in display units (SBER). Returns the signed
/// transaction as a hex string.
pub fn build_pubkeyhash_transaction(
    private_key: &[u8; 32],
    to: &str,
    amount: f64,
    fee: f64,
    utxos: &[Utxo],
    network: SberNetwork,
) -> Result<String, SberError> {
    let secp = Secp256k1::new();
    let (secret_key, public_key) = load_keypair(private_key, &secp)?;
    let sender_script = p2pkh_script(&public_key);

    let recipient_hash = decode_p2pkh_address(to, network.params())?;

    let amount_units = units(amount);
    let fee_units = units(fee);
    let selection = select_for_target(utxos, amount_units + fee_units)?;

    let mut outputs = vec![TxOut {
        value: Amount::from_sat(amount_units),
        script_pubkey: ScriptBuf::new_p2pkh(&recipient_hash),
    }];

    let change = selection.total - amount_units - fee_units;
    if change > 0 {
        outputs.push(TxOut {
            value: Amount::from_sat(change),
            script_pubkey: sender_script.clone(),
        });
    }

    let mut tx = new_transaction(build_inputs(&selection)?, outputs);
    sign_inputs(&mut tx, &sender_script, &secret_key, &public_key, &secp)?;

    debug!(
        inputs = tx.input.len(),
        outputs = tx.output.len(),
        network = %network,
        "built pubkeyhash transaction"
    );

    Ok(hex::encode(consensus::serialize(&tx)))
}

/// Build and sign a create-contract transaction.
///
/// The contract output carries zero value; the execution cost
/// (`gas_limit * gas_price`) is paid out of the inputs on top of `fee`.
pub fn build_create_contract_transaction(
    private_key: &[u8; 32],
    bytecode_hex: &str,
    gas: GasParams,
    fee: f64,
    utxos: &[Utxo],
    network: SberNetwork,
) -> Result<String, SberError> {
    let script = create_contract_script(gas, bytecode_hex)?;
    let tx = build_contract_transaction(private_key, script, gas, fee, utxos)?;

    debug!(
        inputs = tx.input.len(),
        outputs = tx.output.len(),
        network = %network,
        "built create-contract transaction"
    );

    Ok(hex::encode(consensus::serialize(&tx)))
}

/// Build and sign a send-to-contract transaction.
///
/// `contract_address_hex` is the 20-byte target contract and
/// `call_data_hex` the ABI-encoded call data; the call-data content is not
/// validated here. Cost handling matches
/// [`build_create_contract_transaction`].
pub fn build_call_contract_transaction(
    private_key: &[u8; 32],
    contract_address_hex: &str,
    call_data_hex: &str,
    gas: GasParams,
    fee: f64,
    utxos: &[Utxo],
    network: SberNetwork,
) -> Result<String, SberError> {
    let script = call_contract_script(gas, call_data_hex, contract_address_hex)?;
    let tx = build_contract_transaction(private_key, script, gas, fee, utxos)?;

    debug!(
        inputs = tx.input.len(),
        outputs = tx.output.len(),
        network = %network,
        "built call-contract transaction"
    );

    Ok(hex::encode(consensus::serialize(&tx)))
}

/// Shared skeleton for both contract kinds: a zero-value contract output,
/// inputs covering fee plus gas, change back to the sender.
fn build_contract_transaction(
    private_key: &[u8; 32],
    contract_script: ScriptBuf,
    gas: GasParams,
    fee: f64,
    utxos: &[Utxo],
) -> Result<Transaction, SberError> {
    let secp = Secp256k1::new();
    let (secret_key, public_key) = load_keypair(private_key, &secp)?;
    let sender_script = p2pkh_script(&public_key);

    // The gas component never leaves integer units, so scaling cannot drift.
    let target = units(fee) + gas.gas_limit * gas.gas_price;
    let selection = select_for_target(utxos, target)?;

    let mut outputs = vec![TxOut {
        value: Amount::ZERO,
        script_pubkey: contract_script,
    }];

    let change = selection.total - target;
    if change > 0 {
        outputs.push(TxOut {
            value: Amount::from_sat(change),
            script_pubkey: sender_script.clone(),
        });
    }

    let mut tx = new_transaction(build_inputs(&selection)?, outputs);
    sign_inputs(&mut tx, &sender_script, &secret_key, &public_key, &secp)?;
    Ok(tx)
}

fn new_transaction(inputs: Vec<TxIn>, outputs: Vec<TxOut>) -> Transaction {
    Transaction {
        version: Version::ONE,
        lock_time: LockTime::ZERO,
        input: inputs,
        output: outputs,
    }
}

fn load_keypair(
    private_key: &[u8; 32],
    secp: &Secp256k1<All>,
) -> Result<(SecretKey, PublicKey), SberError> {
    let secret_key = SecretKey::from_slice(private_key)
        .map_err(|e| SberError::InvalidPrivateKey(format!("invalid secret key: {e}")))?;
    let public_key = PublicKey::from_secret_key(secp, &secret_key);
    Ok((secret_key, public_key))
}

/// The sender's own P2PKH locking script, used for change outputs and as
/// the legacy sighash script code.
fn p2pkh_script(public_key: &PublicKey) -> ScriptBuf {
    ScriptBuf::new_p2pkh(&bitcoin::PublicKey::new(*public_key).pubkey_hash())
}

fn build_inputs(selection: &UtxoSelection) -> Result<Vec<TxIn>, SberError> {
    let mut inputs = Vec::with_capacity(selection.selected.len());
    for utxo in &selection.selected {
        let txid: Txid = utxo
            .hash
            .parse()
            .map_err(|e| SberError::TransactionBuildError(format!("invalid txid: {e}")))?;

        inputs.push(TxIn {
            previous_output: OutPoint::new(txid, utxo.pos),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::default(),
        });
    }
    Ok(inputs)
}

/// Sign every input with the sender's key.
///
/// All spent outputs are assumed to be locked to the sender's P2PKH script,
/// which doubles as the legacy sighash script code.
fn sign_inputs(
    tx: &mut Transaction,
    script_code: &ScriptBuf,
    secret_key: &SecretKey,
    public_key: &PublicKey,
    secp: &Secp256k1<All>,
) -> Result<(), SberError> {
    for index in 0..tx.input.len() {
        let sighash_cache = SighashCache::new(&*tx);
        let sighash = sighash_cache
            .legacy_signature_hash(index, script_code, EcdsaSighashType::All.to_u32())
            .map_err(|e| SberError::SigningError(format!("sighash computation failed: {e}")))?;

        let msg = Message::from_digest(sighash.to_byte_array());
        let signature = secp.sign_ecdsa(&msg, secret_key);

        // scriptSig = <DER signature + hashtype byte> <compressed pubkey>
        let mut sig_bytes = signature.serialize_der().to_vec();
        sig_bytes.push(EcdsaSighashType::All as u8);

        let sig_push = PushBytesBuf::try_from(sig_bytes)
            .map_err(|e| SberError::SigningError(format!("signature push failed: {e:?}")))?;
        let pk_push = PushBytesBuf::try_from(public_key.serialize().to_vec())
            .map_err(|e| SberError::SigningError(format!("public key push failed: {e:?}")))?;

        tx.input[index].script_sig = Builder::new()
            .push_slice(sig_push)
            .push_slice(pk_push)
            .into_script();
    }
    Ok(())
}
