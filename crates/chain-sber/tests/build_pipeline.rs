//! Cross-module integration tests exercising the full pipeline:
//! UTXO set -> coin selection -> script construction -> signed transaction.
//!
//! These tests go through the public API only and decode the returned hex
//! with the `bitcoin` crate to catch regressions at module boundaries.

use bitcoin::consensus;
use bitcoin::Transaction;

use chain_sber::contract::GasParams;
use chain_sber::error::SberError;
use chain_sber::network::SberNetwork;
use chain_sber::transaction::{
    build_call_contract_transaction, build_create_contract_transaction,
    build_pubkeyhash_transaction,
};
use chain_sber::utxo::{select_utxos, Utxo};

const TEST_KEY: [u8; 32] = [0x42; 32];

fn recipient() -> String {
    let mut payload = vec![SberNetwork::Mainnet.params().pubkey_hash];
    payload.extend([0x33; 20]);
    bs58::encode(payload).with_check().into_string()
}

fn utxo_set() -> Vec<Utxo> {
    serde_json::from_str(
        r#"[
            {"hash": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
             "pos": 0, "value": 50000000, "confirmations": 10, "isStake": false},
            {"hash": "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
             "pos": 1, "value": 30000000, "confirmations": 0, "isStake": false}
        ]"#,
    )
    .unwrap()
}

fn decode(hex_tx: &str) -> Transaction {
    consensus::deserialize(&hex::decode(hex_tx).unwrap()).unwrap()
}

// ─── Transfer: select -> build -> sign -> decode ───────────────────

#[test]
fn transfer_end_to_end() {
    let utxos = utxo_set();

    // Selection picks only the confirmed 5 SBER output for a 4.1 target.
    let selection = select_utxos(&utxos, 4.0, 0.1).unwrap();
    assert_eq!(selection.selected.len(), 1);
    assert_eq!(selection.selected[0].hash, utxos[0].hash);

    let hex_tx = build_pubkeyhash_transaction(
        &TEST_KEY,
        &recipient(),
        4.0,
        0.1,
        &utxos,
        SberNetwork::Mainnet,
    )
    .unwrap();

    let tx = decode(&hex_tx);
    assert_eq!(tx.input.len(), 1);
    assert_eq!(tx.input[0].previous_output.vout, 0);
    assert_eq!(tx.output.len(), 2);
    assert_eq!(tx.output[0].value.to_sat(), 40_000_000);
    assert_eq!(tx.output[1].value.to_sat(), 9_000_000);
    assert!(!tx.input[0].script_sig.is_empty());
}

#[test]
fn transfer_spanning_multiple_utxos() {
    let utxos = utxo_set();

    // 7 SBER needs both outputs, confirmed one first.
    let hex_tx = build_pubkeyhash_transaction(
        &TEST_KEY,
        &recipient(),
        7.0,
        0.1,
        &utxos,
        SberNetwork::Mainnet,
    )
    .unwrap();

    let tx = decode(&hex_tx);
    assert_eq!(tx.input.len(), 2);
    assert_eq!(tx.input[0].previous_output.vout, 0);
    assert_eq!(tx.input[1].previous_output.vout, 1);
    assert_eq!(tx.output[0].value.to_sat(), 70_000_000);
    assert_eq!(tx.output[1].value.to_sat(), 9_000_000);
    for input in &tx.input {
        assert!(!input.script_sig.is_empty());
    }
}

// ─── Contracts: gas accounting through the whole stack ─────────────

#[test]
fn create_contract_end_to_end() {
    let utxos = utxo_set();
    let gas = GasParams {
        gas_limit: 250_000,
        gas_price: 40,
    };

    let hex_tx = build_create_contract_transaction(
        &TEST_KEY,
        "606060405260008055",
        gas,
        0.1,
        &utxos,
        SberNetwork::Mainnet,
    )
    .unwrap();

    let tx = decode(&hex_tx);
    // Target = 1_000_000 fee units + 10_000_000 gas units.
    assert_eq!(tx.input.len(), 1);
    assert_eq!(tx.output[0].value.to_sat(), 0);
    assert_eq!(tx.output[1].value.to_sat(), 39_000_000);

    let script = tx.output[0].script_pubkey.as_bytes();
    assert_eq!(script[0], 0x54);
    assert_eq!(*script.last().unwrap(), 0xc1);
}

#[test]
fn call_contract_end_to_end() {
    let utxos = utxo_set();
    let gas = GasParams {
        gas_limit: 250_000,
        gas_price: 40,
    };
    let contract_address = "ff".repeat(20);

    let hex_tx = build_call_contract_transaction(
        &TEST_KEY,
        &contract_address,
        "a9059cbb0000",
        gas,
        0.1,
        &utxos,
        SberNetwork::Mainnet,
    )
    .unwrap();

    let tx = decode(&hex_tx);
    assert_eq!(tx.output[0].value.to_sat(), 0);

    let script = tx.output[0].script_pubkey.as_bytes();
    assert_eq!(script[0], 0x54);
    assert_eq!(*script.last().unwrap(), 0xc2);
    // The 20-byte contract address push sits right before OP_CALL.
    let address_start = script.len() - 1 - 20;
    assert_eq!(&script[address_start..script.len() - 1], &[0xff; 20][..]);
    assert_eq!(script[address_start - 1], 0x14);
}

// ─── Failure propagation through the public API ────────────────────

#[test]
fn insufficient_funds_propagates_unchanged() {
    let utxos = utxo_set();

    let result = build_pubkeyhash_transaction(
        &TEST_KEY,
        &recipient(),
        100.0,
        0.1,
        &utxos,
        SberNetwork::Mainnet,
    );

    match result {
        Err(SberError::InsufficientFunds {
            available,
            required,
        }) => {
            assert_eq!(available, 80_000_000);
            assert_eq!(required, 1_001_000_000);
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }
}

#[test]
fn testnet_round_trip() {
    let utxos = utxo_set();
    let mut payload = vec![SberNetwork::Testnet.params().pubkey_hash];
    payload.extend([0x44; 20]);
    let to = bs58::encode(payload).with_check().into_string();

    let hex_tx = build_pubkeyhash_transaction(
        &TEST_KEY,
        &to,
        2.0,
        0.01,
        &utxos,
        SberNetwork::Testnet,
    )
    .unwrap();

    let tx = decode(&hex_tx);
    assert_eq!(tx.output[0].value.to_sat(), 20_000_000);
}
