//! Output scripts for contract creation and contract calls.
//!
//! A contract output is `OP_4 <gas limit> <gas price> <data...> OP_CREATE`
//! or `OP_4 <gas limit> <gas price> <call data> <contract address> OP_CALL`,
//! where OP_4 is the contract-call version tag and the numeric operands use
//! the script-number encoding from [`crate::script_num`].

use bitcoin::opcodes::all::{OP_PUSHNUM_4, OP_RETURN_193, OP_RETURN_194};
use bitcoin::opcodes::Opcode;
use bitcoin::script::{Builder, PushBytesBuf, ScriptBuf};

use crate::error::SberError;
use crate::script_num::encode_script_int;

/// Contract creation opcode (0xc1). The `bitcoin` crate names this byte
/// slot `OP_RETURN_193`; the contract dialect assigns it OP_CREATE.
pub const OP_CREATE: Opcode = OP_RETURN_193;

/// Contract call opcode (0xc2), byte slot `OP_RETURN_194`.
pub const OP_CALL: Opcode = OP_RETURN_194;

/// Decode a hex string into raw bytes.
///
/// Odd-length input and non-hex digits are both rejected.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, SberError> {
    hex::decode(input).map_err(|e| SberError::MalformedHex(e.to_string()))
}

/// Gas limit and gas price for a contract output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasParams {
    pub gas_limit: u64,
    pub gas_price: u64,
}

/// Build the output script for a create-contract transaction.
///
/// `bytecode_hex` is the contract byte code as a hex string.
pub fn create_contract_script(
    gas: GasParams,
    bytecode_hex: &str,
) -> Result<ScriptBuf, SberError> {
    let builder = gas_prefix(gas)?;
    let builder = push_data(builder, decode_hex(bytecode_hex)?)?;
    Ok(builder.push_opcode(OP_CREATE).into_script())
}

/// Build the output script for a send-to-contract transaction.
///
/// `call_data_hex` is the ABI-encoded call data and `contract_address_hex`
/// the 20-byte target contract address, both as hex strings.
pub fn call_contract_script(
    gas: GasParams,
    call_data_hex: &str,
    contract_address_hex: &str,
) -> Result<ScriptBuf, SberError> {
    let builder = gas_prefix(gas)?;
    let builder = push_data(builder, decode_hex(call_data_hex)?)?;
    let builder = push_data(builder, decode_hex(contract_address_hex)?)?;
    Ok(builder.push_opcode(OP_CALL).into_script())
}

/// Version tag plus gas fields, shared by both script kinds.
fn gas_prefix(gas: GasParams) -> Result<Builder, SberError> {
    let builder = Builder::new().push_opcode(OP_PUSHNUM_4);
    let builder = push_data(builder, encode_script_int(gas.gas_limit as i64))?;
    push_data(builder, gas_price_bytes(gas.gas_price))
}

/// Gas prices of 16 and below carry one extra zero byte after the base
/// encoding. Validators recognize the padded form; it must be preserved.
fn gas_price_bytes(gas_price: u64) -> Vec<u8> {
    let mut bytes = encode_script_int(gas_price as i64);
    if gas_price <= 16 {
        bytes.push(0x00);
    }
    bytes
}

fn push_data(builder: Builder, data: Vec<u8>) -> Result<Builder, SberError> {
    let data = PushBytesBuf::try_from(data)
        .map_err(|e| SberError::TransactionBuildError(format!("script push too large: {e:?}")))?;
    Ok(builder.push_slice(data))
}
