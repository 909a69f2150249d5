//! Network, contract, transaction and event descriptors.

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, TxHash},
};
use serde::Serialize;

/// Metadata of the connected network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    /// Display name (`"unknown"` if the chain ID matches no known network).
    pub name: String,
    /// Chain ID reported by the node.
    pub chain_id: u64,
    /// Latest block height.
    pub block_number: u64,
}

/// Summary of a contract binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractInfo {
    /// Logical contract name.
    pub name: String,
    /// Deployed address.
    pub address: Address,
    /// Whether a write-capable binding exists.
    pub has_signer: bool,
}

/// A transaction accepted by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedTransaction {
    /// Transaction hash.
    pub hash: TxHash,
    /// Sender address.
    pub from: Address,
    /// Contract address.
    pub to: Address,
    /// Invoked method.
    pub method: String,
    /// Call arguments as rendered values.
    pub args: Vec<String>,
}

/// Outcome of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptSummary {
    /// Transaction hash.
    pub transaction_hash: TxHash,
    /// Block the transaction was included in.
    pub block_number: Option<u64>,
    /// Gas consumed.
    pub gas_used: u64,
    /// Effective gas price in wei.
    pub effective_gas_price: u128,
    /// Whether execution succeeded.
    pub status: bool,
}

/// Result of a state-changing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    /// The submitted transaction.
    pub transaction: SubmittedTransaction,
    /// Its inclusion receipt.
    pub receipt: ReceiptSummary,
}

/// A decoded contract event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog {
    /// Event name.
    pub event: String,
    /// Event parameters in declaration order.
    pub values: Vec<DynSolValue>,
    /// Block containing the log.
    pub block_number: Option<u64>,
    /// Transaction that emitted the log.
    pub transaction_hash: Option<TxHash>,
    /// Position of the log within its block.
    pub log_index: Option<u64>,
}
