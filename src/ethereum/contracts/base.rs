//! Generic contract binding over a runtime interface description.

use std::sync::Arc;

use alloy::{
    contract::{ContractInstance, Interface},
    dyn_abi::{DynSolValue, EventExt},
    json_abi::{Event, JsonAbi},
    network::ReceiptResponse as _,
    primitives::Address,
    providers::{DynProvider, Provider},
    rpc::types::{Filter, Log},
};
use futures_util::{stream, StreamExt};
use tokio::sync::Mutex;

use crate::{
    error::{AppError, MemberKind, Result},
    ethereum::{
        abi::format_values,
        subscription::{Subscription, SubscriptionSet},
        ConnectionManager,
    },
    types::{ContractInfo, EventLog, ReceiptSummary, SubmittedTransaction, WriteOutcome},
};

/// A deployed contract paired with its interface and the shared connection.
///
/// Holds a read-only call surface once initialized, plus a write surface when
/// the connection carries a signing identity.
pub struct ContractBinding {
    name: String,
    address: Address,
    abi: JsonAbi,
    connection: Arc<ConnectionManager>,
    reader: Option<ContractInstance<DynProvider>>,
    writer: Option<ContractInstance<DynProvider>>,
    subscriptions: Mutex<SubscriptionSet>,
}

impl ContractBinding {
    /// Create an uninitialized binding.
    pub fn new(
        name: impl Into<String>,
        address: Address,
        abi: JsonAbi,
        connection: Arc<ConnectionManager>,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            abi,
            connection,
            reader: None,
            writer: None,
            subscriptions: Mutex::new(SubscriptionSet::new()),
        }
    }

    /// Fail unless every named function and event exists in the interface.
    pub fn require_members(&self, functions: &[&str], events: &[&str]) -> Result<()> {
        functions.iter().try_for_each(|name| self.ensure_function(name))?;
        events.iter().try_for_each(|name| self.event(name).map(|_| ()))
    }

    /// Bind the interface to the address using the initialized connection.
    ///
    /// Derives the write surface when a signing identity is available.
    pub fn initialize(&mut self) -> Result<()> {
        let provider = self.connection.connection().map_err(|e| {
            tracing::error!(contract = %self.name, error = %e, "Failed to initialize contract");
            e
        })?;
        self.reader = Some(self.instance(provider.clone()));

        self.writer = match self.connection.signer_connection() {
            Ok(provider) => Some(self.instance(provider.clone())),
            Err(AppError::NoSigningIdentity) => {
                tracing::info!(
                    contract = %self.name,
                    "Signer not available - only read operations allowed"
                );
                None
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            contract = %self.name,
            address = %self.address,
            writable = self.writer.is_some(),
            "Contract initialized"
        );

        Ok(())
    }

    /// Invoke a side-effect-free method and return its decoded outputs.
    pub async fn read(&self, method: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        self.ensure_function(method)?;
        let contract = self.reader.as_ref().ok_or_else(|| self.not_initialized())?;
        let rendered = format_values(args);

        let call = contract.function(method, args).map_err(|e| self.abi_error(method, e))?;
        let result = call.call().await.map_err(|e| {
            tracing::error!(contract = %self.name, method, error = %e, "Read call failed");
            AppError::remote_call(&self.name, method, rendered.clone(), e)
        })?;

        tracing::info!(
            "{}.{}({}) = {}",
            self.name,
            method,
            rendered.join(", "),
            format_values(&result).join(", ")
        );

        Ok(result)
    }

    /// Like [`ContractBinding::read`], collapsing the outputs into one value.
    ///
    /// A single output is returned as-is; zero or several become a tuple.
    pub async fn read_value(&self, method: &str, args: &[DynSolValue]) -> Result<DynSolValue> {
        let mut values = self.read(method, args).await?;
        if values.len() == 1 {
            Ok(values.remove(0))
        } else {
            Ok(DynSolValue::Tuple(values))
        }
    }

    /// Send a state-changing call and wait for its receipt.
    ///
    /// A transaction that is mined but reverts fails with
    /// [`AppError::RemoteCall`].
    pub async fn write(&self, method: &str, args: &[DynSolValue]) -> Result<WriteOutcome> {
        if !self.connection.has_signing_identity() {
            return Err(AppError::NoSigningIdentity);
        }
        self.ensure_function(method)?;
        let contract = self.writer.as_ref().ok_or_else(|| self.not_initialized())?;
        let from = self.connection.address()?;
        let gas = self.connection.gas();
        let rendered = format_values(args);

        tracing::info!("Sending transaction: {}.{}({})", self.name, method, rendered.join(", "));

        let remote = |e: Box<dyn std::error::Error + Send + Sync>| {
            tracing::error!(contract = %self.name, method, error = %e, "Write call failed");
            AppError::remote_call(&self.name, method, rendered.clone(), e)
        };

        let pending = contract
            .function(method, args)
            .map_err(|e| self.abi_error(method, e))?
            .from(from)
            .gas(gas.limit)
            .gas_price(gas.price)
            .send()
            .await
            .map_err(|e| remote(e.into()))?;

        let hash = *pending.tx_hash();
        tracing::info!(tx_hash = %hash, "Transaction sent");

        let receipt = pending.get_receipt().await.map_err(|e| remote(e.into()))?;
        let receipt = check_receipt(
            &self.name,
            method,
            &rendered,
            ReceiptSummary {
                transaction_hash: receipt.transaction_hash,
                block_number: receipt.block_number,
                gas_used: receipt.gas_used,
                effective_gas_price: receipt.effective_gas_price,
                status: receipt.status(),
            },
        )?;

        tracing::info!(
            tx_hash = %hash,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "Transaction confirmed"
        );

        Ok(WriteOutcome {
            transaction: SubmittedTransaction {
                hash,
                from,
                to: self.address,
                method: method.to_string(),
                args: rendered,
            },
            receipt,
        })
    }

    /// Deliver every `event_name` log emitted by this contract to `callback`.
    ///
    /// Logs arrive in the node's block/log order. Missed logs are not replayed.
    pub async fn listen_to_event<F>(&self, event_name: &str, callback: F) -> Result<Subscription>
    where
        F: Fn(EventLog) + Send + Sync + 'static,
    {
        let event = self.event(event_name)?.clone();
        let provider = self.reader.as_ref().ok_or_else(|| self.not_initialized())?.provider();

        let mut filter = Filter::new().address(self.address);
        if !event.anonymous {
            filter = filter.event_signature(event.selector());
        }

        let poller = provider
            .watch_logs(&filter)
            .await
            .map_err(|e| {
                tracing::error!(contract = %self.name, event = event_name, error = %e, "Failed to listen to event");
                AppError::remote_call(&self.name, event_name, vec![], e)
            })?
            .with_poll_interval(self.connection.poll_interval());

        let contract = self.name.clone();
        let task = tokio::spawn(async move {
            let logs = poller.into_stream().flat_map(stream::iter);
            futures_util::pin_mut!(logs);
            while let Some(log) = logs.next().await {
                match decode_event(&event, &log) {
                    Ok(decoded) => callback(decoded),
                    Err(e) => {
                        tracing::warn!(contract = %contract, event = %event.name, error = %e, "Skipping undecodable log")
                    }
                }
            }
        });

        let subscription = Subscription::new(event_name, &task);
        self.subscriptions.lock().await.insert(subscription.clone());

        tracing::info!(contract = %self.name, event = event_name, "Listening for event");

        Ok(subscription)
    }

    /// Cancel the registrations for `event_name`, or all of them if `None`.
    ///
    /// Returns how many active registrations were cancelled.
    pub async fn stop_listening(&self, event_name: Option<&str>) -> usize {
        let mut subscriptions = self.subscriptions.lock().await;
        let cancelled = match event_name {
            Some(name) => subscriptions.cancel(name),
            None => subscriptions.cancel_all(),
        };

        tracing::info!(
            contract = %self.name,
            event = event_name.unwrap_or("*"),
            cancelled,
            "Stopped listening"
        );

        cancelled
    }

    /// Name, address and write capability.
    pub fn contract_info(&self) -> ContractInfo {
        ContractInfo {
            name: self.name.clone(),
            address: self.address,
            has_signer: self.writer.is_some(),
        }
    }

    /// Contract name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Interface description.
    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// Whether [`ContractBinding::initialize`] has run.
    pub fn is_initialized(&self) -> bool {
        self.reader.is_some()
    }

    fn instance(&self, provider: DynProvider) -> ContractInstance<DynProvider> {
        ContractInstance::new(self.address, provider, Interface::new(self.abi.clone()))
    }

    fn ensure_function(&self, name: &str) -> Result<()> {
        match self.abi.function(name) {
            Some(_) => Ok(()),
            None => Err(self.unknown(MemberKind::Function, name)),
        }
    }

    fn event(&self, name: &str) -> Result<&Event> {
        self.abi
            .event(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| self.unknown(MemberKind::Event, name))
    }

    fn unknown(&self, kind: MemberKind, name: &str) -> AppError {
        AppError::UnknownMember { contract: self.name.clone(), kind, name: name.to_string() }
    }

    fn not_initialized(&self) -> AppError {
        AppError::NotInitialized { component: "contract binding" }
    }

    fn abi_error(&self, method: &str, err: alloy::contract::Error) -> AppError {
        AppError::Abi(format!("{}.{}: {}", self.name, method, err))
    }
}

impl std::fmt::Debug for ContractBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractBinding")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("initialized", &self.is_initialized())
            .field("writable", &self.writer.is_some())
            .finish()
    }
}

/// Turn a failed-status receipt into [`AppError::RemoteCall`].
fn check_receipt(
    contract: &str,
    method: &str,
    args: &[String],
    receipt: ReceiptSummary,
) -> Result<ReceiptSummary> {
    if receipt.status {
        return Ok(receipt);
    }

    let block = receipt.block_number.map(|b| b.to_string()).unwrap_or_default();
    tracing::error!(
        contract,
        method,
        tx_hash = %receipt.transaction_hash,
        block = %block,
        "Transaction reverted"
    );
    Err(AppError::remote_call(
        contract,
        method,
        args.to_vec(),
        format!("transaction {} reverted in block {}", receipt.transaction_hash, block),
    ))
}

/// Decode a log into its parameters, restoring declaration order.
fn decode_event(event: &Event, log: &Log) -> std::result::Result<EventLog, alloy::dyn_abi::Error> {
    let decoded = event.decode_log(log.data())?;
    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();

    let values = event
        .inputs
        .iter()
        .filter_map(|input| if input.indexed { indexed.next() } else { body.next() })
        .collect();

    Ok(EventLog {
        event: event.name.clone(),
        values,
        block_number: log.block_number,
        transaction_hash: log.transaction_hash,
        log_index: log.log_index,
    })
}
