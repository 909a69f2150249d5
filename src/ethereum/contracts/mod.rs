//! Smart contract bindings.

pub mod base;
pub mod counter;

pub use base::ContractBinding;
pub use counter::CounterContract;
