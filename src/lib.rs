pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::SplitError;
pub use crate::core::estimator::Estimator;
pub use crate::core::models::{BalanceMap, ParticipantRecord, TransferInstruction};
pub use crate::core::resolver::{Resolution, Strategy, resolve_balances};
pub use crate::core::services::SplitService;
pub use crate::core::settlement::settle;

#[cfg(test)]
mod tests; // Include integration tests
