pub mod balance;
pub mod participant;
pub mod settlement;

pub use balance::BalanceMap;
pub use participant::{FeatureVector, ParticipantRecord};
pub use settlement::TransferInstruction;
