pub mod equal_split;
pub mod reconciliation;

pub use equal_split::{equal_split, is_equal_share};
pub use reconciliation::reconcile;
