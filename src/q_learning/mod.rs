//! Tabular Q-learning
//!
//! Temporal difference control over a sparse value table. The update
//! bootstraps from the best next-state value (off-policy), so the table
//! converges toward Q* while the policy keeps exploring.
//!
//! ## Usage Example
//!
//! ```no_run
//! use smartcab::q_learning::{EpsilonSchedule, QLearningPolicy};
//!
//! let policy = QLearningPolicy::new(
//!     0.5, // learning_rate
//!     0.2, // discount_factor
//!     9.0, // q_init (optimistic default)
//!     EpsilonSchedule::default(),
//! )
//! .with_seed(42);
//! ```

pub mod agent;
pub mod q_table;

// Public re-exports
pub use agent::{EpsilonSchedule, QLearningPolicy};
pub use q_table::ValueTable;
