//! Banking module for entity validation, account ledgers and state management.
mod account;
mod check_digit;
mod customer;
mod institution;
mod movement;
mod seed;
mod state;
mod store;
mod transaction;
mod types;
mod validation;

pub use account::*;
pub use customer::*;
pub use institution::*;
pub use movement::*;
pub use seed::*;
pub use state::*;
pub use store::*;
pub use transaction::*;
pub use types::*;
pub use validation::*;
