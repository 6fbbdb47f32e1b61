//! CLI command implementations.

mod ask;
mod calc;
mod config;
mod doctor;
mod memory;
mod quote;
mod research;

pub use ask::run_ask;
pub use calc::{run_tariff, run_transport};
pub use config::run_config;
pub use doctor::run_doctor;
pub use memory::run_memory;
pub use quote::run_quote;
pub use research::run_research;
