pub mod config;
pub mod error;

pub use config::{config, set_config, SimulationConfig};
pub use error::{Result, SimError};
