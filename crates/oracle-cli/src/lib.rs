pub mod config;
pub mod error;
pub mod query;

pub use config::{create_example_config, AdapterMode, OracleConfig};
pub use error::{CliError, CliResult};
pub use query::{Query, TwapReport};
