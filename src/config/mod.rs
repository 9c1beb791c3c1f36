//! Engine configuration.
//!
//! This module provides the engine's configuration types and a loader for
//! reading them from a YAML file: the record-store table names and the
//! paging policy for punch retrieval.
//!
//! # Example
//!
//! ```no_run
//! use pay_period_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Punch table: {}", loader.config().tables.punches);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, PagingConfig, TableConfig};
