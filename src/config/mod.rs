//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, default resolution)
//!     → Vec<Arc<EndpointSpec>> + RetryPolicy (validated, immutable)
//!     → handed to the monitor engine
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the engine never re-reads it
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, ConfigError};
pub use schema::{EndpointConfig, LoggingConfig, MonitorConfig, MonitorSettings};
pub use validation::{resolve_endpoints, retry_policy, validate_config, ValidationError};
