//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file                      flat settings map
//!     → loader.rs (deserialize)      → settings.rs (coerce values)
//!                  ↘                ↙
//!              SecureResponseConfig (immutable)
//!     → resolved once per middleware at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; middleware never reload it
//! - All fields have defaults to allow minimal configs
//! - Feature-level `proto_header`/`ignore_paths` fall back to the shared ones

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{CspCoverageConfig, HstsSupportConfig, SecureResponseConfig, SslRedirectConfig};
pub use settings::{SettingValue, DEFAULT_NAMESPACE};
