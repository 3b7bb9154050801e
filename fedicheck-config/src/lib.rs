// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # Fedicheck Config
//!
//! Where to find the instance under test and how to sign in as its admin.
//!
//! ```yaml
//! environment:
//!   base_url: "http://localhost:3000"
//!   timeout_secs: 30
//! admin:
//!   username: "admin@localhost"
//!   password: "mastodonadmin"
//! ```
//!
//! ## Lookup order
//!
//! 1. An explicit path (the CLI's `--config`)
//! 2. The `FEDICHECK_CONFIG` environment variable
//! 3. `<config dir>/fedicheck/config.yaml`
//! 4. Built-in defaults
//!
//! `FEDICHECK_BASE_URL`, `FEDICHECK_ADMIN_USERNAME` and
//! `FEDICHECK_ADMIN_PASSWORD` override whatever was loaded.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, AdminConfig, Config, EnvironmentConfig, ADMIN_PASSWORD_ENV,
    ADMIN_USERNAME_ENV, BASE_URL_ENV, CONFIG_PATH_ENV,
};
pub use error::ConfigError;
