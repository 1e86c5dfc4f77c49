//! Kernel utilities shared across Portico crates.
//! Keep this crate lightweight; today it owns layered configuration loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use portico_kernel::config::load_binding_config;
//!
//! let cfg = load_binding_config(Some("portico.toml")).unwrap();
//! let options = cfg.options_for("User");
//! # let _ = options;
//! ```
pub mod config;

pub use portico_domain as domain;
