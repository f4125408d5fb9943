//! reflag - translate command-line flags between tools
//!
//! This library maps the flags of classic Unix tools onto the flags of their
//! modern replacements, so `ls -ltr` can run as `eza -l --sort=modified`.
//!
//! # Modules
//!
//! - [`translator`]: The translator trait, the registry and the built-in translators
//! - [`dispatch`]: Translator lookup, mode resolution and command rendering
//! - [`shell`]: Shell quoting, init scripts and the translator table
//! - [`config`]: Configuration management and serialization
//! - [`error`]: Errors raised while resolving a translator

pub mod config;
pub mod dispatch;
pub mod error;
pub mod shell;
pub mod translator;

pub use error::ReflagError;
pub use translator::{Registry, Translator};
