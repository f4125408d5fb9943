//! Flag translators
//!
//! Each translator maps the argument vocabulary of a legacy tool onto the
//! vocabulary of a modern replacement (`ls` to `eza`, `grep` to `rg`, ...).
//! Translators are stateless: `translate` is a pure function of the
//! arguments and the dialect mode, and it never fails. Flags a translator
//! does not recognise are forwarded unchanged so the target tool can accept
//! them or report its own usage error.

use std::sync::Arc;

mod args;
pub mod df2duf;
mod dialect;
pub mod dig2doggo;
pub mod du2dust;
pub mod find2fd;
pub mod grep2rg;
pub mod ls2eza;
pub mod ps2procs;
mod registry;

pub use dialect::Dialect;
pub use registry::Registry;

/// Capability shared by every tool-pair translator
pub trait Translator: Send + Sync {
    /// Translator identifier, always `<source>2<target>` (e.g. `ls2eza`)
    fn name(&self) -> &str;

    /// Name of the legacy tool whose flags are accepted (e.g. `ls`)
    fn source_tool(&self) -> &str;

    /// Name of the tool the translated flags are meant for (e.g. `eza`)
    fn target_tool(&self) -> &str;

    /// Translate source tool arguments into target tool arguments
    ///
    /// `mode` selects a dialect where the source tool has several (for
    /// example `bsd` or `gnu` for `ls`). An empty string lets the translator
    /// pick its own default.
    fn translate(&self, args: &[String], mode: &str) -> Vec<String>;

    /// Whether shell init output includes this translator by default
    ///
    /// Translators returning `false` can still be requested explicitly.
    fn include_in_init(&self) -> bool;
}

/// Every translator shipped with reflag
#[must_use]
pub fn builtin() -> Vec<Arc<dyn Translator>> {
    vec![
        Arc::new(df2duf::Df2Duf),
        Arc::new(dig2doggo::Dig2Doggo),
        Arc::new(du2dust::Du2Dust),
        Arc::new(find2fd::Find2Fd),
        Arc::new(grep2rg::Grep2Rg),
        Arc::new(ls2eza::Ls2Eza),
        Arc::new(ps2procs::Ps2Procs),
    ]
}

/// Compose the registry name of a source/target pair
#[must_use]
pub fn pair_name(source: &str, target: &str) -> String {
    format!("{source}2{target}")
}
