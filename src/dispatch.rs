//! Choosing a translator and its mode for one invocation

use std::sync::Arc;

use tracing::debug;

use crate::config::{Config, InitConfig};
use crate::error::ReflagError;
use crate::shell::render_command;
use crate::translator::{Registry, Translator};

/// Split a binary name such as `ls2eza` into its source and target tools
///
/// Only the first `2` separates them, so `ls2eza2foo` targets `eza2foo`.
#[must_use]
pub fn split_binary_name(name: &str) -> Option<(&str, &str)> {
    match name.split_once('2') {
        Some((source, target)) if !source.is_empty() && !target.is_empty() => {
            Some((source, target))
        }
        _ => None,
    }
}

/// Resolve the translator a symlinked binary stands for
pub fn from_binary_name(
    registry: &Registry,
    binary: &str,
) -> Result<Arc<dyn Translator>, ReflagError> {
    let (source, target) = split_binary_name(binary)
        .ok_or_else(|| ReflagError::InvalidBinaryName(binary.to_string()))?;
    lookup(registry, source, target)
}

/// Resolve the translator for an explicit source/target pair
pub fn lookup(
    registry: &Registry,
    source: &str,
    target: &str,
) -> Result<Arc<dyn Translator>, ReflagError> {
    registry
        .get(source, target)
        .ok_or_else(|| ReflagError::UnknownPair {
            source_tool: source.to_string(),
            target_tool: target.to_string(),
        })
}

/// Environment variable that overrides a translator's mode
#[must_use]
pub fn mode_env_var(translator: &str) -> String {
    format!("REFLAG_{}_MODE", translator.to_ascii_uppercase())
}

/// Mode for a translator: command line, then environment, then config
///
/// An empty result lets the translator detect its own default.
#[must_use]
pub fn resolve_mode(translator: &str, flag: Option<&str>, config: &Config) -> String {
    let env = std::env::var(mode_env_var(translator)).ok();
    pick_mode(flag, env.as_deref(), config.mode_for(translator))
}

fn pick_mode(flag: Option<&str>, env: Option<&str>, config: Option<&str>) -> String {
    [flag, env, config]
        .into_iter()
        .flatten()
        .find(|mode| !mode.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Translate `args` and render the resulting command line
#[must_use]
pub fn run(translator: &dyn Translator, args: &[String], mode: &str) -> String {
    debug!("Translating with {} (mode {:?}): {:?}", translator.name(), mode, args);
    let translated = translator.translate(args, mode);
    render_command(translator.target_tool(), &translated)
}

/// Translators selected for shell init output
///
/// `extra` names come from `--include` and are added to the config's list.
#[must_use]
pub fn init_selection(
    registry: &Registry,
    init: &InitConfig,
    extra: &[String],
) -> Vec<Arc<dyn Translator>> {
    let mut init = init.clone();
    init.include.extend_from_slice(extra);
    registry
        .translators()
        .into_iter()
        .filter(|t| init.selects(t.name(), t.include_in_init()))
        .collect()
}
