//! Shell-facing output: quoting, init scripts and the translator table

use std::sync::Arc;

use clap::ValueEnum;
use tracing::debug;

use crate::config::InitConfig;
use crate::translator::{Registry, Translator};

/// Characters that force a token into single quotes
const SPECIAL_CHARS: &[char] = &[' ', '\t', '\n', '"', '\'', '\\', '$', '`', '!'];

/// Shells `--init` can generate functions for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl Shell {
    /// Parse a shell name as written in the config file
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Quote a token so the shell reads it back unchanged
#[must_use]
pub fn quote(token: &str) -> String {
    if token.is_empty() {
        "''".to_string()
    } else if token.contains(SPECIAL_CHARS) {
        format!("'{}'", token.replace('\'', r#"'"'"'"#))
    } else {
        token.to_string()
    }
}

/// Target tool followed by its quoted arguments, ready for `eval`
#[must_use]
pub fn render_command(target: &str, args: &[String]) -> String {
    let mut line = target.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&quote(arg));
    }
    line
}

/// Shell functions that route each source tool through reflag
#[must_use]
pub fn init_script(shell: Shell, translators: &[Arc<dyn Translator>]) -> String {
    let mut script = String::new();

    match shell {
        Shell::Fish => {
            script.push_str("# reflag shell init - add to your ~/.config/fish/config.fish\n\n");
            for t in translators {
                script.push_str(&format!(
                    "function {}\n    eval (reflag {} {} $argv)\nend\n\n",
                    t.source_tool(),
                    t.source_tool(),
                    t.target_tool()
                ));
            }
        }
        Shell::Bash | Shell::Zsh => {
            script.push_str("# reflag shell init - add to your ~/.bashrc or ~/.zshrc\n\n");
            for t in translators {
                script.push_str(&format!(
                    "{}() {{\n    eval \"$(reflag {} {} \"$@\")\"\n}}\n\n",
                    t.source_tool(),
                    t.source_tool(),
                    t.target_tool()
                ));
            }
        }
    }

    debug!("Generated {:?} init for {} translators", shell, translators.len());
    script
}

/// Aligned listing of every registered translator
///
/// `DEFAULT` is the translator's own init preference, `ENABLED` whether the
/// init selection actually includes it.
#[must_use]
pub fn translator_table(registry: &Registry, init: &InitConfig) -> String {
    let header = ["TRANSLATOR", "SOURCE", "TARGET", "DEFAULT", "ENABLED"];
    let yes_no = |b: bool| if b { "yes" } else { "no" };

    let rows: Vec<[String; 5]> = registry
        .translators()
        .iter()
        .map(|t| {
            let default = t.include_in_init();
            [
                t.name().to_string(),
                t.source_tool().to_string(),
                t.target_tool().to_string(),
                yes_no(default).to_string(),
                yes_no(init.selects(t.name(), default)).to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut table = String::new();
    push_row(&mut table, &header, &widths);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&mut table, &cells, &widths);
    }
    table
}

fn push_row(table: &mut String, cells: &[&str], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            table.push_str(cell);
        } else {
            table.push_str(&format!("{cell:<width$}  "));
        }
    }
    table.push('\n');
}
