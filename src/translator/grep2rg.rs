//! `grep` to `rg`
//!
//! Most single-letter flags are shared by the two tools. The differences
//! are recursion (always on in `rg`), file selection (`--include` and
//! friends become `-g` globs) and pattern placement: one pattern is
//! emitted positionally, several are emitted as repeated `-e`.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::trace;

use super::args::{extend, short, Arg, ArgCursor, NextArg};
use super::Translator;

#[derive(Debug, Clone, Copy)]
pub struct Grep2Rg;

impl Translator for Grep2Rg {
    fn name(&self) -> &str {
        "grep2rg"
    }

    fn source_tool(&self) -> &str {
        "grep"
    }

    fn target_tool(&self) -> &str {
        "rg"
    }

    fn translate(&self, args: &[String], _mode: &str) -> Vec<String> {
        translate_flags(args)
    }

    fn include_in_init(&self) -> bool {
        true
    }
}

/// Short flags spelled the same in both tools
const PASSTHROUGH_FLAGS: &[char] = &[
    'i', 'v', 'w', 'x', 'c', 'l', 'L', 'n', 'H', 'h', 'o', 'q', 's', 'F', 'P', 'a', 'U',
];

/// Short flags that take a value and keep their spelling
const PASSTHROUGH_WITH_VALUE: &[char] = &['A', 'B', 'C', 'm', 'f'];

/// Recursion, regex flavour and binary handling are rg defaults
const IGNORED_FLAGS: &[char] = &['r', 'R', 'E', 'G', 'I', 'b', 'T', 'd', 'D', 'u'];

static LONG_PASSTHROUGH: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "--color",
        "--colour",
        "--line-number",
        "--with-filename",
        "--no-filename",
        "--count",
        "--files-with-matches",
        "--files-without-match",
        "--only-matching",
        "--quiet",
        "--silent",
        "--invert-match",
        "--word-regexp",
        "--line-regexp",
        "--fixed-strings",
        "--perl-regexp",
        "--text",
        "--binary",
        "--ignore-case",
    ]
    .into_iter()
    .collect()
});

static LONG_IGNORED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "--recursive",
        "--dereference-recursive",
        "--extended-regexp",
        "--basic-regexp",
        "--binary-files",
        "--directories",
        "--devices",
        "--no-messages",
    ]
    .into_iter()
    .collect()
});

/// Long options with a value that rg spells as a short flag
fn short_for_long(name: &str) -> Option<&'static str> {
    match name {
        "--file" => Some("-f"),
        "--max-count" => Some("-m"),
        "--after-context" => Some("-A"),
        "--before-context" => Some("-B"),
        "--context" => Some("-C"),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct RgCommand {
    flags: Vec<String>,
    /// Patterns given with `-e` or `--regexp`
    patterns: Vec<String>,
    /// Positional arguments in order; the first is the pattern when no
    /// other pattern source was given
    operands: Vec<String>,
    /// `-f` reads the patterns from a file
    pattern_file: bool,
}

impl RgCommand {
    /// File selection options become rg globs
    fn glob(&mut self, option: &str, value: &str) {
        let glob = match option {
            "--include" => value.to_string(),
            "--exclude" => format!("!{value}"),
            _ if value.ends_with('/') => format!("!{value}"),
            _ => format!("!{value}/"),
        };
        self.flags.push("-g".to_string());
        self.flags.push(glob);
    }

    fn long_with_value(&mut self, raw: &str, name: &str, value: &str) {
        match name {
            "--include" | "--exclude" | "--exclude-dir" => self.glob(name, value),
            "--regexp" => self.patterns.push(value.to_string()),
            "--label" => self.flags.push(raw.to_string()),
            "--binary-files" if value == "text" => self.flags.push("-a".to_string()),
            _ => {
                if let Some(flag) = short_for_long(name) {
                    self.pattern_file |= flag == "-f";
                    extend(&mut self.flags, &[flag, value]);
                } else if LONG_IGNORED.contains(name) {
                    trace!("Dropping {}", raw);
                } else {
                    // Includes --color=... and options rg understands itself
                    self.flags.push(raw.to_string());
                }
            }
        }
    }

    fn long(&mut self, raw: &str, cursor: &mut ArgCursor<'_>) {
        match raw {
            "--null" | "--null-data" => self.flags.push("-0".to_string()),
            "--include" | "--exclude" | "--exclude-dir" => {
                if let Some(value) = cursor.take_value(NextArg::Always) {
                    self.glob(raw, value);
                }
            }
            "--regexp" => {
                if let Some(value) = cursor.take_value(NextArg::Always) {
                    self.patterns.push(value.to_string());
                }
            }
            "--label" => {
                self.flags.push(raw.to_string());
                if let Some(value) = cursor.take_value(NextArg::Always) {
                    self.flags.push(value.to_string());
                }
            }
            _ => {
                if let Some(flag) = short_for_long(raw) {
                    match cursor.take_value(NextArg::UnlessFlag) {
                        Some(value) => {
                            self.pattern_file |= flag == "-f";
                            extend(&mut self.flags, &[flag, value]);
                        }
                        None => self.flags.push(raw.to_string()),
                    }
                } else if LONG_IGNORED.contains(raw) {
                    trace!("Dropping {}", raw);
                } else {
                    if !LONG_PASSTHROUGH.contains(raw) {
                        trace!("Passing through unknown option {}", raw);
                    }
                    self.flags.push(raw.to_string());
                }
            }
        }
    }

    fn finish(mut self) -> Vec<String> {
        if self.patterns.is_empty() && !self.pattern_file && !self.operands.is_empty() {
            let pattern = self.operands.remove(0);
            self.patterns.push(pattern);
        }

        let mut result = self.flags;
        let mut positional = Vec::with_capacity(self.operands.len() + 1);
        match self.patterns.as_slice() {
            [pattern] if !self.pattern_file => positional.push(pattern.clone()),
            patterns => {
                for pattern in patterns {
                    result.push("-e".to_string());
                    result.push(pattern.clone());
                }
            }
        }
        positional.extend(self.operands);

        if positional.iter().any(|p| needs_separator(p)) {
            result.push("--".to_string());
        }
        result.extend(positional);
        result
    }
}

/// Whether rg would read a positional argument as an option
fn needs_separator(operand: &str) -> bool {
    operand.len() > 1 && operand.starts_with('-')
}

/// Translate `grep` arguments
#[must_use]
pub fn translate_flags(args: &[String]) -> Vec<String> {
    let mut rg = RgCommand::default();
    let mut cursor = ArgCursor::new(args);

    while let Some(arg) = cursor.next() {
        if arg == "--" {
            rg.operands.extend(cursor.take_rest().iter().cloned());
            break;
        }

        match Arg::classify(arg) {
            Arg::Long {
                raw,
                name,
                value: Some(value),
            } => rg.long_with_value(raw, name, value),
            Arg::Long { raw, .. } => rg.long(raw, &mut cursor),
            Arg::Short(mut cluster) => {
                while let Some(c) = cluster.next() {
                    if PASSTHROUGH_FLAGS.contains(&c) {
                        rg.flags.push(short(c));
                    } else if c == 'e' {
                        // A pattern may itself start with a dash
                        if let Some(pattern) = cluster.raw_value(&mut cursor, NextArg::Always) {
                            rg.patterns.push(pattern.to_string());
                        }
                    } else if PASSTHROUGH_WITH_VALUE.contains(&c) {
                        rg.flags.push(short(c));
                        if let Some(value) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                            rg.pattern_file |= c == 'f';
                            rg.flags.push(value.to_string());
                        }
                    } else if c == 'Z' {
                        rg.flags.push("-0".to_string());
                    } else if !IGNORED_FLAGS.contains(&c) {
                        trace!("Passing through unknown flag -{}", c);
                        rg.flags.push(short(c));
                    }
                }
            }
            Arg::Positional(operand) => rg.operands.push(operand.to_string()),
        }
    }

    rg.finish()
}

#[cfg(test)]
mod tests {
    use super::super::args::owned;
    use super::*;

    fn grep(input: &[&str]) -> Vec<String> {
        translate_flags(&owned(input))
    }

    #[test]
    fn test_pattern_and_paths() {
        assert_eq!(grep(&["foo"]), owned(&["foo"]));
        assert_eq!(grep(&["foo", "file.txt"]), owned(&["foo", "file.txt"]));
        assert_eq!(grep(&["foo", "a.txt", "b.txt"]), owned(&["foo", "a.txt", "b.txt"]));
        assert_eq!(grep(&["foo", "-"]), owned(&["foo", "-"]));
    }

    #[test]
    fn test_passthrough_flags() {
        assert_eq!(grep(&["-i", "foo"]), owned(&["-i", "foo"]));
        assert_eq!(grep(&["-inw", "foo"]), owned(&["-i", "-n", "-w", "foo"]));
        assert_eq!(grep(&["-vc", "foo", "f"]), owned(&["-v", "-c", "foo", "f"]));
    }

    #[test]
    fn test_recursive_flags_dropped() {
        assert_eq!(grep(&["-r", "foo", "."]), owned(&["foo", "."]));
        assert_eq!(grep(&["-rn", "foo", "src"]), owned(&["-n", "foo", "src"]));
        assert_eq!(grep(&["-E", "a|b"]), owned(&["a|b"]));
        assert_eq!(grep(&["--recursive", "foo"]), owned(&["foo"]));
    }

    #[test]
    fn test_context_values() {
        assert_eq!(grep(&["-A", "3", "foo"]), owned(&["-A", "3", "foo"]));
        assert_eq!(grep(&["-A3", "foo"]), owned(&["-A", "3", "foo"]));
        assert_eq!(grep(&["-nC2", "foo"]), owned(&["-n", "-C", "2", "foo"]));
        assert_eq!(grep(&["-m", "5", "foo"]), owned(&["-m", "5", "foo"]));
        assert_eq!(grep(&["--context=2", "foo"]), owned(&["-C", "2", "foo"]));
        assert_eq!(grep(&["--max-count", "5", "foo"]), owned(&["-m", "5", "foo"]));
    }

    #[test]
    fn test_multiple_patterns() {
        assert_eq!(grep(&["-e", "foo", "-e", "bar"]), owned(&["-e", "foo", "-e", "bar"]));
        assert_eq!(grep(&["-e", "foo", "file"]), owned(&["foo", "file"]));
        assert_eq!(grep(&["-efoo", "file"]), owned(&["foo", "file"]));
        assert_eq!(
            grep(&["--regexp=foo", "--regexp", "bar", "file"]),
            owned(&["-e", "foo", "-e", "bar", "file"])
        );
    }

    #[test]
    fn test_dash_pattern_is_protected() {
        assert_eq!(grep(&["-e", "-foo", "file"]), owned(&["--", "-foo", "file"]));
    }

    #[test]
    fn test_empty_pattern_is_kept() {
        assert_eq!(grep(&["-e", "", "file"]), owned(&["", "file"]));
        assert_eq!(grep(&["--regexp=", "file"]), owned(&["", "file"]));
        assert_eq!(grep(&["", "file"]), owned(&["", "file"]));
    }

    #[test]
    fn test_double_dash_ends_options() {
        assert_eq!(grep(&["foo", "--", "-file"]), owned(&["--", "foo", "-file"]));
        assert_eq!(grep(&["--", "-foo", "file"]), owned(&["--", "-foo", "file"]));
        assert_eq!(grep(&["-i", "--", "-v"]), owned(&["-i", "--", "-v"]));
        assert_eq!(grep(&["-e", "foo", "--", "-a", "b"]), owned(&["--", "foo", "-a", "b"]));
    }

    #[test]
    fn test_explicit_pattern_makes_operands_paths() {
        assert_eq!(grep(&["file", "-e", "bar"]), owned(&["bar", "file"]));
        assert_eq!(grep(&["a", "-e", "x", "-e", "y"]), owned(&["-e", "x", "-e", "y", "a"]));
        assert_eq!(grep(&["-f", "pats.txt", "file"]), owned(&["-f", "pats.txt", "file"]));
        assert_eq!(grep(&["--file=pats.txt", "a", "b"]), owned(&["-f", "pats.txt", "a", "b"]));
        assert_eq!(
            grep(&["-f", "pats.txt", "-e", "x", "file"]),
            owned(&["-f", "pats.txt", "-e", "x", "file"])
        );
    }

    #[test]
    fn test_file_selection_globs() {
        assert_eq!(grep(&["--include=*.rs", "foo"]), owned(&["-g", "*.rs", "foo"]));
        assert_eq!(grep(&["--include", "*.rs", "foo"]), owned(&["-g", "*.rs", "foo"]));
        assert_eq!(grep(&["--exclude=*.md", "foo"]), owned(&["-g", "!*.md", "foo"]));
        assert_eq!(grep(&["--exclude-dir=target", "foo"]), owned(&["-g", "!target/", "foo"]));
        assert_eq!(grep(&["--exclude-dir", "node_modules/", "foo"]), owned(&["-g", "!node_modules/", "foo"]));
    }

    #[test]
    fn test_null_and_colour() {
        assert_eq!(grep(&["-Z", "foo"]), owned(&["-0", "foo"]));
        assert_eq!(grep(&["--null", "foo"]), owned(&["-0", "foo"]));
        assert_eq!(grep(&["--color=always", "foo"]), owned(&["--color=always", "foo"]));
        assert_eq!(grep(&["--binary-files=text", "foo"]), owned(&["-a", "foo"]));
        assert_eq!(grep(&["--binary-files=without-match", "foo"]), owned(&["foo"]));
    }

    #[test]
    fn test_unknown_passthrough() {
        assert!(grep(&[]).is_empty());
        assert_eq!(grep(&["-y", "foo"]), owned(&["-y", "foo"]));
        assert_eq!(grep(&["--unknown", "foo"]), owned(&["--unknown", "foo"]));
        assert_eq!(grep(&["--unknown=1", "foo"]), owned(&["--unknown=1", "foo"]));
    }
}
