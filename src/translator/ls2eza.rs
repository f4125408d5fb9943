//! `ls` to `eza`
//!
//! `ls` and `eza` order time and size sorts in opposite directions, so the
//! translator tracks whether the chosen sort key flips the default and
//! whether the user asked for `-r`, and emits `--reverse` when exactly one
//! of the two holds. A few letters mean different things on BSD and GNU
//! `ls`; the mode string picks the dialect.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::trace;

use super::args::{dedup, end_of_options, extend, short, Arg, ArgCursor, NextArg};
use super::{Dialect, Translator};

#[derive(Debug, Clone, Copy)]
pub struct Ls2Eza;

impl Translator for Ls2Eza {
    fn name(&self) -> &str {
        "ls2eza"
    }

    fn source_tool(&self) -> &str {
        "ls"
    }

    fn target_tool(&self) -> &str {
        "eza"
    }

    fn translate(&self, args: &[String], mode: &str) -> Vec<String> {
        translate_flags(args, Dialect::from_mode(mode))
    }

    fn include_in_init(&self) -> bool {
        true
    }
}

/// Sort keys `eza` orders opposite to `ls`
const REVERSED_SORTS: &[char] = &['t', 'S', 'c', 'u', 'U'];

static FLAG_MAP: Lazy<HashMap<char, &'static [&'static str]>> = Lazy::new(|| {
    let mut m: HashMap<char, &'static [&'static str]> = HashMap::new();

    // Display format
    m.insert('l', &["-l"]);
    m.insert('1', &["-1"]);
    m.insert('C', &["--grid"]);
    m.insert('x', &["--across"]);
    m.insert('m', &["--oneline"]);

    // Entry selection
    m.insert('a', &["-a"]);
    m.insert('A', &["-A"]);
    m.insert('d', &["-d"]);
    m.insert('R', &["--recurse"]);

    // Sorting
    m.insert('t', &["--sort=modified"]);
    m.insert('S', &["--sort=size"]);
    m.insert('c', &["--sort=changed"]);
    m.insert('u', &["--sort=accessed"]);
    m.insert('U', &["--sort=created"]);
    m.insert('f', &["--sort=none", "-a"]);
    m.insert('v', &["--sort=name"]);

    // Sizes; eza is human-readable already
    m.insert('h', &[]);
    m.insert('k', &[]);
    m.insert('s', &["--blocksize"]);

    // Indicators
    m.insert('F', &["-F"]);
    m.insert('p', &["--classify"]);

    // Long format details
    m.insert('i', &["--inode"]);
    m.insert('n', &["--numeric"]);
    m.insert('o', &["-l", "--no-group"]);
    m.insert('g', &["-l", "--no-user"]);
    m.insert('O', &["--flags"]);
    m.insert('e', &[]);
    m.insert('@', &["--extended"]);

    // Symlinks
    m.insert('L', &["-X"]);
    m.insert('H', &["-X"]);
    m.insert('P', &[]);

    // Colour is on by default in eza
    m.insert('G', &[]);

    // Name escaping and BSD display tweaks with no eza counterpart
    m.insert('q', &[]);
    m.insert('b', &[]);
    m.insert('B', &[]);
    m.insert('W', &[]);
    m.insert('Q', &[]);

    m.insert('Z', &["-Z"]);
    m.insert('N', &["--no-quotes"]);

    m
});

static LONG_FLAG_MAP: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    m.insert("--all", &["-a"]);
    m.insert("--almost-all", &["-A"]);
    m.insert("--directory", &["-d"]);
    m.insert("--recursive", &["--recurse"]);
    m.insert("--human-readable", &[]);
    m.insert("--inode", &["--inode"]);
    m.insert("--numeric-uid-gid", &["--numeric"]);
    m.insert("--classify", &["-F"]);
    m.insert("--file-type", &["--classify"]);
    m.insert("--dereference", &["-X"]);
    m.insert("--no-group", &["--no-group"]);
    m.insert("--group-directories-first", &["--group-directories-first"]);
    m.insert("--size", &["--blocksize"]);
    m.insert("--context", &["-Z"]);
    m.insert("--literal", &["--no-quotes"]);
    m.insert("--hyperlink", &["--hyperlink"]);
    m.insert("--full-time", &["-l", "--time-style=full-iso"]);
    for ignored in [
        "--quote-name",
        "--hide-control-chars",
        "--show-control-chars",
        "--author",
        "--escape",
        "--ignore-backups",
        "--kibibytes",
        "--si",
        "--dired",
        "--zero",
    ] {
        m.insert(ignored, &[]);
    }
    m
});

/// What to do with a long option matched by prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrefixAction {
    Pass,
    Drop,
}

/// Long options carrying `=value`, matched by prefix in order
const LONG_PREFIXES: &[(&str, PrefixAction)] = &[
    ("--color", PrefixAction::Pass),
    ("--colour", PrefixAction::Pass),
    ("--sort=", PrefixAction::Pass),
    ("--time=", PrefixAction::Pass),
    ("--time-style=", PrefixAction::Pass),
    ("--hyperlink=", PrefixAction::Pass),
    ("--width=", PrefixAction::Pass),
    ("--ignore=", PrefixAction::Pass),
    ("--hide=", PrefixAction::Drop),
    ("--block-size=", PrefixAction::Drop),
    ("--indicator-style=", PrefixAction::Drop),
    ("--quoting-style=", PrefixAction::Drop),
    ("--tabsize=", PrefixAction::Drop),
];

/// Translate `ls` arguments for the given dialect
#[must_use]
pub fn translate_flags(args: &[String], dialect: Dialect) -> Vec<String> {
    let mut eza_args = Vec::new();
    let mut paths = Vec::new();
    let mut user_reverse = false;
    let mut needs_reverse = false;

    let mut cursor = ArgCursor::new(args);
    while let Some(arg) = cursor.next() {
        if arg == "--" {
            end_of_options(&mut cursor, &mut paths);
            break;
        }

        match Arg::classify(arg) {
            Arg::Long { raw, .. } => {
                if raw == "--reverse" {
                    user_reverse = true;
                    continue;
                }

                if let Some((prefix, action)) = LONG_PREFIXES
                    .iter()
                    .find(|(prefix, _)| raw.starts_with(prefix))
                {
                    if *action == PrefixAction::Pass {
                        match raw.strip_prefix("--ignore=") {
                            Some(pattern) => eza_args.push(format!("--ignore-glob={pattern}")),
                            None => eza_args.push(raw.to_string()),
                        }
                    } else {
                        trace!("Dropping {} (matched {})", raw, prefix);
                    }
                    continue;
                }

                match LONG_FLAG_MAP.get(raw) {
                    Some(mapped) => extend(&mut eza_args, mapped),
                    None => {
                        trace!("Passing through unknown option {}", raw);
                        eza_args.push(raw.to_string());
                    }
                }
            }
            Arg::Short(mut cluster) => {
                while let Some(c) = cluster.next() {
                    match (c, dialect) {
                        ('r', _) => user_reverse = true,
                        ('D', Dialect::Bsd) => {
                            if let Some(format) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                eza_args.push(format!("--time-style=+{format}"));
                            }
                        }
                        ('I', Dialect::Gnu) => {
                            if let Some(pattern) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                eza_args.push(format!("--ignore-glob={pattern}"));
                            }
                        }
                        ('w', Dialect::Gnu) => {
                            if let Some(width) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                eza_args.push(format!("--width={width}"));
                            }
                        }
                        ('T', Dialect::Bsd) => eza_args.push("--time-style=full-iso".to_string()),
                        // GNU tab size; eza has no tabs
                        ('T', Dialect::Gnu) => {
                            cluster.value(&mut cursor, NextArg::UnlessFlag);
                        }
                        ('X', Dialect::Gnu) => eza_args.push("--sort=extension".to_string()),
                        ('D' | 'I' | 'w' | 'X', _) => {}
                        _ => {
                            if REVERSED_SORTS.contains(&c) {
                                needs_reverse = true;
                            }
                            match FLAG_MAP.get(&c) {
                                Some(mapped) => extend(&mut eza_args, mapped),
                                None => {
                                    trace!("Passing through unknown flag -{}", c);
                                    eza_args.push(short(c));
                                }
                            }
                        }
                    }
                }
            }
            Arg::Positional(path) => paths.push(path.to_string()),
        }
    }

    if needs_reverse != user_reverse {
        eza_args.push("--reverse".to_string());
    }

    let mut result = dedup(eza_args);
    result.extend(paths);
    result
}
