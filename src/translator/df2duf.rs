//! `df` to `duf`
//!
//! `duf` renders its own human-readable table, so size units, block sizes
//! and output-format options are dropped. Filesystem selection maps onto
//! duf's `-only`/`-hide` filters. `-T` lists types on GNU `df` but filters
//! by type on BSD `df`, so the mode string picks the meaning.

use tracing::trace;

use super::args::{end_of_options, extend, short, Arg, ArgCursor, NextArg};
use super::{Dialect, Translator};

#[derive(Debug, Clone, Copy)]
pub struct Df2Duf;

impl Translator for Df2Duf {
    fn name(&self) -> &str {
        "df2duf"
    }

    fn source_tool(&self) -> &str {
        "df"
    }

    fn target_tool(&self) -> &str {
        "duf"
    }

    fn translate(&self, args: &[String], mode: &str) -> Vec<String> {
        translate_flags(args, Dialect::from_mode(mode))
    }

    fn include_in_init(&self) -> bool {
        false
    }
}

/// Size, format and sync options duf has no use for
const IGNORED_LONG: &[&str] = &[
    "--human-readable",
    "--si",
    "--block-size",
    "--total",
    "--print-type",
    "--portability",
    "--output",
    "--sync",
    "--no-sync",
];

const IGNORED_SHORT: &[char] = &['h', 'H', 'k', 'm', 'g', 'b', 'P', 'c', 'n', 'Y'];

/// Translate `df` arguments for the given dialect
#[must_use]
pub fn translate_flags(args: &[String], dialect: Dialect) -> Vec<String> {
    let mut duf_args = Vec::new();
    let mut paths = Vec::new();
    let mut cursor = ArgCursor::new(args);

    while let Some(arg) = cursor.next() {
        if arg == "--" {
            end_of_options(&mut cursor, &mut paths);
            break;
        }

        match Arg::classify(arg) {
            Arg::Long {
                raw,
                name,
                value: Some(value),
            } => match name {
                "--type" => extend(&mut duf_args, &["-only-fs", value]),
                "--exclude-type" => extend(&mut duf_args, &["-hide-fs", value]),
                "--exclude" => extend(&mut duf_args, &["-hide-mp", value]),
                _ if IGNORED_LONG.contains(&name) => trace!("Dropping {}", raw),
                _ => {
                    trace!("Passing through unknown option {}", raw);
                    duf_args.push(raw.to_string());
                }
            },
            Arg::Long { raw, .. } => match raw {
                "--all" => duf_args.push("-all".to_string()),
                "--inodes" => duf_args.push("-inodes".to_string()),
                "--local" => extend(&mut duf_args, &["-only", "local"]),
                "--type" | "--exclude-type" => {
                    if let Some(value) = cursor.take_value(NextArg::UnlessFlag) {
                        let filter = if raw == "--type" { "-only-fs" } else { "-hide-fs" };
                        extend(&mut duf_args, &[filter, value]);
                    }
                }
                _ if IGNORED_LONG.contains(&raw) => trace!("Dropping {}", raw),
                _ => {
                    trace!("Passing through unknown option {}", raw);
                    duf_args.push(raw.to_string());
                }
            },
            Arg::Short(mut cluster) => {
                while let Some(c) = cluster.next() {
                    match (c, dialect) {
                        ('a', _) => duf_args.push("-all".to_string()),
                        ('i', _) => duf_args.push("-inodes".to_string()),
                        ('l', _) => extend(&mut duf_args, &["-only", "local"]),
                        ('t', _) | ('T', Dialect::Bsd) => {
                            if let Some(types) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                extend(&mut duf_args, &["-only-fs", types]);
                            }
                        }
                        ('x', _) => {
                            if let Some(types) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                extend(&mut duf_args, &["-hide-fs", types]);
                            }
                        }
                        ('I', _) => {
                            if let Some(mount) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                extend(&mut duf_args, &["-hide-mp", mount]);
                            }
                        }
                        // Block size value
                        ('B', _) => {
                            cluster.value(&mut cursor, NextArg::UnlessFlag);
                        }
                        // duf always prints the filesystem type
                        ('T', Dialect::Gnu) => {}
                        _ if IGNORED_SHORT.contains(&c) => {}
                        _ => {
                            trace!("Passing through unknown flag -{}", c);
                            duf_args.push(short(c));
                        }
                    }
                }
            }
            Arg::Positional(path) => paths.push(path.to_string()),
        }
    }

    duf_args.extend(paths);
    duf_args
}
