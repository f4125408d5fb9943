//! `ps` to `procs`
//!
//! procs lists every process in a full format by default, so most of the
//! selection and format options of `ps` have nothing to map onto. Options
//! that select processes by user, pid or command become procs search terms.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::trace;

use super::args::{end_of_options, extend, short, Arg, ArgCursor, NextArg};
use super::Translator;

#[derive(Debug, Clone, Copy)]
pub struct Ps2Procs;

impl Translator for Ps2Procs {
    fn name(&self) -> &str {
        "ps2procs"
    }

    fn source_tool(&self) -> &str {
        "ps"
    }

    fn target_tool(&self) -> &str {
        "procs"
    }

    fn translate(&self, args: &[String], _mode: &str) -> Vec<String> {
        translate_flags(args)
    }

    fn include_in_init(&self) -> bool {
        true
    }
}

/// Selection and format letters with no procs counterpart
const IGNORED_SHORT: &[char] = &[
    'e', 'A', 'a', 'x', 'f', 'l', 'j', 'v', 'w', 'r', 'd', 'N', 'T', 's', 'c', 'm', 'L',
];

/// Letters that make a bare word look like a BSD option bundle (`aux`, `ef`)
const COMMON_BSD: &str = "auxef";

const VALID_BSD: &str = "adefghjlmnoprstuvwxAJLMNOPRSTUVWX";

/// `ps` column names and their procs sort keys
static SORT_COLUMNS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("pid", "pid"),
        ("ppid", "ppid"),
        ("uid", "uid"),
        ("user", "user"),
        ("gid", "gid"),
        ("group", "group"),
        ("comm", "command"),
        ("cmd", "command"),
        ("command", "command"),
        ("args", "command"),
        ("%cpu", "cpu"),
        ("pcpu", "cpu"),
        ("cpu", "cpu"),
        ("%mem", "mem"),
        ("pmem", "mem"),
        ("mem", "mem"),
        ("rss", "rss"),
        ("vsz", "vsz"),
        ("vsize", "vsz"),
        ("stat", "state"),
        ("state", "state"),
        ("tty", "tty"),
        ("time", "time"),
        ("etime", "elapsed"),
        ("elapsed", "elapsed"),
        ("nice", "nice"),
        ("ni", "nice"),
        ("pri", "priority"),
        ("priority", "priority"),
        ("start", "start_time"),
        ("stime", "start_time"),
        ("lstart", "start_time"),
    ])
});

/// Translate `ps` arguments
///
/// Search terms always follow the procs options.
#[must_use]
pub fn translate_flags(args: &[String]) -> Vec<String> {
    let mut procs_args = Vec::new();
    let mut search_terms = Vec::new();
    let mut cursor = ArgCursor::new(args);

    while let Some(arg) = cursor.next() {
        if arg == "--" {
            end_of_options(&mut cursor, &mut search_terms);
            break;
        }

        match Arg::classify(arg) {
            Arg::Long {
                raw,
                name,
                value: Some(value),
            } => match name {
                "--sort" => procs_args.extend(sort_key(value)),
                "--user" | "--User" | "--pid" => search_terms.push(value.to_string()),
                _ => {
                    trace!("Passing through unknown option {}", raw);
                    procs_args.push(raw.to_string());
                }
            },
            Arg::Long { raw, .. } => match raw {
                "--forest" => procs_args.push("--tree".to_string()),
                "--headers" | "--no-headers" => {}
                "--sort" => {
                    if let Some(column) = cursor.take_value(NextArg::Always) {
                        procs_args.extend(sort_key(column));
                    }
                }
                _ => {
                    trace!("Passing through unknown option {}", raw);
                    procs_args.push(raw.to_string());
                }
            },
            Arg::Short(mut cluster) => {
                while let Some(c) = cluster.next() {
                    match c {
                        'u' | 'U' | 'p' | 'C' => {
                            if let Some(term) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                search_terms.push(term.to_string());
                            }
                        }
                        // Output format, group and tty values
                        'o' | 'O' | 'G' | 'g' | 't' => {
                            cluster.value(&mut cursor, NextArg::UnlessFlag);
                        }
                        'H' => procs_args.push("--tree".to_string()),
                        _ if IGNORED_SHORT.contains(&c) => {}
                        _ => {
                            trace!("Passing through unknown flag -{}", c);
                            procs_args.push(short(c));
                        }
                    }
                }
            }
            Arg::Positional(word) if is_bsd_bundle(word) => {
                if word.contains('f') {
                    procs_args.push("--tree".to_string());
                }
            }
            Arg::Positional("") => {}
            Arg::Positional(term) => search_terms.push(term.to_string()),
        }
    }

    procs_args.extend(search_terms);
    procs_args
}

/// Whether a bare word is a dashless option bundle such as `aux`
fn is_bsd_bundle(word: &str) -> bool {
    (1..=5).contains(&word.len())
        && word.chars().any(|c| COMMON_BSD.contains(c))
        && word.chars().all(|c| VALID_BSD.contains(c))
}

/// `--sort` key: a leading `-` sorts descending, `+` or nothing ascending
fn sort_key(key: &str) -> Vec<String> {
    let (order, column) = if let Some(column) = key.strip_prefix('-') {
        ("--sortd", column)
    } else {
        ("--sorta", key.strip_prefix('+').unwrap_or(key))
    };

    let column = SORT_COLUMNS
        .get(column.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(column);

    let mut out = Vec::with_capacity(2);
    extend(&mut out, &[order, column]);
    out
}
