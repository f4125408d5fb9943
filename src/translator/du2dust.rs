//! `du` to `dust`

use tracing::trace;

use super::args::{end_of_options, extend, short, Arg, ArgCursor, NextArg};
use super::Translator;

#[derive(Debug, Clone, Copy)]
pub struct Du2Dust;

impl Translator for Du2Dust {
    fn name(&self) -> &str {
        "du2dust"
    }

    fn source_tool(&self) -> &str {
        "du"
    }

    fn target_tool(&self) -> &str {
        "dust"
    }

    fn translate(&self, args: &[String], _mode: &str) -> Vec<String> {
        translate_flags(args)
    }

    fn include_in_init(&self) -> bool {
        true
    }
}

/// Long options dust already does by default or cannot express
const IGNORED_LONG: &[&str] = &[
    "--human-readable",
    "--total",
    "--no-dereference",
    "--count-links",
    "--separate-dirs",
    "--time",
    "--time-style",
    "--null",
    "--dereference-args",
];

fn long_flag(name: &str) -> Option<&'static [&'static str]> {
    let mapped: &'static [&'static str] = match name {
        "--summarize" => &["-d", "0"],
        "--all" => &["-F"],
        "--dereference" => &["-L"],
        "--one-file-system" => &["-x"],
        "--apparent-size" => &["-s"],
        "--si" => &["-o", "si"],
        "--bytes" => &["-o", "b"],
        "--inodes" => &["-f"],
        _ => return None,
    };
    Some(mapped)
}

/// Translate `du` arguments
#[must_use]
pub fn translate_flags(args: &[String]) -> Vec<String> {
    let mut dust_args = Vec::new();
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
                "--max-depth" => extend(&mut dust_args, &["-d", value]),
                "--exclude" => extend(&mut dust_args, &["-v", value]),
                "--threshold" => extend(&mut dust_args, &["-z", value]),
                "--block-size" => extend(&mut dust_args, block_size(value)),
                "--time" | "--time-style" | "--exclude-from" => trace!("Dropping {}", raw),
                _ => {
                    trace!("Passing through unknown option {}", raw);
                    dust_args.push(raw.to_string());
                }
            },
            Arg::Long { raw, .. } => {
                if let Some(mapped) = long_flag(raw) {
                    extend(&mut dust_args, mapped);
                } else if !IGNORED_LONG.contains(&raw) {
                    trace!("Passing through unknown option {}", raw);
                    dust_args.push(raw.to_string());
                }
            }
            Arg::Short(mut cluster) => {
                while let Some(c) = cluster.next() {
                    match c {
                        's' => extend(&mut dust_args, &["-d", "0"]),
                        'a' => dust_args.push("-F".to_string()),
                        'L' => dust_args.push("-L".to_string()),
                        'x' => dust_args.push("-x".to_string()),
                        'b' => extend(&mut dust_args, &["-o", "b"]),
                        'k' => extend(&mut dust_args, &["-o", "kb"]),
                        'm' => extend(&mut dust_args, &["-o", "mb"]),
                        'g' => extend(&mut dust_args, &["-o", "gb"]),
                        'd' => {
                            if let Some(depth) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                extend(&mut dust_args, &["-d", depth]);
                            }
                        }
                        't' => {
                            if let Some(threshold) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                extend(&mut dust_args, &["-z", threshold]);
                            }
                        }
                        'I' => {
                            if let Some(pattern) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                extend(&mut dust_args, &["-v", pattern]);
                            }
                        }
                        'B' => {
                            if let Some(size) = cluster.value(&mut cursor, NextArg::UnlessFlag) {
                                extend(&mut dust_args, block_size(size));
                            }
                        }
                        // Exclude-from file; dust has no equivalent
                        'X' => {
                            cluster.value(&mut cursor, NextArg::Always);
                        }
                        'h' | 'c' | 'P' | 'l' | 'S' | 'H' | 'D' | '0' => {}
                        _ => {
                            trace!("Passing through unknown flag -{}", c);
                            dust_args.push(short(c));
                        }
                    }
                }
            }
            Arg::Positional(path) => paths.push(path.to_string()),
        }
    }

    dust_args.extend(paths);
    dust_args
}

/// Map a `du` block size onto a dust output unit
///
/// Sizes without a matching unit are dropped.
fn block_size(size: &str) -> &'static [&'static str] {
    match size.to_ascii_uppercase().as_str() {
        "1" | "1B" => &["-o", "b"],
        "K" | "KB" | "1K" | "1024" => &["-o", "kb"],
        "M" | "MB" | "1M" => &["-o", "mb"],
        "G" | "GB" | "1G" => &["-o", "gb"],
        _ => &[],
    }
}
