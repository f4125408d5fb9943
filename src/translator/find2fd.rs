//! `find` to `fd`
//!
//! `find` takes search roots first and an expression after them; `fd` takes
//! flags, one regex pattern, then roots. The first `-name`/`-regex` test
//! becomes the pattern and later name tests fall back to `fd -g`.

use tracing::trace;

use super::args::{extend, ArgCursor, NextArg};
use super::Translator;

#[derive(Debug, Clone, Copy)]
pub struct Find2Fd;

impl Translator for Find2Fd {
    fn name(&self) -> &str {
        "find2fd"
    }

    fn source_tool(&self) -> &str {
        "find"
    }

    fn target_tool(&self) -> &str {
        "fd"
    }

    fn translate(&self, args: &[String], _mode: &str) -> Vec<String> {
        translate_flags(args)
    }

    fn include_in_init(&self) -> bool {
        true
    }
}

/// Expressions that take the next argument as their value
const VALUE_EXPRESSIONS: &[&str] = &[
    "-name", "-iname", "-path", "-ipath", "-regex", "-iregex", "-type", "-maxdepth",
    "-mindepth", "-size", "-newer", "-mtime", "-atime", "-ctime", "-mmin", "-amin", "-cmin",
    "-user", "-group", "-perm",
];

/// Operators, grouping and actions with no `fd` counterpart
const DROPPED_EXPRESSIONS: &[&str] = &[
    "!", "-not", "(", ")", "-o", "-or", "-a", "-and", "-true", "-print", "-P", "-depth",
    "-daystart", "-delete", "-prune",
];

/// Actions that run a command, terminated by `;` or `+`
const EXEC_ACTIONS: &[&str] = &["-exec", "-execdir", "-ok", "-okdir"];

#[derive(Debug, Clone, Copy)]
enum TimeUnit {
    Days,
    Minutes,
}

impl TimeUnit {
    fn suffix(self) -> &'static str {
        match self {
            Self::Days => "d",
            Self::Minutes => "min",
        }
    }
}

#[derive(Debug, Default)]
struct FdCommand {
    flags: Vec<String>,
    pattern: Option<String>,
    case_insensitive: bool,
}

impl FdCommand {
    fn set_pattern_or_glob(&mut self, glob: &str) {
        if glob.is_empty() {
            trace!("Ignoring empty name pattern");
        } else if self.pattern.is_none() {
            self.pattern = Some(glob_to_regex(glob));
        } else {
            extend(&mut self.flags, &["-g", glob]);
        }
    }

    fn set_regex(&mut self, regex: &str) {
        if !regex.is_empty() && self.pattern.is_none() {
            self.pattern = Some(regex.to_string());
        }
    }

    fn apply(&mut self, expression: &str, value: &str) {
        match expression {
            "-name" => self.set_pattern_or_glob(value),
            "-iname" => {
                self.case_insensitive = true;
                self.set_pattern_or_glob(value);
            }
            "-path" => extend(&mut self.flags, &["-p", value]),
            "-ipath" => extend(&mut self.flags, &["-i", "-p", value]),
            "-regex" => self.set_regex(value),
            "-iregex" => {
                self.case_insensitive = true;
                self.set_regex(value);
            }
            "-type" => extend(&mut self.flags, &["-t", translate_type(value)]),
            "-maxdepth" => extend(&mut self.flags, &["-d", value]),
            "-mindepth" => extend(&mut self.flags, &["--min-depth", value]),
            "-size" => extend(&mut self.flags, &["-S", value]),
            "-newer" => extend(&mut self.flags, &["--newer", value]),
            "-mtime" | "-atime" | "-ctime" => {
                self.flags.extend(time_window(value, TimeUnit::Days));
            }
            "-mmin" | "-amin" | "-cmin" => {
                self.flags.extend(time_window(value, TimeUnit::Minutes));
            }
            "-user" => extend(&mut self.flags, &["--owner", value]),
            "-group" => self.flags.extend(["--owner".to_string(), format!(":{value}")]),
            _ => trace!("No fd equivalent for {} {}", expression, value),
        }
    }
}

/// Translate `find` arguments
#[must_use]
pub fn translate_flags(args: &[String]) -> Vec<String> {
    let mut cursor = ArgCursor::new(args);
    let mut paths = Vec::new();

    // Search roots come before the first expression
    while let Some(arg) = cursor.peek() {
        if is_expression(arg) {
            break;
        }
        cursor.next();
        if arg != "." {
            paths.push(arg.to_string());
        }
    }

    let mut fd = FdCommand::default();
    while let Some(arg) = cursor.next() {
        if DROPPED_EXPRESSIONS.contains(&arg) {
            continue;
        }

        if VALUE_EXPRESSIONS.contains(&arg) {
            match cursor.take_value(NextArg::Always) {
                Some(value) => fd.apply(arg, value),
                None => trace!("{} without a value", arg),
            }
            continue;
        }

        if EXEC_ACTIONS.contains(&arg) {
            // fd's --exec differs too much to translate safely
            for token in cursor.by_ref() {
                if token == ";" || token == "+" {
                    break;
                }
            }
            continue;
        }

        match arg {
            "-print0" => fd.flags.push("-0".to_string()),
            "-L" | "-follow" => fd.flags.push("-L".to_string()),
            "-H" => fd.flags.push("-H".to_string()),
            "-empty" => extend(&mut fd.flags, &["-t", "e"]),
            "-executable" => extend(&mut fd.flags, &["-t", "x"]),
            "-xdev" | "-mount" => fd.flags.push("--one-file-system".to_string()),
            "-quit" => fd.flags.push("-1".to_string()),
            "." => {}
            other if other.starts_with('-') => {
                trace!("Passing through unknown expression {}", other);
                fd.flags.push(other.to_string());
                if let Some(value) = cursor.peek().filter(|next| !is_expression(next)) {
                    cursor.next();
                    fd.flags.push(value.to_string());
                }
            }
            other => paths.push(other.to_string()),
        }
    }

    let mut result = Vec::with_capacity(fd.flags.len() + paths.len() + 2);
    if fd.case_insensitive {
        result.push("-i".to_string());
    }
    result.extend(fd.flags);
    if let Some(pattern) = fd.pattern {
        if pattern.starts_with('-') {
            result.push("--".to_string());
        }
        result.push(pattern);
    }
    result.extend(paths);
    result
}

/// Whether a token starts an expression rather than naming a search root
fn is_expression(arg: &str) -> bool {
    arg.starts_with('-') || matches!(arg, "!" | "(" | ")")
}

/// Map a `find -type` letter onto `fd -t`
fn translate_type(t: &str) -> &str {
    match t {
        // fd has no device types
        "b" | "c" => "f",
        other => other,
    }
}

/// Map a `-mtime`/`-mmin` style window onto fd's within/before flags
///
/// `-N` means newer than N units, `+N` older than N units. A bare `N` is
/// approximated as "within N units".
fn time_window(value: &str, unit: TimeUnit) -> [String; 2] {
    let (flag, amount) = if let Some(amount) = value.strip_prefix('-') {
        ("--changed-within", amount)
    } else if let Some(amount) = value.strip_prefix('+') {
        ("--changed-before", amount)
    } else {
        ("--changed-within", value)
    };
    [flag.to_string(), format!("{amount}{}", unit.suffix())]
}

/// Convert a shell glob into the regex dialect `fd` expects
///
/// A plain extension glob such as `*.txt` becomes an anchored suffix match.
#[must_use]
pub fn glob_to_regex(glob: &str) -> String {
    if let Some(ext) = glob.strip_prefix('*') {
        if ext.starts_with('.') && !ext[1..].contains(&['*', '?', '[', ']'][..]) {
            return format!("{}$", regex::escape(ext));
        }
    }

    let chars: Vec<char> = glob.chars().collect();
    let mut result = String::with_capacity(glob.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    result.push_str(".*");
                    i += 1;
                } else {
                    result.push_str("[^/]*");
                }
            }
            '?' => result.push_str("[^/]"),
            '.' => result.push_str("\\."),
            '[' => {
                result.push('[');
                i += 1;
                if chars.get(i) == Some(&'!') {
                    result.push('^');
                    i += 1;
                }
                while i < chars.len() && chars[i] != ']' {
                    result.push(chars[i]);
                    i += 1;
                }
                if i < chars.len() {
                    result.push(']');
                }
            }
            '\\' => {
                if let Some(&escaped) = chars.get(i + 1) {
                    result.push('\\');
                    result.push(escaped);
                    i += 1;
                }
            }
            '^' | '$' | '+' | '{' | '}' | '|' | '(' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
        i += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::super::args::owned;
    use super::*;

    fn find(input: &[&str]) -> Vec<String> {
        translate_flags(&owned(input))
    }

    #[test]
    fn test_paths() {
        assert!(find(&["."]).is_empty());
        assert_eq!(find(&["/tmp"]), owned(&["/tmp"]));
        assert_eq!(find(&["src", "lib"]), owned(&["src", "lib"]));
        assert_eq!(find(&["src", "-type", "f"]), owned(&["-t", "f", "src"]));
    }

    #[test]
    fn test_name_patterns() {
        assert_eq!(find(&[".", "-name", "*.txt"]), owned(&["\\.txt$"]));
        assert_eq!(find(&[".", "-name", "Makefile"]), owned(&["Makefile"]));
        assert_eq!(find(&[".", "-iname", "*.TXT"]), owned(&["-i", "\\.TXT$"]));
        assert_eq!(
            find(&[".", "-name", "*.rs", "-o", "-name", "*.toml"]),
            owned(&["-g", "*.toml", "\\.rs$"])
        );
    }

    #[test]
    fn test_empty_patterns_are_ignored() {
        assert_eq!(find(&[".", "-name", "", "-name", "*.rs"]), owned(&["\\.rs$"]));
        assert_eq!(find(&[".", "-name", "*.rs", "-name", ""]), owned(&["\\.rs$"]));
        assert_eq!(find(&[".", "-regex", "", "-type", "f"]), owned(&["-t", "f"]));
    }

    #[test]
    fn test_dash_pattern_is_protected() {
        assert_eq!(find(&[".", "-name", "-draft"]), owned(&["--", "-draft"]));
    }

    #[test]
    fn test_type_and_depth() {
        assert_eq!(find(&[".", "-type", "d"]), owned(&["-t", "d"]));
        assert_eq!(find(&[".", "-type", "c"]), owned(&["-t", "f"]));
        assert_eq!(
            find(&[".", "-mindepth", "1", "-maxdepth", "3"]),
            owned(&["--min-depth", "1", "-d", "3"])
        );
        assert_eq!(
            find(&[".", "-type", "f", "-name", "*.go", "-maxdepth", "3"]),
            owned(&["-t", "f", "-d", "3", "\\.go$"])
        );
    }

    #[test]
    fn test_standalone_expressions() {
        assert_eq!(find(&[".", "-name", "*.txt", "-print0"]), owned(&["-0", "\\.txt$"]));
        assert_eq!(find(&[".", "-name", "*.txt", "-print"]), owned(&["\\.txt$"]));
        assert_eq!(find(&["-L", ".", "-name", "*.txt"]), owned(&["-L", "\\.txt$"]));
        assert_eq!(find(&["-follow", ".", "-name", "*.txt"]), owned(&["-L", "\\.txt$"]));
        assert_eq!(find(&[".", "-empty"]), owned(&["-t", "e"]));
        assert_eq!(find(&[".", "-executable"]), owned(&["-t", "x"]));
        assert_eq!(find(&[".", "-xdev"]), owned(&["--one-file-system"]));
        assert_eq!(find(&[".", "-name", "*.go", "-quit"]), owned(&["-1", "\\.go$"]));
    }

    #[test]
    fn test_time_windows() {
        assert_eq!(find(&[".", "-mtime", "-7"]), owned(&["--changed-within", "7d"]));
        assert_eq!(find(&[".", "-mtime", "+30"]), owned(&["--changed-before", "30d"]));
        assert_eq!(find(&[".", "-ctime", "2"]), owned(&["--changed-within", "2d"]));
        assert_eq!(find(&[".", "-mmin", "-60"]), owned(&["--changed-within", "60min"]));
        assert_eq!(find(&[".", "-amin", "+5"]), owned(&["--changed-before", "5min"]));
    }

    #[test]
    fn test_ownership_size_and_newer() {
        assert_eq!(find(&[".", "-size", "+1M"]), owned(&["-S", "+1M"]));
        assert_eq!(find(&[".", "-newer", "reference.txt"]), owned(&["--newer", "reference.txt"]));
        assert_eq!(find(&[".", "-user", "root"]), owned(&["--owner", "root"]));
        assert_eq!(find(&[".", "-group", "wheel"]), owned(&["--owner", ":wheel"]));
        assert!(find(&[".", "-perm", "644"]).is_empty());
    }

    #[test]
    fn test_operators_and_grouping_dropped() {
        assert_eq!(find(&[".", "-type", "f", "-a", "-name", "*.go"]), owned(&["-t", "f", "\\.go$"]));
        assert_eq!(find(&[".", "(", "-name", "*.go", ")"]), owned(&["\\.go$"]));
        assert_eq!(find(&[".", "!", "-empty"]), owned(&["-t", "e"]));
    }

    #[test]
    fn test_regex_and_path() {
        assert_eq!(find(&[".", "-regex", ".*\\.go$"]), owned(&[".*\\.go$"]));
        assert_eq!(find(&[".", "-iregex", ".*\\.GO$"]), owned(&["-i", ".*\\.GO$"]));
        assert_eq!(find(&[".", "-path", "*/test/*"]), owned(&["-p", "*/test/*"]));
        assert_eq!(find(&[".", "-ipath", "*/Test/*"]), owned(&["-i", "-p", "*/Test/*"]));
    }

    #[test]
    fn test_exec_is_skipped() {
        assert_eq!(
            find(&[".", "-name", "*.tmp", "-exec", "rm", "{}", ";", "-print0"]),
            owned(&["-0", "\\.tmp$"])
        );
        assert_eq!(find(&[".", "-exec", "ls", "{}", "+"]), Vec::<String>::new());
    }

    #[test]
    fn test_unknown_expression_passthrough() {
        assert_eq!(find(&[".", "-fstype", "-name", "x"]), owned(&["-fstype", "x"]));
        assert_eq!(find(&[".", "-fstype", "nfs"]), owned(&["-fstype", "nfs"]));
        assert_eq!(
            find(&["src", "-fstype", "nfs", "-name", "*.rs"]),
            owned(&["-fstype", "nfs", "\\.rs$", "src"])
        );
        assert_eq!(find(&[".", "-nouser", "(", "-name", "x", ")"]), owned(&["-nouser", "x"]));
        assert!(find(&[]).is_empty());
        assert!(find(&[".", "-name"]).is_empty());
    }

    #[test]
    fn test_glob_to_regex() {
        assert_eq!(glob_to_regex("*.txt"), "\\.txt$");
        assert_eq!(glob_to_regex("*.tar.gz"), "\\.tar\\.gz$");
        assert_eq!(glob_to_regex("test*"), "test[^/]*");
        assert_eq!(glob_to_regex("file?.go"), "file[^/]\\.go");
        assert_eq!(glob_to_regex("**/*.rs"), ".*/[^/]*\\.rs");
        assert_eq!(glob_to_regex("[!abc]*"), "[^abc][^/]*");
        assert_eq!(glob_to_regex("[ab].md"), "[ab]\\.md");
        assert_eq!(glob_to_regex("a+b(1)"), "a\\+b\\(1)");
        assert_eq!(glob_to_regex("\\*literal"), "\\*literal");
        assert_eq!(glob_to_regex("*.[ch]"), "[^/]*\\.[ch]");
    }
}
