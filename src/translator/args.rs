//! Argument scanning shared by the translators
//!
//! Tokens are classified as long options, short option clusters or
//! positionals. Clusters are walked by index; an option that takes a value
//! consumes either the rest of the cluster or the following argument,
//! the way getopt does.

use std::collections::HashSet;

/// How a value-taking short option treats the following argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NextArg {
    /// Take it only when it does not look like a flag
    UnlessFlag,
    /// Take it whatever it looks like
    Always,
}

/// One classified command-line token
#[derive(Debug)]
pub(crate) enum Arg<'a> {
    /// `--name` or `--name=value`; `name` keeps its leading dashes
    Long {
        raw: &'a str,
        name: &'a str,
        value: Option<&'a str>,
    },
    /// `-abc`
    Short(Cluster<'a>),
    /// Anything else, including a lone `-`
    Positional(&'a str),
}

impl<'a> Arg<'a> {
    pub(crate) fn classify(arg: &'a str) -> Self {
        if arg.starts_with("--") {
            let (name, value) = match arg.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (arg, None),
            };
            Arg::Long {
                raw: arg,
                name,
                value,
            }
        } else if arg.len() > 1 && arg.starts_with('-') {
            Arg::Short(Cluster::new(&arg[1..]))
        } else {
            Arg::Positional(arg)
        }
    }
}

/// Index-based cursor over the argument list
#[derive(Debug)]
pub(crate) struct ArgCursor<'a> {
    args: &'a [String],
    pos: usize,
}

impl<'a> ArgCursor<'a> {
    pub(crate) fn new(args: &'a [String]) -> Self {
        Self { args, pos: 0 }
    }

    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.args.get(self.pos).map(String::as_str)
    }

    /// Consume the next argument as an option value
    pub(crate) fn take_value(&mut self, policy: NextArg) -> Option<&'a str> {
        let next = self.peek()?;
        if policy == NextArg::UnlessFlag && looks_like_flag(next) {
            return None;
        }
        self.pos += 1;
        Some(next)
    }

    /// Consume and return everything left
    pub(crate) fn take_rest(&mut self) -> &'a [String] {
        let rest = &self.args[self.pos..];
        self.pos = self.args.len();
        rest
    }
}

impl<'a> Iterator for ArgCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let arg = self.peek()?;
        self.pos += 1;
        Some(arg)
    }
}

/// Short options bundled in a single token (`-la` walks `l` then `a`)
#[derive(Debug)]
pub(crate) struct Cluster<'a> {
    flags: &'a str,
    pos: usize,
}

impl<'a> Cluster<'a> {
    fn new(flags: &'a str) -> Self {
        Self { flags, pos: 0 }
    }

    /// Value of the option just returned by `next`
    ///
    /// The rest of the cluster is the value when it is not empty, otherwise
    /// the next argument is consumed according to `policy`. Either way the
    /// walk ends. Empty values are reported as `None`.
    pub(crate) fn value(&mut self, cursor: &mut ArgCursor<'a>, policy: NextArg) -> Option<&'a str> {
        self.raw_value(cursor, policy).filter(|value| !value.is_empty())
    }

    /// Like [`Cluster::value`], but an empty next argument is a real value
    pub(crate) fn raw_value(
        &mut self,
        cursor: &mut ArgCursor<'a>,
        policy: NextArg,
    ) -> Option<&'a str> {
        let rest = &self.flags[self.pos..];
        self.pos = self.flags.len();
        if rest.is_empty() {
            cursor.take_value(policy)
        } else {
            Some(rest)
        }
    }

    /// Stop the walk, discarding whatever is left in the cluster
    pub(crate) fn finish(&mut self) {
        self.pos = self.flags.len();
    }
}

impl Iterator for Cluster<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.flags[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

pub(crate) fn looks_like_flag(arg: &str) -> bool {
    arg.starts_with('-')
}

/// Move everything after a `--` into `operands`, separator included
pub(crate) fn end_of_options(cursor: &mut ArgCursor<'_>, operands: &mut Vec<String>) {
    let rest = cursor.take_rest();
    if !rest.is_empty() {
        operands.push("--".to_string());
        operands.extend(rest.iter().cloned());
    }
}

/// Short flag spelled out as its own token
pub(crate) fn short(c: char) -> String {
    format!("-{c}")
}

/// Copy a static token list into owned output tokens
pub(crate) fn extend(out: &mut Vec<String>, tokens: &[&str]) {
    out.extend(tokens.iter().map(|t| (*t).to_string()));
}

/// Drop repeated tokens, keeping the first occurrence of each
pub(crate) fn dedup(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

#[cfg(test)]
pub(crate) fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| (*a).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_long_with_value() {
        match Arg::classify("--color=always") {
            Arg::Long { raw, name, value } => {
                assert_eq!(raw, "--color=always");
                assert_eq!(name, "--color");
                assert_eq!(value, Some("always"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_classify_splits_at_first_equals() {
        match Arg::classify("--label=a=b") {
            Arg::Long { name, value, .. } => {
                assert_eq!(name, "--label");
                assert_eq!(value, Some("a=b"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_lone_dash_is_positional() {
        assert!(matches!(Arg::classify("-"), Arg::Positional("-")));
    }

    #[test]
    fn test_cluster_attached_value() {
        let args = owned(&["-w80", "/tmp"]);
        let mut cursor = ArgCursor::new(&args);
        cursor.next();
        let mut cluster = Cluster::new("w80");
        assert_eq!(cluster.next(), Some('w'));
        assert_eq!(cluster.value(&mut cursor, NextArg::UnlessFlag), Some("80"));
        assert_eq!(cluster.next(), None);
        assert_eq!(cursor.next(), Some("/tmp"));
    }

    #[test]
    fn test_cluster_detached_value_respects_policy() {
        let args = owned(&["-e", "-foo"]);

        let mut cursor = ArgCursor::new(&args);
        cursor.next();
        let mut cluster = Cluster::new("e");
        cluster.next();
        assert_eq!(cluster.value(&mut cursor, NextArg::UnlessFlag), None);
        assert_eq!(cursor.peek(), Some("-foo"));

        let mut cursor = ArgCursor::new(&args);
        cursor.next();
        let mut cluster = Cluster::new("e");
        cluster.next();
        assert_eq!(cluster.value(&mut cursor, NextArg::Always), Some("-foo"));
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_empty_value() {
        let args = owned(&["-e", "", "file"]);

        let mut cursor = ArgCursor::new(&args);
        cursor.next();
        let mut cluster = Cluster::new("e");
        cluster.next();
        assert_eq!(cluster.value(&mut cursor, NextArg::Always), None);
        assert_eq!(cursor.peek(), Some("file"));

        let mut cursor = ArgCursor::new(&args);
        cursor.next();
        let mut cluster = Cluster::new("e");
        cluster.next();
        assert_eq!(cluster.raw_value(&mut cursor, NextArg::Always), Some(""));
        assert_eq!(cursor.peek(), Some("file"));
    }

    #[test]
    fn test_end_of_options() {
        let args = owned(&["--", "-x", "y"]);
        let mut cursor = ArgCursor::new(&args);
        cursor.next();
        let mut operands = owned(&["a"]);
        end_of_options(&mut cursor, &mut operands);
        assert_eq!(operands, owned(&["a", "--", "-x", "y"]));
        assert_eq!(cursor.next(), None);

        let mut operands = Vec::new();
        end_of_options(&mut cursor, &mut operands);
        assert!(operands.is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let tokens = owned(&["-l", "--no-group", "-l", "--no-user"]);
        assert_eq!(dedup(tokens), owned(&["-l", "--no-group", "--no-user"]));
    }
}
