//! `dig` to `doggo`
//!
//! `dig` accepts its query name, type and class as bare words in any order
//! and tunes the query with `+option` words. `doggo` wants explicit
//! `-q`/`-t`/`-c`/`-n` flags, so the query parts are collected during the
//! scan and emitted in a fixed order at the end.

use tracing::trace;

use super::args::{short, Arg, ArgCursor, NextArg};
use super::Translator;

#[derive(Debug, Clone, Copy)]
pub struct Dig2Doggo;

impl Translator for Dig2Doggo {
    fn name(&self) -> &str {
        "dig2doggo"
    }

    fn source_tool(&self) -> &str {
        "dig"
    }

    fn target_tool(&self) -> &str {
        "doggo"
    }

    fn translate(&self, args: &[String], _mode: &str) -> Vec<String> {
        translate_flags(args)
    }

    fn include_in_init(&self) -> bool {
        true
    }
}

const QUERY_TYPES: &[&str] = &[
    "A", "AAAA", "AFSDB", "APL", "CAA", "CDNSKEY", "CDS", "CERT", "CNAME", "CSYNC", "DHCID",
    "DLV", "DNAME", "DNSKEY", "DS", "EUI48", "EUI64", "HINFO", "HIP", "HTTPS", "IPSECKEY", "KEY",
    "KX", "LOC", "MX", "NAPTR", "NS", "NSEC", "NSEC3", "NSEC3PARAM", "OPENPGPKEY", "PTR", "RP",
    "RRSIG", "SIG", "SMIMEA", "SOA", "SRV", "SSHFP", "SVCB", "TA", "TKEY", "TLSA", "TSIG", "TXT",
    "URI", "ZONEMD", "ANY", "AXFR", "IXFR",
];

const QUERY_CLASSES: &[&str] = &["IN", "CH", "HS", "CHAOS", "HESIOD"];

/// `+options` that only change dig's output layout or transport details
/// doggo does not expose
const UNSUPPORTED_PLUS_OPTIONS: &[&str] = &[
    "all", "trace", "bufsize", "edns", "cmd", "question", "answer", "authority", "additional",
    "comments", "rrcomments", "ttlid", "cl", "qr", "split", "identify", "multiline", "onesoa",
    "nssearch", "fail", "besteffort", "keepopen", "ignore", "crypto", "defname", "expire",
    "idnout", "ednsnegotiation", "ednsflags", "ednsopt",
];

fn is_query_type(s: &str) -> bool {
    QUERY_TYPES.iter().any(|t| t.eq_ignore_ascii_case(s))
}

fn is_query_class(s: &str) -> bool {
    QUERY_CLASSES.iter().any(|c| c.eq_ignore_ascii_case(s))
}

#[derive(Debug, Default)]
struct Query {
    flags: Vec<String>,
    name: Option<String>,
    record_type: Option<String>,
    class: Option<String>,
    nameserver: Option<String>,
}

impl Query {
    fn plus_option(&mut self, word: &str, raw: &str) {
        let (negated, option) = match word.strip_prefix("no") {
            Some(rest) => (true, rest),
            None => (false, word),
        };

        if let Some((option, value)) = option.split_once('=') {
            match option {
                "timeout" | "time" => self.flags.extend(["--timeout".to_string(), format!("{value}s")]),
                "ndots" => self.flags.extend(["--ndots".to_string(), value.to_string()]),
                "subnet" => self.flags.extend(["--ecs".to_string(), value.to_string()]),
                _ if UNSUPPORTED_PLUS_OPTIONS.contains(&option) => {}
                _ => {
                    trace!("Passing through unknown query option {}", raw);
                    self.flags.push(raw.to_string());
                }
            }
            return;
        }

        let mapped: &[&str] = match option {
            "short" => &["--short"],
            "tcp" | "vc" => &["-n", "@tcp://"],
            "recurse" => &["--rd"],
            "dnssec" => &["--do"],
            "aa" | "aaonly" | "aaflag" => &["--aa"],
            "ad" | "adflag" => &["--ad"],
            "cd" | "cdflag" => &["--cd"],
            "nsid" => &["--nsid"],
            "cookie" => &["--cookie"],
            "padding" => &["--padding"],
            "ede" => &["--ede"],
            "search" => &["--search"],
            "stats" => &["--time"],
            _ if UNSUPPORTED_PLUS_OPTIONS.contains(&option) => &[],
            _ => {
                trace!("Passing through unknown query option {}", raw);
                self.flags.push(raw.to_string());
                return;
            }
        };
        // +noX turns X off, which is doggo's default for every mapped option
        if !negated {
            self.flags.extend(mapped.iter().map(|s| (*s).to_string()));
        }
    }

    fn positional(&mut self, word: &str) {
        if self.name.is_none() {
            self.name = Some(word.to_string());
        } else if self.record_type.is_none() && is_query_type(word) {
            self.record_type = Some(word.to_ascii_uppercase());
        } else if self.class.is_none() && is_query_class(word) {
            self.class = Some(word.to_ascii_uppercase());
        } else {
            trace!("Ignoring extra query word {}", word);
        }
    }

    fn finish(self) -> Vec<String> {
        let mut result = self.flags;
        if let Some(name) = self.name {
            result.extend(["-q".to_string(), name]);
        }
        if let Some(record_type) = self.record_type {
            result.extend(["-t".to_string(), record_type]);
        }
        if let Some(class) = self.class {
            result.extend(["-c".to_string(), class]);
        }
        if let Some(server) = self.nameserver {
            // doggo needs the @ back when the server is given as a URL
            let server = if server.contains("://") {
                format!("@{server}")
            } else {
                server
            };
            result.extend(["-n".to_string(), server]);
        }
        result
    }
}

/// Translate `dig` arguments
#[must_use]
pub fn translate_flags(args: &[String]) -> Vec<String> {
    let mut query = Query::default();
    let mut cursor = ArgCursor::new(args);

    while let Some(arg) = cursor.next() {
        if arg == "--" {
            break;
        }

        if let Some(server) = arg.strip_prefix('@') {
            query.nameserver = Some(server.to_string());
            continue;
        }

        if let Some(word) = arg.strip_prefix('+') {
            query.plus_option(word, arg);
            continue;
        }

        match Arg::classify(arg) {
            Arg::Long { raw, .. } => query.flags.push(raw.to_string()),
            Arg::Short(mut cluster) => {
                while let Some(c) = cluster.next() {
                    match c {
                        '4' | '6' => query.flags.push(short(c)),
                        'q' => {
                            if let Some(name) = cluster.value(&mut cursor, NextArg::Always) {
                                query.name = Some(name.to_string());
                            }
                        }
                        't' => {
                            if let Some(record_type) = cluster.value(&mut cursor, NextArg::Always) {
                                query.record_type = Some(record_type.to_ascii_uppercase());
                            }
                        }
                        'c' => {
                            if let Some(class) = cluster.value(&mut cursor, NextArg::Always) {
                                query.class = Some(class.to_ascii_uppercase());
                            }
                        }
                        'x' => {
                            if let Some(address) = cluster.value(&mut cursor, NextArg::Always) {
                                query.flags.push("-x".to_string());
                                query.name = Some(address.to_string());
                            }
                        }
                        // Source address, batch file, TSIG key file, port
                        'b' | 'f' | 'k' | 'p' => {
                            cluster.value(&mut cursor, NextArg::Always);
                        }
                        'm' => query.flags.push("--debug".to_string()),
                        'u' | 'i' | 'h' | 'v' => {}
                        _ => {
                            trace!("Passing through unknown flag -{}", c);
                            query.flags.push(short(c));
                        }
                    }
                }
            }
            Arg::Positional(word) => query.positional(word),
        }
    }

    query.finish()
}

#[cfg(test)]
mod tests {
    use super::super::args::owned;
    use super::*;

    fn dig(input: &[&str]) -> Vec<String> {
        translate_flags(&owned(input))
    }

    #[test]
    fn test_simple_queries() {
        assert_eq!(dig(&["example.com"]), owned(&["-q", "example.com"]));
        assert_eq!(dig(&["example.com", "MX"]), owned(&["-q", "example.com", "-t", "MX"]));
        assert_eq!(dig(&["example.com", "mx"]), owned(&["-q", "example.com", "-t", "MX"]));
    }

    #[test]
    fn test_nameserver() {
        assert_eq!(
            dig(&["@8.8.8.8", "example.com"]),
            owned(&["-q", "example.com", "-n", "8.8.8.8"])
        );
        assert_eq!(
            dig(&["@8.8.8.8", "example.com", "A"]),
            owned(&["-q", "example.com", "-t", "A", "-n", "8.8.8.8"])
        );
        assert_eq!(
            dig(&["example.com", "@https://dns.example/dns-query"]),
            owned(&["-q", "example.com", "-n", "@https://dns.example/dns-query"])
        );
    }

    #[test]
    fn test_short_flags() {
        assert_eq!(dig(&["-q", "example.com"]), owned(&["-q", "example.com"]));
        assert_eq!(dig(&["-t", "AAAA", "example.com"]), owned(&["-q", "example.com", "-t", "AAAA"]));
        assert_eq!(dig(&["-tAAAA", "example.com"]), owned(&["-q", "example.com", "-t", "AAAA"]));
        assert_eq!(dig(&["-4", "example.com"]), owned(&["-4", "-q", "example.com"]));
        assert_eq!(dig(&["-6", "example.com"]), owned(&["-6", "-q", "example.com"]));
        assert_eq!(dig(&["-x", "8.8.8.8"]), owned(&["-x", "-q", "8.8.8.8"]));
        assert_eq!(dig(&["-m", "example.com"]), owned(&["--debug", "-q", "example.com"]));
        assert_eq!(dig(&["-p", "5353", "example.com"]), owned(&["-q", "example.com"]));
    }

    #[test]
    fn test_plus_options() {
        assert_eq!(dig(&["+short", "example.com"]), owned(&["--short", "-q", "example.com"]));
        assert_eq!(dig(&["+tcp", "example.com"]), owned(&["-n", "@tcp://", "-q", "example.com"]));
        assert_eq!(dig(&["+dnssec", "example.com"]), owned(&["--do", "-q", "example.com"]));
        assert_eq!(dig(&["+recurse", "example.com"]), owned(&["--rd", "-q", "example.com"]));
        assert_eq!(dig(&["+nsid", "example.com"]), owned(&["--nsid", "-q", "example.com"]));
        assert_eq!(dig(&["+stats", "example.com"]), owned(&["--time", "-q", "example.com"]));
        assert_eq!(dig(&["+norecurse", "example.com"]), owned(&["-q", "example.com"]));
        assert_eq!(dig(&["+trace", "example.com"]), owned(&["-q", "example.com"]));
        assert_eq!(dig(&["+noall", "+answer", "example.com"]), owned(&["-q", "example.com"]));
    }

    #[test]
    fn test_plus_options_with_values() {
        assert_eq!(
            dig(&["+timeout=5", "example.com"]),
            owned(&["--timeout", "5s", "-q", "example.com"])
        );
        assert_eq!(dig(&["+ndots=2", "example.com"]), owned(&["--ndots", "2", "-q", "example.com"]));
        assert_eq!(
            dig(&["+subnet=192.0.2.0/24", "example.com"]),
            owned(&["--ecs", "192.0.2.0/24", "-q", "example.com"])
        );
        assert_eq!(dig(&["+bufsize=4096", "example.com"]), owned(&["-q", "example.com"]));
    }

    #[test]
    fn test_class() {
        assert_eq!(
            dig(&["example.com", "IN", "A"]),
            owned(&["-q", "example.com", "-t", "A", "-c", "IN"])
        );
        assert_eq!(dig(&["-c", "CH", "example.com"]), owned(&["-q", "example.com", "-c", "CH"]));
    }

    #[test]
    fn test_complex_query_order_is_fixed() {
        assert_eq!(
            dig(&["@1.1.1.1", "+short", "-4", "example.com", "CH", "TXT"]),
            owned(&["--short", "-4", "-q", "example.com", "-t", "TXT", "-c", "CH", "-n", "1.1.1.1"])
        );
        assert_eq!(
            dig(&["+short", "@1.1.1.1", "example.com", "TXT"]),
            owned(&["--short", "-q", "example.com", "-t", "TXT", "-n", "1.1.1.1"])
        );
    }

    #[test]
    fn test_passthrough_and_edges() {
        assert!(dig(&[]).is_empty());
        assert_eq!(dig(&["-z", "example.com"]), owned(&["-z", "-q", "example.com"]));
        assert_eq!(dig(&["--json", "example.com"]), owned(&["--json", "-q", "example.com"]));
        assert_eq!(dig(&["+frobnicate", "example.com"]), owned(&["+frobnicate", "-q", "example.com"]));
        assert_eq!(dig(&["example.com", "--", "MX"]), owned(&["-q", "example.com"]));
    }
}
