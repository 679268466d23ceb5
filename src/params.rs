//! Plugin parameter parsing
//!
//! protoc hands every `--pyproject_opt` (or the `opt=` part of
//! `--pyproject_out`) to the plugin as one flat, comma-separated string.
//! Each entry is a bare flag, a `name=key` pair, or a `name=key=value`
//! triple. This module turns that string into a lookup table.
//!
//! Parsing never fails: malformed fragments are skipped or degrade to
//! partial entries, and duplicate names are resolved last-write-wins.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

/// A single parsed parameter entry
///
/// The three shapes correspond to how many `=`-separated segments the
/// entry carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// A bare name with no associated data
    Flag,
    /// A name with a key but no value
    Keyed {
        /// The segment after the first `=`
        key: String,
    },
    /// A name with both a key and a value
    KeyedWithValue {
        /// The segment after the first `=`
        key: String,
        /// The segment after the second `=`, with escapes resolved
        value: String,
    },
}

impl Param {
    /// The key attached to this entry, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            Param::Flag => None,
            Param::Keyed { key } | Param::KeyedWithValue { key, .. } => Some(key),
        }
    }

    /// The value attached to this entry, if any
    pub fn value(&self) -> Option<&str> {
        match self {
            Param::KeyedWithValue { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Parsed parameter entries, keyed by name
pub type Params = HashMap<String, Param>;

/// Parse the raw parameter string into a structured form
///
/// Scans left to right. `,` delimits entries, `=` splits an entry into
/// name, key, and value; a third `=` is absorbed into the value. Inside
/// the value segment `\,` escapes a literal comma and `\\` a literal
/// backslash; no escaping applies to names or keys. Empty segments are
/// skipped, so the function is total over any input.
///
/// `"g1,g2=k2,g3=k3=v3"` yields `g1` as a flag, `g2` keyed with `k2`,
/// and `g3` keyed with `k3` and value `v3`.
pub fn parse_params(raw: &str) -> Params {
    let mut params = HashMap::new();
    let mut input = raw.chars().peekable();

    loop {
        // Consume separator runs between entries. Name scanning below only
        // stops at a separator or the end of input, so an empty name here
        // means the string is exhausted.
        while input.next_if(|&c| c == ',' || c == '=').is_some() {}

        let name = scan_segment(&mut input);
        if name.is_empty() {
            break;
        }

        let entry = scan_entry_data(&mut input);
        params.insert(name, entry);
    }

    params
}

/// Scan the key/value data following an entry name, if any
fn scan_entry_data(input: &mut Peekable<Chars<'_>>) -> Param {
    if input.next_if(|&c| c == '=').is_none() {
        return Param::Flag;
    }

    let key = scan_segment(input);
    if key.is_empty() {
        // `name=` or `name==...`: no key captured, the entry degrades to a
        // bare flag and scanning resumes at the separator.
        return Param::Flag;
    }

    if input.next_if(|&c| c == '=').is_none() {
        return Param::Keyed { key };
    }

    let value = scan_value(input);
    if value.is_empty() {
        Param::Keyed { key }
    } else {
        Param::KeyedWithValue { key, value }
    }
}

/// Scan a name or key segment: a run of characters up to `,`, `=`, or the
/// end of input
fn scan_segment(input: &mut Peekable<Chars<'_>>) -> String {
    let mut segment = String::new();
    while let Some(c) = input.next_if(|&c| c != ',' && c != '=') {
        segment.push(c);
    }
    segment
}

/// Scan a value segment: runs to the next unescaped `,` or the end of
/// input
///
/// `\,` and `\\` resolve to the escaped character; a backslash followed by
/// anything else is kept literally.
fn scan_value(input: &mut Peekable<Chars<'_>>) -> String {
    let mut value = String::new();
    while let Some(&c) = input.peek() {
        match c {
            ',' => break,
            '\\' => {
                input.next();
                match input.next_if(|&next| next == ',' || next == '\\') {
                    Some(escaped) => value.push(escaped),
                    None => value.push('\\'),
                }
            }
            _ => {
                value.push(c);
                input.next();
            }
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_example() {
        let params = parse_params("g1,g2=k2,g3=k3=v3");

        assert_eq!(params.len(), 3);
        assert_eq!(params["g1"], Param::Flag);
        assert_eq!(
            params["g2"],
            Param::Keyed {
                key: "k2".to_string()
            }
        );
        assert_eq!(
            params["g3"],
            Param::KeyedWithValue {
                key: "k3".to_string(),
                value: "v3".to_string()
            }
        );
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(parse_params("").is_empty());
    }

    #[test]
    fn test_parse_one_entry_per_segment() {
        let params = parse_params("a,b=1,c=2=3,d");
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_parse_duplicate_names_last_wins() {
        let params = parse_params("a,a=x");
        assert_eq!(params.len(), 1);
        assert_eq!(
            params["a"],
            Param::Keyed {
                key: "x".to_string()
            }
        );
    }

    #[test]
    fn test_parse_escaped_comma_in_value() {
        let params = parse_params("a=k=v1\\,v2");
        assert_eq!(
            params["a"],
            Param::KeyedWithValue {
                key: "k".to_string(),
                value: "v1,v2".to_string()
            }
        );
    }

    #[test]
    fn test_parse_escaped_backslash_in_value() {
        let params = parse_params("a=k=v1\\\\,b");
        assert_eq!(
            params["a"],
            Param::KeyedWithValue {
                key: "k".to_string(),
                value: "v1\\".to_string()
            }
        );
        assert_eq!(params["b"], Param::Flag);
    }

    #[test]
    fn test_parse_unescaped_comma_terminates_value() {
        let params = parse_params("a=k=v1,v2");
        assert_eq!(
            params["a"],
            Param::KeyedWithValue {
                key: "k".to_string(),
                value: "v1".to_string()
            }
        );
        // The tail after the comma starts a fresh entry.
        assert_eq!(params["v2"], Param::Flag);
    }

    #[test]
    fn test_parse_extra_equals_absorbed_into_value() {
        let params = parse_params("a=k=v=w");
        assert_eq!(
            params["a"],
            Param::KeyedWithValue {
                key: "k".to_string(),
                value: "v=w".to_string()
            }
        );
    }

    #[test]
    fn test_parse_empty_segments_skipped() {
        let params = parse_params(",,a,,b=k,");
        assert_eq!(params.len(), 2);
        assert_eq!(params["a"], Param::Flag);
        assert_eq!(
            params["b"],
            Param::Keyed {
                key: "k".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_key_degrades_to_flag() {
        let params = parse_params("a=,b");
        assert_eq!(params["a"], Param::Flag);
        assert_eq!(params["b"], Param::Flag);
    }

    #[test]
    fn test_parse_empty_value_yields_keyed() {
        let params = parse_params("a=k=,b");
        assert_eq!(
            params["a"],
            Param::Keyed {
                key: "k".to_string()
            }
        );
        assert_eq!(params["b"], Param::Flag);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = "g1,g2=k2,g3=k3=v3\\,v4";
        assert_eq!(parse_params(raw), parse_params(raw));
    }

    #[test]
    fn test_param_accessors() {
        let params = parse_params("a,b=k,c=k=v");
        assert_eq!(params["a"].key(), None);
        assert_eq!(params["b"].key(), Some("k"));
        assert_eq!(params["b"].value(), None);
        assert_eq!(params["c"].key(), Some("k"));
        assert_eq!(params["c"].value(), Some("v"));
    }
}
