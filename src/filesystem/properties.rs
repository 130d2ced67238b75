//! Reader and writer for the Java properties text format.

use crate::messages::LocaleMessages;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    pub line: usize,
    pub message: String,
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\u{0C}'
}

fn ends_with_odd_backslashes(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Decode file bytes as UTF-8, falling back to ISO-8859-1.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parse properties text into key/value entries.
///
/// Later duplicates of a key overwrite earlier ones.
pub fn parse_properties(content: &str) -> Result<LocaleMessages, PropertiesError> {
    let normalized = content.replace("\r\n", "\n");
    let natural: Vec<&str> = normalized.split(['\n', '\r']).collect();
    let mut entries = LocaleMessages::new();

    let mut index = 0;
    while index < natural.len() {
        let line_number = index + 1;
        let mut logical = natural[index].trim_start_matches(is_blank).to_string();
        index += 1;

        if logical.is_empty() || logical.starts_with('#') || logical.starts_with('!') {
            continue;
        }

        while ends_with_odd_backslashes(&logical) {
            logical.pop();
            match natural.get(index) {
                Some(next) => {
                    logical.push_str(next.trim_start_matches(is_blank));
                    index += 1;
                }
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, line_number)?;
        let value = unescape(raw_value, line_number)?;
        entries.insert(key, value);
    }

    Ok(entries)
}

/// Split a logical line at the first unescaped separator.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            separator = Some(c);
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = match separator {
        Some(c) => &line[key_end + c.len_utf8()..],
        None => return (key, ""),
    };

    rest = rest.trim_start_matches(is_blank);
    if separator.is_some_and(is_blank) {
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped.trim_start_matches(is_blank);
        }
    }

    (key, rest)
}

/// Resolve escape sequences, combining `\u` surrogate pairs.
fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut buf = [0u16; 2];

    while let Some(c) = chars.next() {
        let resolved = if c == '\\' {
            match chars.next() {
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\u{0C}',
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    let unit = (hex.len() == 4)
                        .then(|| u16::from_str_radix(&hex, 16).ok())
                        .flatten()
                        .ok_or_else(|| PropertiesError {
                            line,
                            message: format!("Malformed \\uxxxx encoding: \\u{}", hex),
                        })?;
                    units.push(unit);
                    continue;
                }
                Some(other) => other,
                None => continue,
            }
        } else {
            c
        };
        units.extend_from_slice(resolved.encode_utf16(&mut buf));
    }

    Ok(char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect())
}

/// Escape a key or value for writing.
fn escape(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut buf = [0u16; 2];

    for (i, c) in s.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{0C}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c < ' ' || c > '~' => {
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => out.push(c),
        }
    }

    out
}

/// Render entries as properties text, sorted by key.
///
/// Each header line is written as a `#` comment.
pub fn write_properties(entries: &LocaleMessages, header: &[&str]) -> String {
    let mut out = String::new();

    for line in header {
        out.push('#');
        out.push_str(line);
        out.push('\n');
    }

    for (key, value) in entries {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> LocaleMessages {
        parse_properties(content).unwrap()
    }

    #[test]
    fn test_parse_separators() {
        let entries = parse("a=1\nb:2\nc 3\nd = 4\ne \t: 5\nf\n");
        assert_eq!(entries["a"], "1");
        assert_eq!(entries["b"], "2");
        assert_eq!(entries["c"], "3");
        assert_eq!(entries["d"], "4");
        assert_eq!(entries["e"], "5");
        assert_eq!(entries["f"], "");
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let entries = parse("# comment\n! also comment\n\n   \n  key=value\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["key"], "value");
    }

    #[test]
    fn test_parse_continuation_lines() {
        let entries = parse("fruits=apple, \\\n    banana, \\\r\n    pear\nnext=1");
        assert_eq!(entries["fruits"], "apple, banana, pear");
        assert_eq!(entries["next"], "1");
    }

    #[test]
    fn test_parse_even_backslashes_do_not_continue() {
        let entries = parse("path=c:\\\\\nother=x");
        assert_eq!(entries["path"], "c:\\");
        assert_eq!(entries["other"], "x");
    }

    #[test]
    fn test_parse_escapes() {
        let entries = parse("key\\ with\\=sep=tab\\there\\nnewline\nunicode=gr\\u00FC\\u00DFe");
        assert_eq!(entries["key with=sep"], "tab\there\nnewline");
        assert_eq!(entries["unicode"], "grüße");
    }

    #[test]
    fn test_parse_surrogate_pair() {
        let entries = parse("emoji=\\uD83D\\uDE00");
        assert_eq!(entries["emoji"], "\u{1F600}");
    }

    #[test]
    fn test_parse_malformed_unicode_escape() {
        let err = parse_properties("ok=1\nbad=\\u12G4").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_parse_later_duplicate_wins() {
        let entries = parse("key=first\nkey=second");
        assert_eq!(entries["key"], "second");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        assert_eq!(decode(b"key=gr\xfc\xdfe"), "key=grüße");
        assert_eq!(decode("key=grüße".as_bytes()), "key=grüße");
    }

    #[test]
    fn test_write_escapes_and_parses_back() {
        let mut entries = LocaleMessages::new();
        entries.insert("key with space".to_string(), " leading space".to_string());
        entries.insert("sep=:#!".to_string(), "line\nbreak\\".to_string());
        entries.insert("unicode".to_string(), "grüße \u{1F600}".to_string());

        let text = write_properties(&entries, &["generated"]);
        assert!(text.starts_with("#generated\n"));
        assert!(text.is_ascii());
        assert!(text.contains("key\\ with\\ space=\\ leading space"));

        assert_eq!(parse(&text), entries);
    }

    #[test]
    fn test_write_sorted_by_key() {
        let mut entries = LocaleMessages::new();
        entries.insert("b".to_string(), "2".to_string());
        entries.insert("a".to_string(), "1".to_string());

        assert_eq!(write_properties(&entries, &[]), "a=1\nb=2\n");
    }
}
