//! Apple `.strings` string tables.
//!
//! Bundles on disk store one table per file (`Localizable.strings`,
//! `Errors.strings`, ...). This module reads those files; values are kept
//! unescaped in memory.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

lazy_static! {
    static ref PAIR_REGEX: Regex =
        Regex::new(r#"^"((?:[^"\\]|\\.)*)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;"#).unwrap();
}

/// An Apple `.strings` file: an ordered list of key-value pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringsFile {
    /// Language recorded in the `//: Language:` header, if any.
    pub language: String,
    pub pairs: Vec<Pair>,
}

impl StringsFile {
    /// Reads a `.strings` file, honoring a UTF-8 or UTF-16 byte order mark:
    /// Xcode commonly emits UTF-16 files.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
        decoded.parse()
    }

    /// Key-value lookup table. Later duplicates win, matching how Apple
    /// platforms load `.strings` files.
    pub fn into_table(self) -> HashMap<String, String> {
        self.pairs
            .into_iter()
            .map(|pair| (pair.key, pair.value))
            .collect()
    }
}

/// Folds values spanning several lines onto one line, joining the lines
/// with an escaped newline and dropping their indentation.
///
/// Only a quoted string that follows an `=` is a value; quotes inside keys
/// and comments never start one.
fn multiline_values_to_one_line(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut after_equals = false;

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'*') => {
                result.push(c);
                if let Some(star) = chars.next() {
                    result.push(star);
                }
                let mut previous = '\0';
                for d in chars.by_ref() {
                    result.push(d);
                    if previous == '*' && d == '/' {
                        break;
                    }
                    previous = d;
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                result.push(c);
                while let Some(&d) = chars.peek() {
                    if d == '\n' {
                        break;
                    }
                    result.push(d);
                    chars.next();
                }
            }
            '"' => {
                let mut quoted = String::new();
                let mut closed = false;
                while let Some(d) = chars.next() {
                    match d {
                        '\\' => {
                            quoted.push(d);
                            if let Some(escaped) = chars.next() {
                                quoted.push(escaped);
                            }
                        }
                        '"' => {
                            closed = true;
                            break;
                        }
                        _ => quoted.push(d),
                    }
                }

                result.push('"');
                if after_equals {
                    let one_line = quoted
                        .lines()
                        .map(str::trim_start)
                        .collect::<Vec<_>>()
                        .join(r"\n");
                    result.push_str(&one_line);
                } else {
                    result.push_str(&quoted);
                }
                if closed {
                    result.push('"');
                }
                after_equals = false;
            }
            '=' => {
                after_equals = true;
                result.push(c);
            }
            ';' => {
                after_equals = false;
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

impl FromStr for StringsFile {
    type Err = Error;

    fn from_str(content: &str) -> Result<Self, Error> {
        let content = multiline_values_to_one_line(content);

        let mut language = String::new();
        let mut last_comment: Option<String> = None;
        let mut pairs = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if let Some(header) = trimmed.strip_prefix("//:") {
                // Example: "//: Language: ar"
                if let Some((key, value)) = header.split_once(':') {
                    if key.trim() == "Language" {
                        language = value.trim().to_string();
                    }
                }
                continue;
            }
            if trimmed.starts_with("/*") || trimmed.starts_with("//") {
                last_comment = Some(trimmed.to_string());
                continue;
            }
            if trimmed.is_empty() {
                continue;
            }

            let Some(caps) = PAIR_REGEX.captures(trimmed) else {
                last_comment = None;
                continue;
            };
            pairs.push(Pair {
                key: unescape(&caps[1]),
                value: unescape(&caps[2]),
                comment: last_comment.take(),
            });
        }

        Ok(StringsFile { language, pairs })
    }
}

/// A single key-value pair in a `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
    /// The comment line immediately preceding the pair, marker included.
    pub comment: Option<String>,
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_basic_strings_with_comment() {
        let content = r#"
        /* Greeting for the user */
        "hello" = "مرحبا";
        "#;
        let parsed = content.parse::<StringsFile>().unwrap();
        assert_eq!(parsed.pairs.len(), 1);
        let pair = &parsed.pairs[0];
        assert_eq!(pair.key, "hello");
        assert_eq!(pair.value, "مرحبا");
        assert!(pair.comment.as_ref().unwrap().contains("Greeting for the user"));
    }

    #[test]
    fn test_escapes_and_equals_in_value() {
        let content = r#""quote" = "say \"hi\" = ok";"#;
        let parsed = content.parse::<StringsFile>().unwrap();
        assert_eq!(parsed.pairs[0].value, r#"say "hi" = ok"#);
    }

    #[test]
    fn test_multiline_value_becomes_newlines() {
        let content = r#"
        "multiline" = "line 1.
            line 2.";
        "#;
        let parsed = content.parse::<StringsFile>().unwrap();
        assert_eq!(parsed.pairs.len(), 1);
        assert_eq!(parsed.pairs[0].value, "line 1.\nline 2.");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let content = r#"
        // Comment
        "good" = "yes";
        bad line without equals
        "another" = "ok";
        "#;
        let parsed = content.parse::<StringsFile>().unwrap();
        assert_eq!(parsed.pairs.len(), 2);
        assert_eq!(parsed.pairs[0].key, "good");
        assert_eq!(parsed.pairs[1].key, "another");
        assert!(parsed.pairs[1].comment.is_none());
    }

    #[test]
    fn test_language_header() {
        let content = "//: Language: ar\n\"key\" = \"value\";";
        let parsed = content.parse::<StringsFile>().unwrap();
        assert_eq!(parsed.language, "ar");
    }

    #[test]
    fn test_into_table_last_duplicate_wins() {
        let content = "\"k\" = \"first\";\n\"k\" = \"second\";";
        let table = content.parse::<StringsFile>().unwrap().into_table();
        assert_eq!(table.get("k").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_equals_inside_key_does_not_start_a_value() {
        let content = "\"Total = \" = \"المجموع = \";\n\"next\" = \"ok\";";
        let parsed = content.parse::<StringsFile>().unwrap();
        assert_eq!(parsed.pairs.len(), 2);
        assert_eq!(parsed.pairs[0].key, "Total = ");
        assert_eq!(parsed.pairs[0].value, "المجموع = ");
        assert_eq!(parsed.pairs[1].key, "next");
        assert_eq!(parsed.pairs[1].value, "ok");
    }

    #[test]
    fn test_quotes_inside_comments_are_ignored() {
        let content = indoc! {r#"
            /* Shown as "Total = */
            "total" = "line 1.
                line 2.";
            // a stray " = quote
            "next" = "ok";
        "#};
        let parsed = content.parse::<StringsFile>().unwrap();
        assert_eq!(parsed.pairs.len(), 2);
        assert_eq!(parsed.pairs[0].value, "line 1.\nline 2.");
        assert!(parsed.pairs[0].comment.as_ref().unwrap().contains("Total ="));
        assert_eq!(parsed.pairs[1].key, "next");
        assert_eq!(parsed.pairs[1].comment.as_deref(), Some("// a stray \" = quote"));
    }
}
