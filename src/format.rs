//! printf-style argument substitution for translated format strings.
//!
//! Understands the placeholders found in Apple and Android string tables:
//! `%@`, `%s`, `%d`, `%i`, `%u`, `%f`, length modifiers (`%ld`, `%lld`),
//! precision (`%.2f`), positional indices (`%1$@`) and escaped `%%`.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"%%|%(?:([1-9][0-9]*)\$)?(?:\.([0-9]+))?(?:ll|l|h)?([@sdiuf])").unwrap();
}

/// A value substituted into a format string.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl FormatArg {
    fn render(&self, kind: &str, precision: Option<usize>) -> String {
        match (self, kind) {
            (FormatArg::Float(value), "f") => match precision {
                Some(precision) => format!("{:.*}", precision, value),
                None => format!("{:.6}", value),
            },
            (FormatArg::Float(value), "d" | "i" | "u") => format!("{}", value.trunc() as i64),
            (FormatArg::Int(value), "f") => match precision {
                Some(precision) => format!("{:.*}", precision, *value as f64),
                None => format!("{:.6}", *value as f64),
            },
            (FormatArg::Int(value), _) => value.to_string(),
            (FormatArg::Float(value), _) => value.to_string(),
            (FormatArg::Str(value), _) => value.clone(),
        }
    }
}

impl Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatArg::Str(value) => write!(f, "{}", value),
            FormatArg::Int(value) => write!(f, "{}", value),
            FormatArg::Float(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Str(value)
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        FormatArg::Int(value)
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        FormatArg::Int(value.into())
    }
}

impl From<u32> for FormatArg {
    fn from(value: u32) -> Self {
        FormatArg::Int(value.into())
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        FormatArg::Float(value)
    }
}

/// Substitutes `args` into `format`. Placeholders without a matching
/// argument are left in place.
pub fn format_with(format: &str, args: &[FormatArg]) -> String {
    let mut next = 0usize;
    PLACEHOLDER_REGEX
        .replace_all(format, |caps: &Captures| {
            if &caps[0] == "%%" {
                return "%".to_string();
            }
            let index = match caps.get(1) {
                Some(position) => match position.as_str().parse::<usize>() {
                    Ok(position) => position - 1,
                    Err(_) => return caps[0].to_string(),
                },
                None => {
                    let index = next;
                    next += 1;
                    index
                }
            };
            let precision = caps.get(2).and_then(|digits| digits.as_str().parse().ok());
            match args.get(index) {
                Some(arg) => arg.render(&caps[3], precision),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
