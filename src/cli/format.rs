//! Rendering decrypted entries as variable assignments.
//!
//! Shell and PowerShell values are double-quoted with the characters that
//! would otherwise be interpreted inside the quotes escaped. `cmd` has no
//! escape for a quoted `set`, so values are written as-is.

use std::fmt::Write as _;

use serde::Serialize;
use zeroize::Zeroizing;

use crate::core::document::DecryptedEntry;
use crate::error::Result;

/// Output syntax for `bens environment`.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Formatter {
    /// `export NAME="value"`
    #[default]
    Shell,
    /// `$env:NAME = "value"`
    #[value(name = "powershell")]
    PowerShell,
    /// `set "NAME=value"`
    Cmd,
    /// `[{"name": "NAME", "value": "value"}]`
    Json,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    value: &'a str,
}

impl Formatter {
    /// One assignment statement, without a trailing newline.
    ///
    /// For [`Formatter::Json`] this is a single object; [`Formatter::render`]
    /// collects them into an array.
    pub fn assignment(self, name: &str, value: &str) -> String {
        match self {
            Self::Shell => {
                let value = Zeroizing::new(escape(value, '\\', "\\\"$`"));
                format!("export {}=\"{}\"", name, value.as_str())
            }
            Self::PowerShell => {
                let value = Zeroizing::new(escape(value, '`', "`\"$"));
                format!("$env:{} = \"{}\"", name, value.as_str())
            }
            Self::Cmd => format!("set \"{}={}\"", name, value),
            // Serializing two strings can't fail.
            Self::Json => serde_json::to_string(&JsonEntry { name, value }).unwrap_or_default(),
        }
    }

    /// All entries in order, one line each (a single JSON array for
    /// [`Formatter::Json`]).
    ///
    /// # Errors
    ///
    /// Returns an error only if JSON serialization fails.
    pub fn render(self, entries: &[DecryptedEntry]) -> Result<Zeroizing<String>> {
        let mut out = Zeroizing::new(String::new());

        if self == Self::Json {
            let list: Vec<JsonEntry<'_>> = entries
                .iter()
                .map(|e| JsonEntry {
                    name: &e.name,
                    value: &e.value,
                })
                .collect();
            out.push_str(&Zeroizing::new(serde_json::to_string_pretty(&list)?));
            out.push('\n');
            return Ok(out);
        }

        for entry in entries {
            let line = Zeroizing::new(self.assignment(&entry.name, &entry.value));
            // Writing to a String can't fail.
            let _ = writeln!(out, "{}", line.as_str());
        }
        Ok(out)
    }
}

fn escape(value: &str, escape_char: char, special: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if special.contains(ch) {
            out.push(escape_char);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<DecryptedEntry> {
        vec![
            DecryptedEntry {
                name: "FOO".to_string(),
                value: Zeroizing::new("bar".to_string()),
            },
            DecryptedEntry {
                name: "BAZ".to_string(),
                value: Zeroizing::new("qux".to_string()),
            },
        ]
    }

    #[test]
    fn test_plain_assignments() {
        assert_eq!(Formatter::Shell.assignment("FOO", "bar"), "export FOO=\"bar\"");
        assert_eq!(
            Formatter::PowerShell.assignment("FOO", "bar"),
            "$env:FOO = \"bar\""
        );
        assert_eq!(Formatter::Cmd.assignment("FOO", "bar"), "set \"FOO=bar\"");
        assert_eq!(
            Formatter::Json.assignment("FOO", "b\"ar"),
            "{\"name\":\"FOO\",\"value\":\"b\\\"ar\"}"
        );
    }

    #[test]
    fn test_shell_escaping() {
        assert_eq!(
            Formatter::Shell.assignment("X", "a\"b$c`d\\e"),
            "export X=\"a\\\"b\\$c\\`d\\\\e\""
        );
    }

    #[test]
    fn test_powershell_escaping() {
        assert_eq!(
            Formatter::PowerShell.assignment("X", "a\"b$c`d"),
            "$env:X = \"a`\"b`$c``d\""
        );
    }

    #[test]
    fn test_render_keeps_order() {
        let out = Formatter::Shell.render(&entries()).unwrap();
        assert_eq!(out.as_str(), "export FOO=\"bar\"\nexport BAZ=\"qux\"\n");
    }

    #[test]
    fn test_render_json() {
        let out = Formatter::Json.render(&entries()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed[0]["name"], "FOO");
        assert_eq!(parsed[0]["value"], "bar");
        assert_eq!(parsed[1]["name"], "BAZ");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Formatter::Shell.render(&[]).unwrap().as_str(), "");
        assert_eq!(Formatter::Json.render(&[]).unwrap().trim(), "[]");
    }
}
