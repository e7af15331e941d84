//! Glob-style pattern matching for tag and key enumeration.
//!
//! Supports the forms the store-native enumeration commands use: `*` matches
//! any run of characters, `?` matches one character, `[...]` matches a
//! character class (with `!` or `^` negation), and `\` escapes the next
//! character. Patterns compile once to an anchored regex and are reused
//! across scan pages.

use regex::Regex;

use crate::error::ValidationError;

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compile a glob pattern.
    ///
    /// Fails with [`ValidationError::InvalidPattern`] on a trailing escape
    /// or an unterminated character class.
    pub fn new(pattern: &str) -> Result<Self, ValidationError> {
        let translated = translate(pattern)?;
        let regex = Regex::new(&translated).map_err(|e| ValidationError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The original glob source.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the whole candidate matches the pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

/// Translate a glob into an anchored regex source string.
fn translate(pattern: &str) -> Result<String, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("\\A");

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '\\' => match chars.next() {
                Some(escaped) => out.push_str(&regex::escape(&escaped.to_string())),
                None => return Err(invalid("trailing escape")),
            },
            '[' => {
                out.push('[');
                if matches!(chars.peek(), Some('!') | Some('^')) {
                    chars.next();
                    out.push('^');
                }
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    match inner {
                        ']' => {
                            out.push(']');
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some(escaped) => {
                                out.push_str(&regex::escape(&escaped.to_string()))
                            }
                            None => return Err(invalid("trailing escape")),
                        },
                        // Regex set operators would change meaning inside
                        // the class; globs treat them as plain characters.
                        '&' | '~' | '[' => {
                            out.push('\\');
                            out.push(inner);
                        }
                        // Ranges like a-z pass through untouched.
                        _ => out.push(inner),
                    }
                }
                if !closed {
                    return Err(invalid("unterminated character class"));
                }
            }
            _ => out.push_str(&regex::escape(&c.to_string())),
        }
    }

    out.push_str("\\z");
    Ok(out)
}
