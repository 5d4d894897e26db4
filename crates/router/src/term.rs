use std::fmt;

/// Trimmed, non-empty lookup text.
///
/// The router only accepts a `SearchTerm`, so raw input never reaches a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `%term%` with SOQL string and wildcard metacharacters escaped.
    pub fn like_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.0.len() + 2);
        escaped.push('%');
        for ch in self.0.chars() {
            match ch {
                '\\' | '\'' | '%' | '_' => {
                    escaped.push('\\');
                    escaped.push(ch);
                }
                '\n' | '\r' | '\t' => escaped.push(' '),
                _ => escaped.push(ch),
            }
        }
        escaped.push('%');
        escaped
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
