//! CSS-like selector parsing for widget queries.
//!
//! Supports:
//! - `"button"`, `"span"`, `"RemovableChip"` - by tag or brick name (case-insensitive)
//! - `"[data-testid='login']"` - by test ID
//! - `"[aria-label='Remove repo-a']"` - by accessible name
//! - `"chip button"` - descendant combinator
//! - `"chip > span"` - child combinator

use tessera_core::Widget;
use thiserror::Error;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by tag or brick name
    Type(String),
    /// Match by test ID (e.g., `[data-testid='foo']`)
    TestId(String),
    /// Match by attribute (e.g., `[aria-label='foo']`)
    Attribute {
        /// Attribute name
        name: String,
        /// Expected value
        value: String,
    },
    /// Descendant combinator: (ancestor, target)
    Descendant(Box<Selector>, Box<Selector>),
    /// Child combinator: (parent, target)
    Child(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches a widget, ignoring its ancestors.
    #[must_use]
    pub fn matches(&self, widget: &dyn Widget) -> bool {
        self.matches_path(&[widget])
    }

    /// Check if this selector matches the last widget of `path`, where
    /// `path` runs from the root down to the candidate.
    #[must_use]
    pub fn matches_path(&self, path: &[&dyn Widget]) -> bool {
        let Some((widget, ancestors)) = path.split_last() else {
            return false;
        };

        match self {
            Self::Type(name) => {
                widget.tag_name().eq_ignore_ascii_case(name)
                    || widget.brick_name().eq_ignore_ascii_case(name)
            }
            Self::TestId(id) => widget.test_id() == Some(id.as_str()),
            Self::Attribute { name, value } => match name.as_str() {
                "data-testid" => widget.test_id() == Some(value.as_str()),
                "aria-label" => widget.accessible_name() == Some(value.as_str()),
                _ => false,
            },
            Self::Child(parent, target) => {
                target.matches_path(path) && !ancestors.is_empty() && parent.matches_path(ancestors)
            }
            Self::Descendant(ancestor, target) => {
                target.matches_path(path)
                    && (1..=ancestors.len()).any(|end| ancestor.matches_path(&ancestors[..end]))
            }
        }
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        if self.peek_char().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selector = self.parse_simple()?;
        loop {
            let had_space = self.skip_whitespace();
            match self.peek_char() {
                None => return Ok(selector),
                Some('>') => {
                    self.advance();
                    self.skip_whitespace();
                    if self.peek_char().is_none() {
                        return Err(SelectorError::DanglingCombinator);
                    }
                    let target = self.parse_simple()?;
                    selector = Selector::Child(Box::new(selector), Box::new(target));
                }
                Some(_) if had_space => {
                    let target = self.parse_simple()?;
                    selector = Selector::Descendant(Box::new(selector), Box::new(target));
                }
                Some(c) => return Err(SelectorError::UnexpectedChar(c)),
            }
        }
    }

    fn parse_simple(&mut self) -> Result<Selector, SelectorError> {
        let first = self.peek_char().ok_or(SelectorError::Empty)?;

        match first {
            '[' => self.parse_attribute(),
            _ if first.is_alphabetic() => Ok(Selector::Type(self.read_identifier()?)),
            _ => Err(SelectorError::UnexpectedChar(first)),
        }
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // '['

        let name = self.read_until_any(&['=', ']']).trim().to_string();
        if name.is_empty() || self.peek_char() != Some('=') {
            return Err(SelectorError::InvalidAttribute);
        }
        self.advance(); // '='

        let value = match self.peek_char() {
            Some(quote @ ('\'' | '"')) => {
                self.advance();
                let value = self.read_until_any(&[quote]);
                if self.peek_char() != Some(quote) {
                    return Err(SelectorError::UnclosedAttribute);
                }
                self.advance();
                value
            }
            _ => self.read_until_any(&[']']).trim().to_string(),
        };

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        if name == "data-testid" {
            Ok(Selector::TestId(value))
        } else {
            Ok(Selector::Attribute { name, value })
        }
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    /// Returns true if any whitespace was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
        self.pos != start
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket or quote
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
    /// `>` with nothing after it
    #[error("combinator without a target")]
    DanglingCombinator,
}
