//! CSS parsing.
//!
//! [CSS Syntax § 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing)
//!
//! A tolerant recursive-descent parser over a character index. Error
//! recovery follows the CSS tradition of skipping to a synchronization
//! point: a bad declaration skips to the next `;` or `}`, a bad rule skips
//! to the next `}`. Parsing only stops early when no `}` remains.

use thiserror::Error;

use crate::selector::Selector;

/// Internal parse failure; always consumed by the recovery paths, never
/// surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected} at index {index}")]
pub struct CssSyntaxError {
    /// What the parser was looking for.
    expected: String,
    /// Character index where it failed.
    index: usize,
}

/// A single `name: value` declaration. Names are lowercased; values keep
/// their raw token text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub name: String,
    /// Raw value text.
    pub value: String,
}

/// One style rule: a selector and its declaration block.
#[derive(Debug, Clone)]
pub struct Rule {
    /// The rule's selector.
    pub selector: Selector,
    /// Declarations in source order; a later duplicate of the same property
    /// has already overwritten the earlier one.
    pub declarations: Vec<Declaration>,
}

/// An ordered list of rules from one stylesheet.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    /// Rules in source order.
    pub rules: Vec<Rule>,
}

/// Recursive-descent CSS parser.
pub struct CSSParser {
    input: Vec<char>,
    index: usize,
}

impl CSSParser {
    /// Create a parser over a CSS source string.
    #[must_use]
    pub fn new(css: &str) -> Self {
        Self {
            input: css.chars().collect(),
            index: 0,
        }
    }

    /// The character at the cursor, if any.
    fn peek(&self) -> Option<char> {
        self.input.get(self.index).copied()
    }

    /// Advance over any run of whitespace.
    fn whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.index += 1;
        }
    }

    /// Parse a word: one or more characters from `[A-Za-z0-9#\-.%]`
    /// (alphanumerics per Unicode, plus the literal symbol set).
    ///
    /// Covers property names (`background-color`), keywords (`bold`),
    /// hex colors (`#ff0000`), and dimensions (`16px`, `150%`, `-1.5`).
    fn word(&mut self) -> Result<String, CssSyntaxError> {
        let start = self.index;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || "#-.%".contains(c) {
                self.index += 1;
            } else {
                break;
            }
        }
        if self.index == start {
            return Err(CssSyntaxError {
                expected: "a word".to_string(),
                index: self.index,
            });
        }
        Ok(self.input[start..self.index].iter().collect())
    }

    /// Assert that the next characters equal `literal` and advance past it.
    fn literal(&mut self, literal: &str) -> Result<(), CssSyntaxError> {
        let end = self.index + literal.chars().count();
        let matches = end <= self.input.len()
            && self.input[self.index..end].iter().copied().eq(literal.chars());
        if !matches {
            return Err(CssSyntaxError {
                expected: format!("{literal:?}"),
                index: self.index,
            });
        }
        self.index = end;
        Ok(())
    }

    /// Parse `word ws ":" ws word` into a lowercased name and raw value.
    fn pair(&mut self) -> Result<(String, String), CssSyntaxError> {
        let name = self.word()?;
        self.whitespace();
        self.literal(":")?;
        self.whitespace();
        let value = self.word()?;
        Ok((name.to_lowercase(), value))
    }

    /// Skip ahead until one of `chars` is found; returns the found
    /// character without consuming it, or `None` at end of input.
    fn ignore_until(&mut self, chars: &[char]) -> Option<char> {
        while let Some(c) = self.peek() {
            if chars.contains(&c) {
                return Some(c);
            }
            self.index += 1;
        }
        None
    }

    /// Parse a declaration block up to an unconsumed `}` or end of input.
    ///
    /// Malformed declarations skip to the next `;` (and continue) or `}`
    /// (and stop). A duplicate property overwrites the earlier value in
    /// place, preserving first-insertion order.
    pub fn body(&mut self) -> Vec<Declaration> {
        let mut declarations: Vec<Declaration> = Vec::new();
        while self.peek().is_some_and(|c| c != '}') {
            if self.declaration(&mut declarations).is_err() {
                match self.ignore_until(&[';', '}']) {
                    Some(';') => {
                        self.index += 1;
                        self.whitespace();
                    }
                    _ => break,
                }
            }
        }
        declarations
    }

    /// One `pair ws ";" ws` step of [`body`](Self::body). The pair is
    /// recorded before the `;` is required, so a final declaration without
    /// a trailing semicolon still takes effect.
    fn declaration(&mut self, declarations: &mut Vec<Declaration>) -> Result<(), CssSyntaxError> {
        let (name, value) = self.pair()?;
        if let Some(existing) = declarations.iter_mut().find(|d| d.name == name) {
            existing.value = value;
        } else {
            declarations.push(Declaration { name, value });
        }
        self.whitespace();
        self.literal(";")?;
        self.whitespace();
        Ok(())
    }

    /// Parse a selector: a tag word followed by zero or more
    /// whitespace-separated tag words before `{`. Multiple words form a
    /// descendant chain in source order, subject rightmost.
    fn selector(&mut self) -> Result<Selector, CssSyntaxError> {
        let mut parts = vec![self.word()?.to_lowercase()];
        self.whitespace();
        while self.peek().is_some_and(|c| c != '{') {
            parts.push(self.word()?.to_lowercase());
            self.whitespace();
        }
        Ok(if parts.len() == 1 {
            Selector::Tag(parts.remove(0))
        } else {
            Selector::Descendant(parts)
        })
    }

    /// `ws selector "{" ws body "}"`.
    fn rule(&mut self) -> Result<Rule, CssSyntaxError> {
        self.whitespace();
        let selector = self.selector()?;
        self.literal("{")?;
        self.whitespace();
        let declarations = self.body();
        self.literal("}")?;
        Ok(Rule {
            selector,
            declarations,
        })
    }

    /// Parse the whole stylesheet. A failed rule skips to the next `}` and
    /// parsing continues; when no `}` remains the stream ends.
    #[must_use]
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        let mut rules = Vec::new();
        while self.index < self.input.len() {
            match self.rule() {
                Ok(rule) => rules.push(rule),
                Err(_) => match self.ignore_until(&['}']) {
                    Some('}') => {
                        self.index += 1;
                        self.whitespace();
                    }
                    _ => break,
                },
            }
        }
        Stylesheet { rules }
    }
}
