//! HTML tokenization.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This is intentionally far simpler than the WHATWG state machine: a single
//! pass with a boolean *in-tag* state. Everything between `<` and `>` is a
//! tag's raw content; everything outside is text. Entities, CDATA, and
//! script/style raw-text modes are not handled.

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of characters outside any tag.
    Text(String),
    /// The raw content between `<` and `>`, e.g. `div class=x` or `/div`.
    Tag(String),
}

/// Single-pass HTML tokenizer.
pub struct HTMLTokenizer {
    input: String,
    tokens: Vec<Token>,
}

impl HTMLTokenizer {
    /// Create a tokenizer over an HTML source string.
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            input,
            tokens: Vec::new(),
        }
    }

    /// Run the tokenizer over the whole input.
    pub fn run(&mut self) {
        let mut buffer = String::new();
        let mut in_tag = false;

        for c in self.input.chars() {
            match c {
                '<' => {
                    in_tag = true;
                    if !buffer.is_empty() {
                        self.tokens.push(Token::Text(std::mem::take(&mut buffer)));
                    }
                }
                '>' => {
                    in_tag = false;
                    self.tokens.push(Token::Tag(std::mem::take(&mut buffer)));
                }
                _ => buffer.push(c),
            }
        }

        // Leftover text after the last tag is still content. A dangling
        // unterminated tag is dropped, matching the in-tag scan model.
        if !in_tag && !buffer.is_empty() {
            self.tokens.push(Token::Text(buffer));
        }
    }

    /// Consume the tokenizer and return its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}
