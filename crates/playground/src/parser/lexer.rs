//! Lexer for command lines
//!
//! Splits a single input line into words. Only double quotes are special: a `"`
//! toggles quoting and is dropped, and whitespace inside quotes is kept. An
//! unterminated quote runs to the end of the line. Empty words are discarded,
//! so `""` on its own produces nothing.

/// Lexer for a single command line.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Get the next word, or `None` at end of input.
    pub fn next_word(&mut self) -> Option<String> {
        let mut word = String::new();
        let mut in_quote = false;

        while let Some(ch) = self.chars.next() {
            match ch {
                '"' => in_quote = !in_quote,
                ' ' | '\t' if !in_quote => {
                    if !word.is_empty() {
                        return Some(word);
                    }
                }
                c => word.push(c),
            }
        }

        (!word.is_empty()).then_some(word)
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_word()
    }
}

/// Tokenize a full line.
pub fn tokenize(input: &str) -> Vec<String> {
    Lexer::new(input).collect()
}
