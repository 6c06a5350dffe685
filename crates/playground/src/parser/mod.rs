//! Parser module for Playground
//!
//! Command lines are a flat word list: no pipes, no `;`, no expansion. The lexer
//! produces words and [`Args`] classifies them into flags and operands.
//! Redirection operators (`>`, `>>`, `<`) stay ordinary words and are interpreted
//! by the few builtins that honour them.

mod args;
mod lexer;

pub use args::{Args, Flag, FlagSet};
pub use lexer::{Lexer, tokenize};
