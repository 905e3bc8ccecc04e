//! Reformat source text of a brace-delimited language: fix spacing, blank
//! lines, and indentation around a configurable grammar of
//! block-introducing keywords, leaving everything else alone.
//!
//! The crate is split the way the work is: [`lexer`] turns text into a
//! flat token sequence, [`printer`] re-emits that sequence under the rules
//! in [`grammar`]. No parsing, no diagnostics: malformed input produces
//! best-effort output, never an error.

pub mod grammar;
pub mod lexer;
pub mod printer;

pub use grammar::DeclarationRule;
pub use lexer::{tokenize, IdentClass, LexOptions, Lexer, Token};
pub use printer::{format, PrettyPrinter};

#[cfg(test)]
mod tests;
