//! Token re-emission engine: normalizes spacing, blank lines, and
//! indentation around a configurable grammar of block-introducing
//! keywords, leaving every other token as it was.
//!
//! The engine walks the token stream once with a cursor, appending to an
//! output buffer. It never fails: unbalanced brackets and truncated input
//! degrade to best-effort output, so the formatter stays usable on code
//! that is mid-edit.

use crate::grammar::{DeclarationRule, Grammar};
use crate::lexer::{tokenize, IdentClass, LexOptions, Token};
use std::fmt::Write;

/// Spaces emitted per indentation level.
const INDENT_WIDTH: i32 = 2;

/// Reformat `text` under `rules`.
///
/// `indent_start` and `indent_end` are the tokens that raise and lower the
/// indentation level (typically `{` and `}`); `body_open` and `body_close`
/// delimit declaration bodies for balanced scanning.
#[must_use]
pub fn format(
    text: &str,
    rules: &[DeclarationRule],
    indent_start: &[Token],
    indent_end: &[Token],
    body_open: Token,
    body_close: Token,
) -> String {
    PrettyPrinter::new(text, rules, indent_start, indent_end, body_open, body_close).run()
}

pub struct PrettyPrinter {
    source: String,
    tokens: Vec<Token>,
    /// Position of the next unread token; `current` is the one before it.
    index: usize,
    current: Option<Token>,
    out: Vec<Token>,
    grammar: Grammar,
    indent_start: Vec<Token>,
    indent_end: Vec<Token>,
    body_open: Token,
    body_close: Token,
    /// Signed: stray close tokens drive it below zero on unbalanced input;
    /// emission clamps at zero.
    level: i32,
    ident: IdentClass,
}

impl PrettyPrinter {
    #[must_use]
    pub fn new(
        text: &str,
        rules: &[DeclarationRule],
        indent_start: &[Token],
        indent_end: &[Token],
        body_open: Token,
        body_close: Token,
    ) -> Self {
        PrettyPrinter {
            source: text.to_string(),
            tokens: Vec::new(),
            index: 0,
            current: None,
            out: Vec::new(),
            grammar: Grammar::new(rules),
            indent_start: indent_start.to_vec(),
            indent_end: indent_end.to_vec(),
            body_open,
            body_close,
            level: 0,
            ident: IdentClass::default(),
        }
    }

    /// Identifier class handed to the lexer; see [`IdentClass`].
    #[must_use]
    pub fn ident_class(mut self, ident: IdentClass) -> Self {
        self.ident = ident;
        self
    }

    /// Tokenize the source and re-emit it, returning the formatted text.
    #[must_use]
    pub fn run(mut self) -> String {
        // Right-trim every line up front (this also strips the \r of CRLF
        // input), then lex with whitespace runs collapsed.
        let stripped = self
            .source
            .split('\n')
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");
        let options = LexOptions {
            squeeze: true,
            trim: true,
            ident: self.ident.clone(),
        };
        self.tokens = tokenize(&stripped, &options);

        while self.not_end() {
            self.advance();
            self.handle_current();
        }

        let mut text = String::new();
        for token in &self.out {
            let _ = write!(text, "{token}");
        }
        text
    }

    // ── Traversal ────────────────────────────────────────────────────

    fn not_end(&self) -> bool {
        self.index < self.tokens.len()
    }

    fn advance(&mut self) {
        self.current = self.tokens.get(self.index).cloned();
        self.index += 1;
    }

    fn look_ahead(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next_is(&self, token: &Token) -> bool {
        self.look_ahead() == Some(token)
    }

    fn at_layout(&self) -> bool {
        self.current.as_ref().is_some_and(Token::is_layout)
    }

    fn skip_layout(&mut self) {
        while self.look_ahead().is_some_and(Token::is_layout) {
            self.advance();
        }
    }

    fn advance_past_layout(&mut self) {
        self.advance();
        if self.at_layout() {
            self.skip_layout();
            self.advance();
        }
    }

    // ── Output handling ──────────────────────────────────────────────

    fn push(&mut self, token: Token) {
        self.out.push(token);
    }

    fn last(&self) -> Option<&Token> {
        self.out.last()
    }

    /// Emit the current token, tracking the indentation level and laying
    /// down leading spaces after a line break.
    fn push_current(&mut self) {
        let Some(token) = self.current.clone() else {
            return;
        };
        self.update_level(&token);
        let broke_line = token == Token::Newline;
        self.push(token);
        if broke_line {
            let next = self.look_ahead().cloned();
            self.indent(next);
        }
    }

    fn update_level(&mut self, token: &Token) {
        if self.indent_start.contains(token) {
            self.level += 1;
        } else if self.indent_end.contains(token) {
            self.level -= 1;
        }
    }

    /// Emit the leading spaces of the line that starts after a just-pushed
    /// newline. `next` is the token expected to follow the break: the
    /// body-close token dedents its line one level, and a whitespace token
    /// already counts for one column.
    fn indent(&mut self, next: Option<Token>) {
        let mut count = self.level * INDENT_WIDTH;
        if next.as_ref() == Some(&self.body_close) {
            count -= INDENT_WIDTH;
        } else if next == Some(Token::Whitespace) {
            count -= 1;
        }
        for _ in 0..count.max(0) {
            self.push(Token::Whitespace);
        }
    }

    /// Retract every pending trailing layout token, including the
    /// indentation laid down after a retracted newline.
    fn drain_layout(&mut self) {
        while self.last().is_some_and(Token::is_layout) {
            self.out.pop();
        }
    }

    fn push_newline_when_next_missing(&mut self) {
        if !self.next_is(&Token::Newline) {
            self.push(Token::Newline);
            let next = self.look_ahead().cloned();
            self.indent(next);
        }
    }

    fn push_newline_when_previous_missing(&mut self) {
        if self.last().is_some_and(|t| *t != Token::Newline) {
            self.push(Token::Newline);
            let next = self.current.clone();
            self.indent(next);
        }
    }

    fn push_space_when_previous_missing(&mut self) {
        if self.last().is_some_and(|t| *t != Token::Whitespace) {
            self.push(Token::Whitespace);
        }
    }

    // ── Handlers ─────────────────────────────────────────────────────

    fn handle_current(&mut self) {
        let Some(current) = self.current.clone() else {
            return;
        };
        match current {
            Token::Whitespace | Token::Newline => {
                self.push_current();
                self.skip_layout();
            }
            Token::Semi => {
                self.push_current();
                self.push_newline_when_next_missing();
            }
            Token::Ident(ref name) if self.grammar.contains(name) => {
                self.handle_standalone_declaration();
            }
            _ => self.push_current(),
        }
    }

    fn current_rule(&self) -> Option<&DeclarationRule> {
        match self.current {
            Some(Token::Ident(ref name)) => self.grammar.get(name),
            _ => None,
        }
    }

    /// Line placement for a declaration keyword met in statement position:
    /// a trailing keyword pulls itself onto the previous line, anything
    /// else starts a line of its own.
    fn handle_standalone_declaration(&mut self) {
        let trailing = self.current_rule().is_some_and(|rule| rule.trailing);
        if trailing {
            self.drain_layout();
            self.push_space_when_previous_missing();
        } else {
            self.push_newline_when_previous_missing();
        }
        self.handle_declaration();
    }

    /// Emit one declaration: keyword, optional name, optional argument
    /// list, then a body, a continuator chain, or nothing at all.
    fn handle_declaration(&mut self) {
        let Some(rule) = self.current_rule().cloned() else {
            return;
        };

        self.push_current(); // keyword
        self.advance_past_layout();
        self.push(Token::Whitespace);

        if !rule.headless {
            if matches!(self.current, Some(Token::Ident(_))) {
                self.push_current(); // declared name
                self.advance_past_layout();
            }
            if self.current == Some(Token::OpenParen) {
                self.handle_args();
            }
        }

        if self.current.as_ref() == Some(&self.body_open) {
            self.handle_body();
        } else if self.at_continuator(&rule) {
            self.handle_declaration();
        } else {
            // The keyword matched but nothing structural follows: step the
            // cursor back so the outer loop reprocesses this token as
            // ordinary content instead of swallowing it.
            self.index -= 1;
        }
    }

    fn at_continuator(&self, rule: &DeclarationRule) -> bool {
        match self.current {
            Some(Token::Ident(ref name)) => {
                rule.continuators.iter().any(|k| k == name) && self.grammar.contains(name)
            }
            _ => false,
        }
    }

    /// Argument list: `(`, balanced contents copied verbatim, `)`, one
    /// separating space.
    fn handle_args(&mut self) {
        self.push_current(); // (
        self.advance_past_layout();
        self.handle_balanced(Token::OpenParen, Token::CloseParen, |p| p.push_current());
        self.push_current(); // )
        self.advance_past_layout();
        self.push(Token::Whitespace);
    }

    /// Body: open token on the header line, balanced contents fully
    /// reformatted, close token on a line of its own.
    fn handle_body(&mut self) {
        self.push_current(); // body open
        self.push_newline_when_next_missing();
        self.advance();
        let open = self.body_open.clone();
        let close = self.body_close.clone();
        self.handle_balanced(open, close, |p| p.handle_current());
        self.push_newline_when_previous_missing();
        self.push_current(); // body close
        self.push_newline_when_next_missing();
    }

    /// Walk a balanced region: `each` runs for every token while the
    /// nesting depth stays positive. On reaching the matching close, the
    /// pending trailing layout is retracted (the close gets a line break
    /// of its own) and the cursor is left on the close token. Unbalanced
    /// input runs to end of input instead.
    fn handle_balanced<F>(&mut self, open: Token, close: Token, mut each: F)
    where
        F: FnMut(&mut Self),
    {
        let mut depth = 1;
        while depth > 0 && self.not_end() {
            if self.current.as_ref() == Some(&open) {
                depth += 1;
            } else if self.current.as_ref() == Some(&close) {
                depth -= 1;
            }

            if depth == 0 {
                self.drain_layout();
            } else {
                each(self);
                self.advance();
            }
        }
    }
}
