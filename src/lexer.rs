/// Token kinds for the reformatter.
///
/// The unit variants cover the fixed single-character kinds; the engine
/// compares them by value, so one `Token::Semi` is as good as another.
/// The four value-carrying kinds keep the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    // Layout
    Whitespace,
    Newline,

    // Delimiters
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    Semi,

    // Value-carrying
    StringLit(String),   // delimiters included
    Ident(String),
    Comment(String),     // text after the comment marker
    Other(char),
}

impl Token {
    /// Whitespace or newline.
    #[must_use]
    pub fn is_layout(&self) -> bool {
        matches!(self, Token::Whitespace | Token::Newline)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Whitespace => f.write_str(" "),
            Token::Newline => f.write_str("\n"),
            Token::OpenBrace => f.write_str("{"),
            Token::CloseBrace => f.write_str("}"),
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
            Token::Semi => f.write_str(";"),
            Token::StringLit(s) | Token::Ident(s) | Token::Comment(s) => f.write_str(s),
            Token::Other(c) => write!(f, "{c}"),
        }
    }
}

/// Identifier character class.
///
/// The default admits ASCII letters and `_` only. Grammars that name
/// things like `foo2` or `empty?` can widen the continue set; the start
/// set stays fixed.
#[derive(Debug, Clone, Default)]
pub struct IdentClass {
    pub digits: bool,
    pub extra: Vec<char>,
}

impl IdentClass {
    /// Accept ASCII digits after the first character.
    #[must_use]
    pub fn with_digits(mut self) -> Self {
        self.digits = true;
        self
    }

    /// Accept the given characters after the first character.
    #[must_use]
    pub fn with_extra(mut self, chars: &[char]) -> Self {
        self.extra.extend_from_slice(chars);
        self
    }

    fn is_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_continue(&self, ch: char) -> bool {
        self.is_start(ch) || (self.digits && ch.is_ascii_digit()) || self.extra.contains(&ch)
    }
}

/// Lexing options.
#[derive(Debug, Clone, Default)]
pub struct LexOptions {
    /// Collapse each horizontal whitespace run into a single token, and
    /// drop a run that runs up against a newline.
    pub squeeze: bool,
    /// Drop the horizontal whitespace directly following each newline.
    pub trim: bool,
    /// Characters accepted in identifiers.
    pub ident: IdentClass,
}

pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    options: LexOptions,
}

impl Lexer {
    #[must_use]
    pub fn new(input: &str, options: LexOptions) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            options,
        }
    }

    /// Scan the whole input. Never fails: unterminated strings and
    /// comments run to end of input and the tokens produced so far are
    /// returned.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.advance() {
            match ch {
                ' ' | '\t' => {
                    if self.options.squeeze {
                        self.skip_horizontal();
                    }
                    if !self.options.squeeze || self.peek() != Some('\n') {
                        tokens.push(Token::Whitespace);
                    }
                }
                '\n' => {
                    if self.options.trim {
                        self.skip_horizontal();
                    }
                    tokens.push(Token::Newline);
                }
                '{' => tokens.push(Token::OpenBrace),
                '}' => tokens.push(Token::CloseBrace),
                '(' => tokens.push(Token::OpenParen),
                ')' => tokens.push(Token::CloseParen),
                '/' => {
                    if self.peek() == Some('/') {
                        let text = self.line_comment();
                        tokens.push(Token::Comment(text));
                    } else if self.peek() == Some('*') {
                        let text = self.block_comment();
                        tokens.push(Token::Comment(text));
                    } else {
                        // A bare '/' shares the semicolon branch. Historical
                        // behavior, kept for compatibility.
                        tokens.push(Token::Semi);
                    }
                }
                ';' => tokens.push(Token::Semi),
                '\'' | '"' | '`' => {
                    let text = self.string(ch);
                    tokens.push(Token::StringLit(text));
                }
                _ if self.options.ident.is_start(ch) => {
                    let text = self.identifier(ch);
                    tokens.push(Token::Ident(text));
                }
                _ => tokens.push(Token::Other(ch)),
            }
        }

        tokens
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn skip_horizontal(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
    }

    /// Both delimiters end up in the value; an unterminated literal gets
    /// its closing delimiter appended anyway. No escape handling: an
    /// escaped quote terminates the literal early.
    fn string(&mut self, delimiter: char) -> String {
        let mut text = String::from(delimiter);
        while let Some(ch) = self.advance() {
            if ch == delimiter {
                break;
            }
            text.push(ch);
        }
        text.push(delimiter);
        text
    }

    fn identifier(&mut self, first: char) -> String {
        let mut text = String::from(first);
        while let Some(ch) = self.peek() {
            if !self.options.ident.is_continue(ch) {
                break;
            }
            self.pos += 1;
            text.push(ch);
        }
        text
    }

    /// Text after `//`, up to but excluding the newline.
    fn line_comment(&mut self) -> String {
        self.pos += 1; // second '/'
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.pos += 1;
            text.push(ch);
        }
        text
    }

    /// Text after `/*`. The scan stops at the first `*` (not recorded), or
    /// just before a `/`; whatever is left over is re-scanned as ordinary
    /// input. Simplified match, kept for compatibility.
    fn block_comment(&mut self) -> String {
        self.pos += 1; // '*'
        let mut text = String::new();
        while let Some(ch) = self.advance() {
            if ch == '*' || self.peek() == Some('/') {
                break;
            }
            text.push(ch);
        }
        text
    }
}

/// Scan `text` into a flat token sequence.
#[must_use]
pub fn tokenize(text: &str, options: &LexOptions) -> Vec<Token> {
    let mut lexer = Lexer::new(text, options.clone());
    lexer.tokenize()
}
