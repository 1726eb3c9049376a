//! Tokenizer for the policy-text subset the console reads and writes.
//!
//! The lexer is context-free except in one place: a `{` that directly follows
//! `when` or `unless` opens a condition block, and everything up to the
//! matching `}` is emitted as a single [`TokenKind::Body`] token. Bodies are
//! expression text the codec never interprets, so they are never tokenized.

use std::fmt::{Display, Formatter, Result as FmtResult};

use tracing::trace;

use crate::error::LexError;

/// Words that never lex as identifiers.
pub(crate) const KEYWORDS: [&str; 9] = [
    "permit",
    "forbid",
    "principal",
    "action",
    "resource",
    "when",
    "unless",
    "in",
    "not",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Permit,
    Forbid,
    Principal,
    Action,
    Resource,
    When,
    Unless,
    In,
    Not,
    /// Namespace-qualified name, e.g. `User` or `Ns::Document`.
    Ident(String),
    /// String literal with escapes resolved.
    Str(String),
    /// Raw text of a condition block, between its braces.
    Body(String),
    PathSep,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semi,
    EqEq,
    NotEq,
    Eof,
}

impl TokenKind {
    fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "permit" => TokenKind::Permit,
            "forbid" => TokenKind::Forbid,
            "principal" => TokenKind::Principal,
            "action" => TokenKind::Action,
            "resource" => TokenKind::Resource,
            "when" => TokenKind::When,
            "unless" => TokenKind::Unless,
            "in" => TokenKind::In,
            "not" => TokenKind::Not,
            _ => return None,
        };
        Some(kind)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TokenKind::Permit => write!(f, "'permit'"),
            TokenKind::Forbid => write!(f, "'forbid'"),
            TokenKind::Principal => write!(f, "'principal'"),
            TokenKind::Action => write!(f, "'action'"),
            TokenKind::Resource => write!(f, "'resource'"),
            TokenKind::When => write!(f, "'when'"),
            TokenKind::Unless => write!(f, "'unless'"),
            TokenKind::In => write!(f, "'in'"),
            TokenKind::Not => write!(f, "'not'"),
            TokenKind::Ident(name) => write!(f, "identifier '{name}'"),
            TokenKind::Str(value) => write!(f, "string {value:?}"),
            TokenKind::Body(_) => write!(f, "condition body"),
            TokenKind::PathSep => write!(f, "'::'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semi => write!(f, "';'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// Split policy text into tokens, ending with [`TokenKind::Eof`].
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(src).run()
}

/// Byte offset of the `}` that closes a block whose body starts at `start`.
///
/// Nested braces are counted; braces inside string literals are skipped.
/// Returns `None` if the input ends first.
pub(crate) fn find_block_end(src: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in src[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' if depth == 0 => return Some(start + i),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer {
            src,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.peek() {
            let offset = self.pos;
            if c.is_whitespace() {
                self.bump();
                continue;
            }
            let kind = match c {
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '}' => self.single(TokenKind::RBrace),
                ',' => self.single(TokenKind::Comma),
                ';' => self.single(TokenKind::Semi),
                '{' => {
                    self.bump();
                    let opens_condition = matches!(
                        self.tokens.last().map(|t| &t.kind),
                        Some(TokenKind::When | TokenKind::Unless)
                    );
                    if opens_condition {
                        self.push(TokenKind::LBrace, offset);
                        self.condition_body(offset)?;
                        continue;
                    }
                    TokenKind::LBrace
                }
                '=' => self.pair('=', TokenKind::EqEq)?,
                '!' => self.pair('=', TokenKind::NotEq)?,
                ':' => self.pair(':', TokenKind::PathSep)?,
                '"' => self.string()?,
                c if is_ident_start(c) => self.word(),
                character => return Err(LexError::UnexpectedCharacter { character, offset }),
            };
            self.push(kind, offset);
        }
        self.push(TokenKind::Eof, self.src.len());
        trace!(event = "Policy", phase = "Lex", tokens = self.tokens.len());
        Ok(self.tokens)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, offset: usize) {
        self.tokens.push(Token { kind, offset });
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    /// Two-character punctuation; the first character alone is not a token.
    fn pair(&mut self, second: char, kind: TokenKind) -> Result<TokenKind, LexError> {
        let offset = self.pos;
        let first = self.bump().unwrap_or(second);
        if self.peek() == Some(second) {
            self.bump();
            Ok(kind)
        } else {
            Err(LexError::UnexpectedCharacter {
                character: first,
                offset,
            })
        }
    }

    fn eat_ident(&mut self) {
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
    }

    /// A keyword or a `::`-joined identifier. A `::` only joins when another
    /// identifier follows it, so `User::"alice"` lexes as `User`, `::`, string.
    fn word(&mut self) -> TokenKind {
        let start = self.pos;
        self.eat_ident();
        while self.rest().starts_with("::")
            && self.rest()[2..].chars().next().is_some_and(is_ident_start)
        {
            self.pos += 2;
            self.eat_ident();
        }
        let text = &self.src[start..self.pos];
        TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Ident(text.to_string()))
    }

    fn string(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();
        loop {
            let at = self.pos;
            match self.bump() {
                None => return Err(LexError::UnterminatedString { offset: start }),
                Some('"') => return Ok(TokenKind::Str(value)),
                Some('\\') => value.push(self.escape(at, start)?),
                Some(c) => value.push(c),
            }
        }
    }

    fn escape(&mut self, at: usize, start: usize) -> Result<char, LexError> {
        let c = self
            .bump()
            .ok_or(LexError::UnterminatedString { offset: start })?;
        match c {
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            '0' => Ok('\0'),
            '\\' | '"' | '\'' => Ok(c),
            'u' => self.unicode_escape(at),
            other => Err(LexError::InvalidEscape {
                sequence: format!("\\{other}"),
                offset: at,
            }),
        }
    }

    /// `\u{...}` with one to six hex digits.
    fn unicode_escape(&mut self, at: usize) -> Result<char, LexError> {
        let invalid = |lexer: &Self| LexError::InvalidEscape {
            sequence: lexer.src[at..lexer.pos].to_string(),
            offset: at,
        };
        if self.peek() != Some('{') {
            return Err(invalid(self));
        }
        self.bump();
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.bump();
        }
        let digits = &self.src[digits_start..self.pos];
        if digits.is_empty() || digits.len() > 6 || self.peek() != Some('}') {
            return Err(invalid(self));
        }
        self.bump();
        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| invalid(self))
    }

    fn condition_body(&mut self, open: usize) -> Result<(), LexError> {
        let start = self.pos;
        let end = find_block_end(self.src, start)
            .ok_or(LexError::UnterminatedCondition { offset: open })?;
        self.push(TokenKind::Body(self.src[start..end].to_string()), start);
        self.pos = end + 1;
        self.push(TokenKind::RBrace, end);
        Ok(())
    }
}
