use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("final", TokenKind::Final);
        map.insert("var", TokenKind::Var);
        map.insert("print", TokenKind::Print);
        map.insert("assert", TokenKind::Assert);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("null", TokenKind::Null);
        map.insert("false", TokenKind::False);
        map.insert("true", TokenKind::True);
        map.insert("read", TokenKind::Read);
        map.insert("random", TokenKind::Random);
        map.insert("length", TokenKind::Length);
        map.insert("keys", TokenKind::Keys);
        map.insert("values", TokenKind::Values);
        map.insert("tobool", TokenKind::ToBool);
        map.insert("toint", TokenKind::ToInt);
        map.insert("tostr", TokenKind::ToStr);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    /// Input ended in the middle of a lexeme.
    UnexpectedEof,
    /// Malformed lexeme.
    Invalid,

    Number,
    Text,
    Name,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    IfNull, // ??

    Spread, // ...
    Semicolon,
    Colon,
    Nullable, // ?
    Comma,

    PlusPlus,
    MinusMinus,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Final,
    Var,
    Print,
    Assert,
    If,
    Else,
    While,
    Do,
    For,
    In,
    Null,
    False,
    True,
    Read,
    Random,
    Length,
    Keys,
    Values,
    ToBool,
    ToInt,
    ToStr,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A lexical unit: category, literal text and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[TokenKind::Text, TokenKind::Name, TokenKind::Number]) {
            println!("{:02}: {} ({})", self.line, self.kind, self.value);
        } else {
            println!("{:02}: {} ()", self.line, self.kind);
        }
    }
}

/// Pull interface between the tokenizer and the parser.
///
/// `next_token` hands out one unit per call and keeps returning `EOF` once
/// the input is exhausted. `current_line` reports the line the source has
/// read up to, which is what diagnostics and node lines are stamped with.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
    fn current_line(&self) -> u32;
}

/// A [`TokenSource`] over an already tokenized sequence.
///
/// Used to feed the grammar synthetic token sequences. An `EOF` is appended
/// when the sequence does not end with one.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    line: u32,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let line = tokens.last().map(|token| token.line).unwrap_or(1);
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::new(),
                line,
            });
        }

        TokenStream {
            tokens: tokens.into_iter(),
            line: 1,
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => {
                self.line = token.line;
                token
            }
            None => Token {
                kind: TokenKind::EOF,
                value: String::new(),
                line: self.line,
            },
        }
    }

    fn current_line(&self) -> u32 {
        self.line
    }
}
