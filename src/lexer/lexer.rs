use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, TokenSource, RESERVED_LOOKUP};

/// Handles one regex match. Returns `None` when the matched text produces
/// no token (whitespace, comments).
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order; multi-character operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^(?s)/\\*.*?\\*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^/\\*").unwrap(), handler: unterminated_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^(?s)\"([^\"\\\\]|\\\\.)*\"").unwrap(), handler: text_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: unterminated_handler },
        RegexPattern { regex: Regex::new("^\\.\\.\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Spread, "...") },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new("^\\?\\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::IfNull, "??") },
        RegexPattern { regex: Regex::new("^\\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Nullable, "?") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++") },
        RegexPattern { regex: Regex::new("^--").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
    ];
}

/// On-demand tokenizer over a source string.
///
/// Tokens are produced one at a time through [`TokenSource::next_token`];
/// nothing is buffered ahead of the caller.
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            line: 1,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    /// Advances past `text`, counting the newlines it contains.
    pub fn advance_over(&mut self, text: &str) {
        self.line += text.matches('\n').count() as u32;
        self.advance_n(text.len());
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    fn lex_one(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return MK_TOKEN!(TokenKind::EOF, String::new(), self.line);
            }

            let mut produced = None;
            let mut matched_any = false;

            for pattern in PATTERNS.iter() {
                if let Some(found) = pattern.regex.find(self.remainder()) {
                    let matched = found.as_str().to_string();
                    produced = (pattern.handler)(self, &matched);
                    matched_any = true;
                    break;
                }
            }

            if let Some(token) = produced {
                return token;
            }

            if !matched_any {
                let unknown = self.remainder().chars().next().unwrap_or_default();
                self.advance_n(unknown.len_utf8());
                return MK_TOKEN!(TokenKind::Invalid, unknown.to_string(), self.line);
            }
        }
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        let token = self.lex_one();
        trace!(kind = %token.kind, value = %token.value, line = token.line, "token");
        token
    }

    fn current_line(&self) -> u32 {
        self.line
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_over(matched);
    None
}

fn unterminated_handler(lexer: &mut Lexer, _matched: &str) -> Option<Token> {
    let rest = lexer.remainder().to_string();
    lexer.advance_over(&rest);
    Some(MK_TOKEN!(TokenKind::UnexpectedEof, String::new(), lexer.line))
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());

    // Literals are 32-bit; anything wider is a malformed lexeme.
    let kind = if matched.parse::<i32>().is_ok() {
        TokenKind::Number
    } else {
        TokenKind::Invalid
    };

    Some(MK_TOKEN!(kind, matched.to_string(), lexer.line))
}

fn text_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let line = lexer.line;
    lexer.advance_over(matched);

    let string_literal = &matched[1..matched.len() - 1];
    let mut result = String::new();
    let mut chars = string_literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('0') => result.push('\0'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(other) => {
                    // Unknown escapes keep their backslash
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    Some(MK_TOKEN!(TokenKind::Text, result, line))
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());

    if let Some(kind) = RESERVED_LOOKUP.get(matched) {
        Some(MK_TOKEN!(*kind, matched.to_string(), lexer.line))
    } else {
        Some(MK_TOKEN!(TokenKind::Name, matched.to_string(), lexer.line))
    }
}

/// Tokenizes the whole source eagerly, failing on the first malformed lexeme.
///
/// The returned vector always ends with an `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let position = Position(token.line, lex.get_file());

        match token.kind {
            TokenKind::Invalid => {
                return Err(Error::new(ErrorImpl::LexicalError { token: token.value }, position));
            }
            TokenKind::UnexpectedEof => {
                return Err(Error::new(ErrorImpl::UnexpectedEndOfInput, position));
            }
            TokenKind::EOF => {
                tokens.push(token);
                return Ok(tokens);
            }
            _ => tokens.push(token),
        }
    }
}
