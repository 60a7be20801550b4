use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::{parser::core::ParseResult, value::core::Kind},
};

/// Represents a lexical token in the source input.
///
/// Two-character operators are listed next to their one-character prefixes;
/// logos always prefers the longest match, so `==` never lexes as two `=`.
/// Every maximal run of characters outside the operator, punctuation, quote
/// and whitespace set becomes a [`Token::Word`]: numbers, identifiers and
/// constants are told apart by the parser.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Double-quoted text, without the quotes.
    #[regex(r#""[^"]*""#, parse_text, allow_greedy = true)]
    Text(String),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// A type keyword: `number`, `boolean` or `string`.
    #[token("number", |_| Kind::Number)]
    #[token("boolean", |_| Kind::Boolean)]
    #[token("string", |_| Kind::Text)]
    TypeName(Kind),
    /// `function`
    #[token("function")]
    Function,
    /// `let`
    #[token("let")]
    Let,
    /// `in`
    #[token("in")]
    In,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `:=`
    #[token(":=")]
    ColonEquals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `@@`
    #[token("@@")]
    DoubleAt,
    /// `=`
    #[token("=")]
    Equals,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `@`
    #[token("@")]
    At,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// Identifiers, numbers and constants such as `x`, `2.5` or `π`.
    #[regex(r#"[^ \t\r\n\f"(),;:=<>!&|@+\-*/%\^]+"#, |lex| lex.slice().to_string(), allow_greedy = true)]
    Word(String),
    /// Spaces, tabs and line breaks.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Returns `true` if the token can end an operand, which makes a
    /// following `+` or `-` binary rather than unary.
    #[must_use]
    pub const fn ends_operand(&self) -> bool {
        matches!(self,
                 Self::Word(_) | Self::Text(_) | Self::Bool(_) | Self::RParen)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lexeme = match self {
            Self::Text(text) => return write!(f, "\"{text}\""),
            Self::Word(word) => return write!(f, "{word}"),
            Self::Bool(b) => return write!(f, "{b}"),
            Self::TypeName(kind) => return write!(f, "{kind}"),
            Self::Function => "function",
            Self::Let => "let",
            Self::In => "in",
            Self::If => "if",
            Self::Else => "else",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Arrow => "=>",
            Self::ColonEquals => ":=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::DoubleAmpersand => "&&",
            Self::DoublePipe => "||",
            Self::DoubleAt => "@@",
            Self::Equals => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Bang => "!",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::At => "@",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Ignored => "",
        };
        write!(f, "{lexeme}")
    }
}

/// Turns a source line into its ordered list of tokens.
///
/// No semantic validation happens here; a malformed number or identifier is
/// still a [`Token::Word`] and is rejected by the parser. Only text that
/// starts no token at all, such as an unterminated `"`, is an error.
///
/// # Example
/// ```
/// use hulk::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x := 2>=1").unwrap();
/// assert_eq!(tokens,
///            vec![Token::Word("x".to_string()),
///                 Token::ColonEquals,
///                 Token::Word("2".to_string()),
///                 Token::GreaterEqual,
///                 Token::Word("1".to_string())]);
///
/// assert!(tokenize("print(\"open)").is_err());
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let Ok(token) = token else {
            return Err(ParseError::UnrecognizedToken { fragment: lexer.slice().to_string() });
        };
        tokens.push(token);
    }

    Ok(tokens)
}

/// Strips the surrounding quotes from a text literal.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The characters between the quotes.
fn parse_text(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(true)` if the slice is `"true"`.
/// - `Some(false)` if the slice is `"false"`.
/// - `None` otherwise.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
