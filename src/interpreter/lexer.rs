use std::fmt;

use logos::Logos;
use tracing::trace;

use crate::error::LexError;

/// The category of a lexical token.
///
/// Every recognised lexeme maps onto exactly one kind. Keywords are matched as
/// literal tokens, which logos prefers over the identifier pattern whenever
/// both match the same text, so `print` is a keyword while `printer` is an
/// identifier.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Float literal tokens, such as `3.14`. A dot must be followed by a digit.
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+")]
    Integer,
    /// String literal tokens, such as `"hello"`. No escape sequences.
    #[regex(r#""[^"]*""#, allow_greedy = true)]
    String,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// `print`
    #[token("print")]
    Print,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `end`
    #[token("end")]
    End,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `function`
    #[token("function")]
    Function,
    /// `return`
    #[token("return")]
    Return,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `null`
    #[token("null")]
    Null,
    /// `int`
    #[token("int")]
    Int,
    /// `float`
    #[token("float")]
    FloatCast,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    StarStar,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `|`
    #[token("|")]
    Pipe,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Spaces, tabs, feeds and newlines.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
    /// End of input. Never produced by logos itself; appended by [`tokenize`].
    Eof,
}

impl TokenKind {
    /// Returns `true` for kinds that begin a statement.
    #[must_use]
    pub const fn starts_statement(self) -> bool {
        matches!(self,
                 Self::Print
                 | Self::LBrace
                 | Self::If
                 | Self::While
                 | Self::For
                 | Self::Function
                 | Self::Return)
    }

    /// Returns `true` for kinds that open a body closed by `end` or `}`.
    #[must_use]
    pub const fn opens_body(self) -> bool {
        matches!(self, Self::LBrace | Self::If | Self::While | Self::For | Self::Function)
    }

    /// Returns `true` for kinds that close a statement list.
    #[must_use]
    pub const fn closes_body(self) -> bool {
        matches!(self, Self::End | Self::Else | Self::RBrace)
    }
}

/// An inclusive byte range in the source text.
///
/// `start..=end` covers the first and last byte of a lexeme. The end-of-input
/// token is the only empty lexeme; its span has `start == end == len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset of the last byte.
    pub end:   usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// A lexical token: its kind, the exact lexeme, and its source span.
///
/// For string literals `text` holds the raw content between the quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The token category.
    pub kind:  TokenKind,
    /// The lexeme text.
    pub text:  String,
    /// Offset of the first byte of the lexeme.
    pub start: usize,
    /// Offset of the last byte of the lexeme.
    pub end:   usize,
}

impl Token {
    /// Builds a token from its parts.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self { kind,
               text: text.into(),
               start,
               end }
    }

    /// Builds the end-of-input token for a source of `len` bytes.
    #[must_use]
    pub const fn eof(len: usize) -> Self {
        Self { kind:  TokenKind::Eof,
               text:  String::new(),
               start: len,
               end:   len, }
    }

    /// Returns the source span of this token.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span { start: self.start,
               end:   self.end, }
    }

    /// Returns `true` if this token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "<eof>"),
            TokenKind::String => write!(f, "\"{}\"", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Converts source text into a token sequence.
///
/// Scanning is left to right with maximal munch: `**` wins over `*`, `<=` over
/// `<`, `&&` over `&`. Whitespace and `//` comments produce no token. The
/// result always ends with exactly one [`TokenKind::Eof`] token whose span is
/// the empty position at the end of the source.
///
/// # Parameters
/// - `source`: The program text.
///
/// # Returns
/// The tokens in source order.
///
/// # Errors
/// - [`LexError::UnterminatedString`] if a `"` has no closing quote.
/// - [`LexError::UnexpectedCharacter`] for any character that starts no token.
///
/// # Example
/// ```
/// use kestrel::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("x = 2 ** 3; // cube").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::Identifier,
///             TokenKind::Equals,
///             TokenKind::Integer,
///             TokenKind::StarStar,
///             TokenKind::Integer,
///             TokenKind::Semicolon,
///             TokenKind::Eof]);
/// assert_eq!((tokens[3].start, tokens[3].end), (6, 7));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();

        let Ok(kind) = result else {
            return Err(lex_error(slice, span.start));
        };

        let text = match kind {
            TokenKind::String => &slice[1..slice.len() - 1],
            _ => slice,
        };

        tokens.push(Token::new(kind, text, span.start, span.end - 1));
    }

    tokens.push(Token::eof(source.len()));
    trace!(count = tokens.len(), "tokenized source");

    Ok(tokens)
}

/// Classifies a slice logos could not match.
///
/// A failed match that begins with a quote is a string literal missing its
/// closing quote; anything else is a stray character.
fn lex_error(slice: &str, offset: usize) -> LexError {
    match slice.chars().next() {
        Some('"') => LexError::UnterminatedString { offset },
        Some(character) => LexError::UnexpectedCharacter { character,
                                                           offset },
        None => LexError::UnexpectedCharacter { character: '\0',
                                                offset },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(kinds("print printer int float floaty"),
                   [TokenKind::Print,
                    TokenKind::Identifier,
                    TokenKind::Int,
                    TokenKind::FloatCast,
                    TokenKind::Identifier,
                    TokenKind::Eof]);
    }

    #[test]
    fn maximal_munch_on_operators() {
        assert_eq!(kinds("** * << <= < && & || | == = != !"),
                   [TokenKind::StarStar,
                    TokenKind::Star,
                    TokenKind::ShiftLeft,
                    TokenKind::LessEqual,
                    TokenKind::Less,
                    TokenKind::AndAnd,
                    TokenKind::Ampersand,
                    TokenKind::DoublePipe,
                    TokenKind::Pipe,
                    TokenKind::EqualEqual,
                    TokenKind::Equals,
                    TokenKind::BangEqual,
                    TokenKind::Bang,
                    TokenKind::Eof]);
    }

    #[test]
    fn numbers_and_strings_keep_their_lexemes() {
        let tokens = tokenize("12 3.5 \"a b\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].text, "12");
        assert_eq!(tokens[1].kind, TokenKind::Float);
        assert_eq!(tokens[1].text, "3.5");
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].text, "a b");
        assert_eq!(tokens[2].span(), Span { start: 7, end: 11 });
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        assert_eq!(kinds("// nothing here\n\t x // trailing"),
                   [TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn eof_sits_at_source_length() {
        let tokens = tokenize("ab ").unwrap();
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!((eof.start, eof.end), (3, 3));
        assert!(eof.text.is_empty());
        assert_eq!(tokenize("").unwrap().len(), 1);
    }

    #[test]
    fn dot_without_fraction_is_an_error() {
        assert!(tokenize("1.").is_err());
        assert!(tokenize(".5").is_err());
    }

    #[test]
    fn unterminated_string_reports_the_opening_quote() {
        assert_eq!(tokenize("x = \"abc"),
                   Err(LexError::UnterminatedString { offset: 4 }));
    }

    #[test]
    fn stray_character_is_reported() {
        assert_eq!(tokenize("a $ b"),
                   Err(LexError::UnexpectedCharacter { character: '$',
                                                       offset:    2, }));
    }
}
