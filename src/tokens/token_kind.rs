// src/tokens/token_kind.rs
use logos::Logos;

/// Lexical tokens of the surface language.
///
/// Integer literals are parsed eagerly into `i64`; `no leading zero except
/// literal 0` is enforced by the regex itself (`0` or `[1-9][0-9]*`), so a
/// malformed literal like `01` never reaches this enum - it lexes as two
/// separate `0` and `1` tokens, which the parser then rejects as a syntax
/// error at the unexpected second integer.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    #[regex(r"0|[1-9][0-9]*", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[token("int")]
    KwInt,
    #[token("return")]
    KwReturn,
    #[token("if")]
    KwIf,
    #[token("else")]
    KwElse,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    Le,
    #[token("<")]
    Lt,
    #[token(">=")]
    Ge,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("!")]
    Bang,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,

    #[regex(r"#\s*showGraph")]
    PragmaShowGraph,
    #[regex(r"#\s*disablePeephole")]
    PragmaDisablePeephole,

    /// Synthesized once at the end of the token stream; never produced by
    /// the logos lexer itself.
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::KwInt => write!(f, "int"),
            Self::KwReturn => write!(f, "return"),
            Self::KwIf => write!(f, "if"),
            Self::KwElse => write!(f, "else"),
            Self::Ident(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::EqEq => write!(f, "=="),
            Self::NotEq => write!(f, "!="),
            Self::Le => write!(f, "<="),
            Self::Lt => write!(f, "<"),
            Self::Ge => write!(f, ">="),
            Self::Gt => write!(f, ">"),
            Self::Eq => write!(f, "="),
            Self::Bang => write!(f, "!"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Semicolon => write!(f, ";"),
            Self::PragmaShowGraph => write!(f, "#showGraph"),
            Self::PragmaDisablePeephole => write!(f, "#disablePeephole"),
            Self::Eof => write!(f, "<eof>"),
        }
    }
}
