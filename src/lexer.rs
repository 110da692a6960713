// src/lexer.rs
//! Turns source text into a stream of [`Token`]s using a `logos`-generated
//! scanner, grounded on `jsavrs::lexer::Lexer`.
use crate::error::compile_error::CompileError;
use crate::location::Span;
use crate::tokens::{Token, TokenKind};
use logos::Logos;

pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    source_len: usize,
    eof_emitted: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { inner: TokenKind::lexer(source), source_len: source.len(), eof_emitted: false }
    }

    /// Returns the next token, or `None` once the synthesized `Eof` token has
    /// already been emitted.
    pub fn next_token(&mut self) -> Option<Result<Token, CompileError>> {
        if self.eof_emitted {
            return None;
        }
        let Some(result) = self.inner.next() else {
            self.eof_emitted = true;
            let span = Span::at(self.source_len);
            return Some(Ok(Token::new(TokenKind::Eof, span)));
        };
        let range = self.inner.span();
        let span = Span::new(range.start, range.end);
        Some(match result {
            Ok(kind) => Ok(Token::new(kind, span)),
            Err(()) => Err(CompileError::syntax(format!("invalid token {:?}", self.inner.slice()), span)),
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenizes the full source, separating valid tokens from lexer errors.
#[must_use]
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<CompileError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    while let Some(result) = lexer.next_token() {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }
    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_a_simple_return() {
        let (tokens, errors) = tokenize("return 1;");
        assert!(errors.is_empty());
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::KwReturn, TokenKind::Int(1), TokenKind::Semicolon, TokenKind::Eof]);
    }

    #[test]
    fn keywords_take_priority_over_identifiers() {
        let (tokens, _) = tokenize("int a = 1;");
        assert_eq!(tokens[0].kind, TokenKind::KwInt);
        assert_eq!(tokens[1].kind, TokenKind::Ident("a".to_owned()));
    }

    #[test]
    fn recognises_pragmas() {
        let (tokens, errors) = tokenize("# showGraph\n#disablePeephole");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::PragmaShowGraph);
        assert_eq!(tokens[1].kind, TokenKind::PragmaDisablePeephole);
    }

    #[test]
    fn reports_invalid_tokens_as_syntax_errors() {
        let (_, errors) = tokenize("return 1 @ 2;");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], CompileError::Syntax { .. }));
    }
}
