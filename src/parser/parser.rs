// src/parser/parser.rs
//! Recursive-descent / precedence-climbing parser for the surface grammar.
//! Grounded on `jsavrs::parser::jsav_parser`, scaled down to this language's
//! much smaller grammar.
use crate::error::CompileError;
use crate::location::Span;
use crate::parser::ast::{BinaryOp, Expr, Stmt, UnaryOp};
use crate::tokens::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_program(&mut self) -> Result<Vec<Stmt>, CompileError> {
        let mut stmts = Vec::new();
        while !self.at_eof() {
            stmts.push(self.parse_statement()?);
        }
        Ok(stmts)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token, CompileError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(CompileError::syntax(format!("expected {kind}, found {}", self.peek().kind), self.peek().span))
        }
    }

    fn parse_statement(&mut self) -> Result<Stmt, CompileError> {
        match &self.peek().kind {
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::KwInt => self.parse_decl(),
            TokenKind::LBrace => self.parse_block(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::Semicolon => {
                let span = self.advance().span;
                Ok(Stmt::Empty { span })
            }
            TokenKind::PragmaShowGraph => {
                let span = self.advance().span;
                Ok(Stmt::ShowGraph { span })
            }
            TokenKind::PragmaDisablePeephole => {
                let span = self.advance().span;
                Ok(Stmt::DisablePeephole { span })
            }
            TokenKind::Ident(_) => self.parse_assign(),
            other => Err(CompileError::syntax(format!("unexpected token {other}"), self.peek().span)),
        }
    }

    fn parse_return(&mut self) -> Result<Stmt, CompileError> {
        let start = self.advance().span; // `return`
        let expr = self.parse_expr()?;
        let end = self.expect(&TokenKind::Semicolon)?.span;
        Ok(Stmt::Return { expr, span: start.merge(end) })
    }

    fn parse_decl(&mut self) -> Result<Stmt, CompileError> {
        let start = self.advance().span; // `int`
        let name = self.parse_ident_name()?;
        self.expect(&TokenKind::Eq)?;
        let expr = self.parse_expr()?;
        let end = self.expect(&TokenKind::Semicolon)?.span;
        Ok(Stmt::Decl { name, expr, span: start.merge(end) })
    }

    fn parse_assign(&mut self) -> Result<Stmt, CompileError> {
        let name_tok = self.advance();
        let TokenKind::Ident(name) = name_tok.kind else { unreachable!("caller checked Ident") };
        self.expect(&TokenKind::Eq)?;
        let expr = self.parse_expr()?;
        let end = self.expect(&TokenKind::Semicolon)?.span;
        Ok(Stmt::Assign { name, expr, span: name_tok.span.merge(end) })
    }

    fn parse_block(&mut self) -> Result<Stmt, CompileError> {
        let start = self.expect(&TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.at_eof() {
                return Err(CompileError::syntax("unterminated block", self.peek().span));
            }
            stmts.push(self.parse_statement()?);
        }
        let end = self.expect(&TokenKind::RBrace)?.span;
        Ok(Stmt::Block { stmts, span: start.merge(end) })
    }

    fn parse_if(&mut self) -> Result<Stmt, CompileError> {
        let start = self.advance().span; // `if`
        self.expect(&TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let then_branch = Box::new(self.parse_statement()?);
        let (else_branch, end) = if self.check(&TokenKind::KwElse) {
            self.advance();
            let else_stmt = self.parse_statement()?;
            let span = else_stmt.span();
            (Some(Box::new(else_stmt)), span)
        } else {
            let span = then_branch.span();
            (None, span)
        };
        Ok(Stmt::If { cond, then_branch, else_branch, span: start.merge(end) })
    }

    fn parse_ident_name(&mut self) -> Result<String, CompileError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Ident(name) => Ok(name),
            other => Err(CompileError::syntax(format!("expected identifier, found {other}"), tok.span)),
        }
    }

    // --- Expressions, loosest-to-tightest: comparisons, + -, * /, unary, primary ---

    fn parse_expr(&mut self) -> Result<Expr, CompileError> {
        self.parse_comparison()
    }

    /// Comparisons are right-associative within their shared precedence
    /// level.
    fn parse_comparison(&mut self) -> Result<Expr, CompileError> {
        let lhs = self.parse_additive()?;
        let op = match &self.peek().kind {
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::Ne,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Le => BinaryOp::Le,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::Ge => BinaryOp::Ge,
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.parse_comparison()?;
        let span = lhs.span().merge(rhs.span());
        Ok(Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), span })
    }

    fn parse_additive(&mut self) -> Result<Expr, CompileError> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, CompileError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_unary()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, CompileError> {
        let op = match &self.peek().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_primary(),
        };
        let start = self.advance().span;
        let operand = self.parse_unary()?;
        let span = start.merge(operand.span());
        Ok(Expr::Unary { op, operand: Box::new(operand), span })
    }

    fn parse_primary(&mut self) -> Result<Expr, CompileError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Int(value) => Ok(Expr::IntLiteral { value, span: tok.span }),
            TokenKind::Ident(name) => Ok(Expr::Ident { name, span: tok.span }),
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(CompileError::syntax(format!("expected expression, found {other}"), tok.span)),
        }
    }
}

/// Lexes and parses `source` in one step.
pub fn parse(source: &str) -> Result<Vec<Stmt>, CompileError> {
    let (tokens, mut errors) = crate::lexer::tokenize(source);
    if let Some(err) = errors.drain(..).next() {
        return Err(err);
    }
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_return_literal() {
        let stmts = parse("return 1;").unwrap();
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0], Stmt::Return { .. }));
    }

    #[test]
    fn comparison_is_right_associative() {
        // a == b == c  parses as  a == (b == c)
        let stmts = parse("return a==b==c;").unwrap();
        let Stmt::Return { expr, .. } = &stmts[0] else { panic!("expected return") };
        let Expr::Binary { op: BinaryOp::Eq, rhs, .. } = expr else { panic!("expected ==") };
        assert!(matches!(**rhs, Expr::Binary { op: BinaryOp::Eq, .. }));
    }

    #[test]
    fn mul_binds_tighter_than_add() {
        let stmts = parse("return 1+2*3;").unwrap();
        let Stmt::Return { expr, .. } = &stmts[0] else { panic!("expected return") };
        let Expr::Binary { op: BinaryOp::Add, rhs, .. } = expr else { panic!("expected +") };
        assert!(matches!(**rhs, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn parses_if_else() {
        let stmts = parse("if (a) { return 1; } else { return 2; }").unwrap();
        assert!(matches!(stmts[0], Stmt::If { else_branch: Some(_), .. }));
    }

    #[test]
    fn rejects_unexpected_token() {
        let err = parse("return ;").unwrap_err();
        assert!(matches!(err, CompileError::Syntax { .. }));
    }
}
