// src/error/compile_error.rs
use crate::location::Span;
use thiserror::Error;

/// The three failure kinds the core can surface: a syntax error from the
/// lexer/parser, an AST shape the generator does not support, or a semantic
/// error only detectable while building the graph (divide by zero, unknown
/// identifier, non-boolean `if` condition).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("syntax error: {message} at {span}")]
    Syntax { message: String, span: Span },

    #[error("unsupported syntax: {message} at {span}")]
    Ast { message: String, span: Span },

    #[error("{message} at {span}")]
    Compute { message: String, span: Span },
}

impl CompileError {
    #[must_use]
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::Syntax { message: message.into(), span }
    }

    #[must_use]
    pub fn ast(message: impl Into<String>, span: Span) -> Self {
        Self::Ast { message: message.into(), span }
    }

    #[must_use]
    pub fn compute(message: impl Into<String>, span: Span) -> Self {
        Self::Compute { message: message.into(), span }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Syntax { span, .. } | Self::Ast { span, .. } | Self::Compute { span, .. } => *span,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { message, .. } | Self::Ast { message, .. } | Self::Compute { message, .. } => message,
        }
    }

    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "SYNTAX",
            Self::Ast { .. } => "AST",
            Self::Compute { .. } => "COMPUTE",
        }
    }
}
