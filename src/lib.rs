// src/lib.rs
//! # simplec
//!
//! Front-end and Sea-of-Nodes intermediate representation for a small
//! imperative teaching language: integer variables, arithmetic,
//! comparisons, blocks and `if`/`else`.
//!
//! Every value and every control point in the program becomes a node in a
//! single directed graph. Construction and peephole optimization happen
//! together: as the generator walks the AST, each node it builds is run
//! through the peephole engine, which may fold it to a constant, rewrite it
//! into a simpler equivalent node, or discover it is dead.
//!
//! ## Modules
//! * `lexer` / `tokens` - turns source text into a token stream
//! * `parser` - recursive-descent parser producing the AST consumed by `ir::generator`
//! * `types` - the monotone type lattice used for constant folding and `meet`
//! * `ir` - the node graph: base node, concrete node kinds, the scope node,
//!   the peephole engine and the AST-to-graph generator
//! * `error` - the unified compile error type and source-context reporter
//! * `location` - byte-offset spans into the source
//! * `cli` - command-line argument parsing
pub mod cli;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod tokens;
pub mod types;
