// src/ir/mod.rs
//! The Sea-of-Nodes graph IR: arena-backed nodes (`node`), the
//! compute/idealize peephole engine (`engine`), per-kind rules (`kinds`),
//! the Scope-as-node symbol table (`scope`), the AST-to-graph driver
//! (`generator`), and a DOT debug visualizer (`visualize`).
pub mod engine;
pub mod generator;
pub(crate) mod kinds;
pub mod node;
pub mod scope;
pub mod visualize;

pub use engine::to_string;
pub use generator::Generator;
pub use node::{BoolOp, Graph, NodeId, NodeKind};
pub use visualize::visualize;
