//! GümüşDil IR - tokens and syntax tree.
//!
//! This crate holds the data shared by every stage of the pipeline:
//! - [`Token`] / [`TokenKind`]: lexer output, with 1-based line and column
//! - [`Stmt`] / [`Expr`]: the AST produced by the parser
//! - [`Distance`]: the resolver's annotation on variable, assignment,
//!   `öz` and `ata` nodes
//! - [`dump`]: the JSON tree format behind `--dump-ast`
//!
//! The AST is owned top-down. The only shared nodes are function
//! declarations, which are reference counted so that function values
//! created at run time keep their body alive after the program that
//! declared them has finished executing.

pub mod ast;
pub mod dump;
mod token;

pub use ast::{
    BinaryOp, ClassDecl, Distance, Expr, ExprKind, FunctionDecl, Literal, LogicalOp,
    SharedFunction, Stmt, StmtKind, UnaryOp,
};
pub use dump::{dump_program, from_json, program_to_json, DumpNode};
pub use token::{Token, TokenKind};

/// Name of the constructor method.
pub const CONSTRUCTOR_NAME: &str = "kurucu";

/// Name bound to the receiver inside methods.
pub const RECEIVER_NAME: &str = "öz";

/// Name bound to the superclass inside subclass methods.
pub const SUPER_NAME: &str = "ata";
