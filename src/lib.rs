//! sketchxp - Strict S-expression interpreter for 2-D sketch programs
//!
//! This crate provides a minimalistic interpreter for a fully parenthesized
//! prefix language with arithmetic, boolean logic, trigonometry, and 2-D
//! geometric primitives. A program is a single S-expression; a `draw` form
//! collects evaluated geometry into a side list that a host application
//! (GUI, plotter, test harness) renders however it likes. The interpreter
//! itself never rasterizes anything.
//!
//! ```scheme
//! ; a sketch program
//! (begin
//!   (define side 100)
//!   (draw (rect 0 0 side side)
//!         (line (point 0 0) (point side side))
//!         (arc (point 50 50) (point 100 50) pi)))
//! ```
//!
//! ## Strict Typing
//!
//! There is no truthiness and no implicit conversion:
//! - Boolean operations require actual boolean values; `(and 1 2)` is an error
//! - `if` conditions must evaluate to a boolean
//! - Every builtin checks argument count and argument types before computing
//!
//! ## Driving the interpreter
//!
//! ```
//! use sketchxp::ast::Expression;
//! use sketchxp::interpreter::Interpreter;
//!
//! let mut interp = Interpreter::new();
//! assert!(interp.parse("(begin (define r 10) (* 2 r))"));
//! let result = interp.eval().unwrap();
//! assert_eq!(result, Expression::from(20.0));
//! ```
//!
//! ## Modules
//!
//! - `lexer`: text to token sequence, comments and whitespace elided
//! - `parser`: token sequence to expression tree
//! - `ast`: the `Atom`/`Expression` value model and geometric types
//! - `environment`: variable and procedure bindings
//! - `builtins`: the default procedure table
//! - `interpreter`: the evaluation engine and host-facing boundary

use std::fmt;

/// The single error kind of the interpreter.
///
/// Every failure, whether raised while parsing, evaluating, or inside a
/// builtin procedure, is a `SemanticError` distinguished only by its
/// message. Partial effects of a failed program (bindings already made,
/// drawables already collected) are never rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    message: String,
}

impl SemanticError {
    /// Create an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        SemanticError {
            message: message.into(),
        }
    }

    /// Create the uniform builtin-violation error, e.g.
    /// `not expects one boolean argument`.
    pub fn expects(procedure: &str, expectation: &str) -> Self {
        SemanticError {
            message: format!("{procedure} expects {expectation}"),
        }
    }

    /// The descriptive message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SemanticError {}

pub mod ast;
pub mod builtins;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
