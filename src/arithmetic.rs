//! # Arithmetic over resolved paths
//!
//! An arithmetic query mixes path expressions with operators and a small
//! statement grammar:
//!
//! ```text
//! (age + age) * age + magic
//! score.math[1] / score.math[0]
//! if age == limit { return true; } else { return false; }
//! ```
//!
//! Every identifier is resolved against the document first and replaced by
//! its numeric text; the substituted expression is then handed to an
//! [`Evaluate`](crate::Evaluate) implementation. A path that does not resolve
//! to an integer or float aborts the whole query. Bare constants such as `2`
//! are paths too, unless [`Options::numeric_literals`](crate::Options) is set.

pub mod lexer;
pub mod substitute;

pub use lexer::{ArithmeticKind, ArithmeticToken, tokenize};
pub use substitute::{render, substitute};
