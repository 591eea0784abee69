//! # Path expressions
//!
//! A path selects one location inside a decoded document:
//!
//! ```text
//! name                 // key of the root object
//! score.math[1]        // nested key, then array index
//! matrix[0][2]         // chained indices
//! a\.b                 // key "a.b"; `\` makes the next byte literal
//! ```
//!
//! Keys are made of letters, digits and `_` (see
//! [`KeyCharset`](crate::KeyCharset)); anything else must be escaped.
//! Resolution never panics: a missing key, an index out of range, a
//! traversal through a scalar or a dangling `.` all yield an error that the
//! query functions turn into an empty [`Result`](crate::Result).

pub mod lexer;
pub mod resolver;

pub use lexer::{GrammarKind, GrammarToken, tokenize};
pub use resolver::{Resolver, resolve};
