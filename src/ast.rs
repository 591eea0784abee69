//! # Expression syntax tree
//!
//! Syntax tree of the expressions understood by the default
//! [`ExpressionEvaluator`](crate::ExpressionEvaluator). Its input is an
//! already substituted expression, so the only operands are numeric and
//! boolean literals:
//!
//! ```text
//! ( 10 + 10 ) * 10 + 10.1
//! if 10 == 10 { return true ; } else { return false ; }
//! ```
//!
//! ## Structure
//!
//! - **[expressions]** - literals and binary operations
//! - **[operators]** - arithmetic and comparison operators
//! - **[statements]** - `if`/`else`, `return` and expression statements
//! - **[program]** - a complete statement sequence
//!
//! ## Precedence
//!
//! From loosest to tightest: `== !=`, `< > <= >=`, `+ -`, `* /`, unary `-`,
//! then literals and parentheses. All binary operators are left-associative.
pub mod expressions;
pub mod operators;
pub mod program;
pub mod statements;

pub use expressions::Expr;
pub use operators::BinOp;
pub use program::Program;
pub use statements::Statement;
