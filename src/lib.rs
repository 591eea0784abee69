//! JSON decoding with a path query language and arithmetic over paths.
//!
//! ```
//! let json = r#"{"people":[{"bob":{"age":10}}],"factor":20,"magic":10.1}"#;
//!
//! assert_eq!(xjson::get(json, "people[0].bob.age").int(), 10);
//! assert_eq!(
//!     xjson::get_with_arithmetic(json, "people[0].bob.age * factor + magic").float(),
//!     210.1
//! );
//! ```

mod bytes;
mod expect;

pub mod arithmetic;
pub mod ast;
pub mod convert;
pub mod decoder;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod options;
pub mod output;
pub mod parser;
pub mod path;
pub mod result;
pub mod tokens;
pub mod value;

pub use decoder::{Decoder, decode, get, get_with_arithmetic};
pub use error::{
    ArithmeticError, Error, EvalError, ParseError, PathError, QueryError, SubstituteError,
    TokenizeError,
};
pub use evaluator::{Evaluate, ExpressionEvaluator, Primitive};
pub use options::{KeyCharset, NullMode, Options};
pub use output::{to_json, to_json_pretty};
pub use result::{Kind, Result};
pub use tokens::{Token, TokenKind};
pub use value::Value;
