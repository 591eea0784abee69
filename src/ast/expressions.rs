use crate::ast::BinOp;

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// Literal integer
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Integer(i64),

    /// Literal floating point number
    ///
    /// # Example
    /// ```text
    /// 42.5
    /// ```
    Float(f64),

    /// Boolean literal
    Boolean(bool),

    /// Left-associative run of binary operators sharing one precedence
    /// level, e.g. `a - b + c` is `first: a, rest: [(-, b), (+, c)]`.
    ///
    /// Unary minus is represented as `0 - operand`.
    ///
    /// # Examples
    /// ```text
    /// 10 + 10
    /// 2 == 2
    /// ```
    BinaryOp {
        first: Box<Expr>,
        rest: Vec<(BinOp, Expr)>,
    },
}

impl Expr {
    /// Builds an operator run, or returns `first` alone when there are no
    /// operators.
    pub fn chain(first: Expr, rest: Vec<(BinOp, Expr)>) -> Expr {
        if rest.is_empty() {
            return first;
        }
        Expr::BinaryOp {
            first: Box::new(first),
            rest,
        }
    }
}
