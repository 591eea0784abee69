use crate::ast::Expr;

/// Statement of a [`Program`](crate::ast::Program).
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Conditional
    ///
    /// The condition must evaluate to a boolean. `else if` chains are an
    /// `If` nested as the only statement of `else_branch`.
    ///
    /// # Example
    /// ```text
    /// if 10 > 5 { return 1 ; } else { return 2 ; }
    /// ```
    If {
        condition: Expr,
        then_branch: Vec<Statement>,
        else_branch: Option<Vec<Statement>>,
    },

    /// Ends the program with a value
    ///
    /// # Example
    /// ```text
    /// return 10 * 2 ;
    /// ```
    Return(Expr),

    /// Bare expression; the last one evaluated is the program's value when
    /// no `return` runs
    Expression(Expr),
}
