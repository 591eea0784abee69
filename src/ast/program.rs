use crate::ast::Statement;

/// A parsed expression or statement sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}
