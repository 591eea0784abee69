use crate::arithmetic::{ArithmeticKind, ArithmeticToken};
use crate::ast::{BinOp, Expr, Program, Statement};
use crate::error::EvalError;
use crate::tokens::TokenReader;

/// Deepest nesting of parentheses, unary minus and blocks the parser accepts.
pub const MAX_NESTING: usize = 128;

/// Recursive descent parser over arithmetic tokens.
pub struct Parser {
    reader: TokenReader<ArithmeticToken>,
    current_token: ArithmeticToken,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<ArithmeticToken>) -> Self {
        let mut reader = TokenReader::new(tokens);
        let current_token = reader.read();
        Parser {
            reader,
            current_token,
            depth: 0,
        }
    }

    fn advance(&mut self) -> ArithmeticToken {
        let next = self.reader.read();
        std::mem::replace(&mut self.current_token, next)
    }

    fn check(&self, kind: ArithmeticKind) -> bool {
        self.current_token.kind == kind
    }

    fn expect(&mut self, kind: ArithmeticKind) -> Result<(), EvalError> {
        if !self.check(kind) {
            return Err(self.unexpected());
        }
        self.advance();
        Ok(())
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, EvalError>) -> Result<T, EvalError> {
        if self.depth >= MAX_NESTING {
            return Err(EvalError::DepthLimit(MAX_NESTING));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self) -> EvalError {
        match self.current_token.kind {
            ArithmeticKind::EndOfInput => EvalError::UnexpectedEnd,
            kind => EvalError::UnexpectedToken {
                kind,
                literal: self.current_token.literal.clone(),
            },
        }
    }

    /// Parses statements until the end of input.
    pub fn parse_program(&mut self) -> Result<Program, EvalError> {
        let mut statements = vec![];
        while !self.check(ArithmeticKind::EndOfInput) {
            statements.push(self.parse_statement()?);
        }
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> Result<Statement, EvalError> {
        let statement = match self.current_token.kind {
            ArithmeticKind::If => return self.parse_if(),
            ArithmeticKind::Return => {
                self.advance();
                Statement::Return(self.parse_expression()?)
            }
            _ => Statement::Expression(self.parse_expression()?),
        };
        self.skip_semicolons();
        Ok(statement)
    }

    fn skip_semicolons(&mut self) {
        while self.check(ArithmeticKind::Semicolon) {
            self.advance();
        }
    }

    fn parse_if(&mut self) -> Result<Statement, EvalError> {
        self.advance(); // consume 'if'
        let condition = self.parse_expression()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.check(ArithmeticKind::Else) {
            self.advance();
            if self.check(ArithmeticKind::If) {
                Some(vec![self.nested(Self::parse_if)?])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        self.skip_semicolons();

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>, EvalError> {
        self.expect(ArithmeticKind::LeftBrace)?;
        let statements = self.nested(|parser| {
            let mut statements = vec![];
            while !parser.check(ArithmeticKind::RightBrace) {
                if parser.check(ArithmeticKind::EndOfInput) {
                    return Err(EvalError::UnexpectedEnd);
                }
                statements.push(parser.parse_statement()?);
            }
            Ok(statements)
        })?;
        self.expect(ArithmeticKind::RightBrace)?;
        Ok(statements)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, EvalError> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Expr, EvalError> {
        let first = self.parse_comparison()?;
        let mut rest = vec![];

        loop {
            let op = match self.current_token.kind {
                ArithmeticKind::Equals => BinOp::Equal,
                ArithmeticKind::NotEquals => BinOp::NotEqual,
                _ => break,
            };
            self.advance();
            rest.push((op, self.parse_comparison()?));
        }
        Ok(Expr::chain(first, rest))
    }

    fn parse_comparison(&mut self) -> Result<Expr, EvalError> {
        let first = self.parse_additive()?;
        let mut rest = vec![];

        loop {
            let op = match self.current_token.kind {
                ArithmeticKind::LessThan => BinOp::LessThan,
                ArithmeticKind::GreaterThan => BinOp::GreaterThan,
                ArithmeticKind::LessEqual => BinOp::LessEqual,
                ArithmeticKind::GreaterEqual => BinOp::GreaterEqual,
                _ => break,
            };
            self.advance();
            rest.push((op, self.parse_additive()?));
        }
        Ok(Expr::chain(first, rest))
    }

    fn parse_additive(&mut self) -> Result<Expr, EvalError> {
        let first = self.parse_multiplicative()?;
        let mut rest = vec![];

        loop {
            let op = match self.current_token.kind {
                ArithmeticKind::Plus => BinOp::Add,
                ArithmeticKind::Minus => BinOp::Subtract,
                _ => break,
            };
            self.advance();
            rest.push((op, self.parse_multiplicative()?));
        }
        Ok(Expr::chain(first, rest))
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, EvalError> {
        let first = self.parse_unary()?;
        let mut rest = vec![];

        loop {
            let op = match self.current_token.kind {
                ArithmeticKind::Star => BinOp::Multiply,
                ArithmeticKind::Slash => BinOp::Divide,
                _ => break,
            };
            self.advance();
            rest.push((op, self.parse_unary()?));
        }
        Ok(Expr::chain(first, rest))
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        if !self.check(ArithmeticKind::Minus) {
            return self.parse_primary();
        }
        self.advance();

        // A negated literal is read whole so that i64::MIN fits
        if self.check(ArithmeticKind::Identifier) {
            let token = self.advance();
            return parse_number(format!("-{}", token.literal));
        }

        // Represent as 0 - operand
        let operand = self.nested(Self::parse_unary)?;
        Ok(Expr::chain(Expr::Integer(0), vec![(BinOp::Subtract, operand)]))
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        match self.current_token.kind {
            ArithmeticKind::Identifier => {
                let token = self.advance();
                parse_number(token.literal)
            }
            ArithmeticKind::True => {
                self.advance();
                Ok(Expr::Boolean(true))
            }
            ArithmeticKind::False => {
                self.advance();
                Ok(Expr::Boolean(false))
            }
            ArithmeticKind::LeftParen => {
                self.advance();
                let expr = self.nested(Self::parse_expression)?;
                self.expect(ArithmeticKind::RightParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }
}

fn parse_number(literal: String) -> Result<Expr, EvalError> {
    let parsed = if literal.contains('.') {
        literal.parse::<f64>().ok().filter(|n| n.is_finite()).map(Expr::Float)
    } else {
        literal.parse::<i64>().ok().map(Expr::Integer)
    };
    parsed.ok_or(EvalError::InvalidNumber(literal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::tokenize;
    use crate::options::KeyCharset;

    fn parse(input: &str) -> Result<Program, EvalError> {
        Parser::new(tokenize(input, KeyCharset::default()).unwrap()).parse_program()
    }

    #[test]
    fn test_parentheses() {
        let program = parse("(1 + 2) * 3").unwrap();

        // Should be: Multiply(Add(1, 2), 3)
        match &program.statements[..] {
            [Statement::Expression(Expr::BinaryOp { first, rest })] => {
                assert_eq!(
                    **first,
                    Expr::BinaryOp {
                        first: Box::new(Expr::Integer(1)),
                        rest: vec![(BinOp::Add, Expr::Integer(2))],
                    }
                );
                assert_eq!(rest[..], [(BinOp::Multiply, Expr::Integer(3))]);
            }
            other => panic!("Expected multiplication, got {:?}", other),
        }
    }

    #[test]
    fn test_else_if_chain() {
        let program = parse("if 1 > 2 { return 1; } else if true { return 2; } else { return 3; }").unwrap();
        let [Statement::If { else_branch: Some(else_branch), .. }] = &program.statements[..] else {
            panic!("Expected a single if statement");
        };
        assert!(matches!(else_branch[..], [Statement::If { .. }]));
    }

    #[test]
    fn test_unclosed_block() {
        assert_eq!(parse("if true { return 1;"), Err(EvalError::UnexpectedEnd));
    }

    #[test]
    fn test_long_chain_stays_flat() {
        let program = parse(&vec!["1"; 10_000].join(" + ")).unwrap();
        let [Statement::Expression(Expr::BinaryOp { first, rest })] = &program.statements[..] else {
            panic!("Expected a single addition chain");
        };
        assert_eq!(**first, Expr::Integer(1));
        assert_eq!(rest.len(), 9_999);
    }

    #[test]
    fn test_nesting_limit() {
        let within = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert!(parse(&within).is_ok());

        let beyond = format!("{}1{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert_eq!(parse(&beyond), Err(EvalError::DepthLimit(MAX_NESTING)));
        assert_eq!(
            parse(&format!("{}( 1 )", "- ".repeat(MAX_NESTING + 1))),
            Err(EvalError::DepthLimit(MAX_NESTING))
        );
        assert_eq!(
            parse(&"if true { ".repeat(MAX_NESTING + 1)),
            Err(EvalError::DepthLimit(MAX_NESTING))
        );
    }

    #[test]
    fn test_negated_literal() {
        let program = parse("-9223372036854775808").unwrap();
        assert_eq!(program.statements, vec![Statement::Expression(Expr::Integer(i64::MIN))]);
    }

    #[test]
    fn test_non_numeric_identifier() {
        assert_eq!(parse("age + 1"), Err(EvalError::InvalidNumber("age".to_string())));
    }
}
