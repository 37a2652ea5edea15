//! Expression parser.
//!
//! Lexing and parsing happen in one recursive-descent pass. Arithmetic is
//! collected as a flat operand/operator sequence and reduced with the
//! classic two-stack rule; paths, subscripts, function arguments and
//! parenthesized groups recurse, each with its own terminator.

use crate::error::ExprParseError;
use crate::num::{self, NumberError, ParsedNumber};
use crate::types::{BinaryOp, Func, Node, SubscriptNode, SubscriptThen};

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Where a sub-expression is allowed to stop.
///
/// Each terminator is honored only at depth 0 of its own recursion: a `]`
/// inside a nested subscript or a `)` inside a nested group belongs to that
/// inner recursion, never to the outer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// Top level: only end-of-input.
    End,
    /// Function argument: `,` or the call's closing `)`.
    Argument,
    /// Subscript: the matching `]`.
    Bracket,
    /// Parenthesized group: the matching `)`.
    Paren,
}

/// Expression parser.
pub struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    /// Parse a complete expression.
    pub fn parse(input: &'a str) -> Result<Node, ExprParseError> {
        let mut parser = Self { input, pos: 0 };
        parser.parse_expression(Terminator::End)
    }

    fn error(&self, message: &str) -> ExprParseError {
        ExprParseError::new(message, self.input, self.pos)
    }

    /// Parse operands and operators until the terminator, then reduce.
    fn parse_expression(&mut self, term: Terminator) -> Result<Node, ExprParseError> {
        let mut operands: Vec<Node> = Vec::new();
        let mut operators: Vec<BinaryOp> = Vec::new();

        loop {
            self.skip_whitespace();
            let operand = self.parse_operand()?;
            operands.push(operand);
            self.skip_whitespace();

            match self.peek() {
                None => match term {
                    Terminator::End => break,
                    Terminator::Argument | Terminator::Paren => {
                        return Err(self.error("Missing closing parenthesis"))
                    }
                    Terminator::Bracket => return Err(self.error("Missing closing bracket")),
                },
                Some(')') if matches!(term, Terminator::Argument | Terminator::Paren) => break,
                Some(',') if term == Terminator::Argument => break,
                Some(']') if term == Terminator::Bracket => break,
                Some(c) => match BinaryOp::from_char(c) {
                    Some(op) => {
                        self.advance();
                        // Two-stack reduction: anything on the stack that
                        // binds at least as tightly as the incoming
                        // left-associative operator is combined first.
                        while let Some(&top) = operators.last() {
                            if op.precedence() <= top.precedence() && !op.is_right_associative() {
                                operators.pop();
                                self.combine(top, &mut operands)?;
                            } else {
                                break;
                            }
                        }
                        operators.push(op);
                    }
                    None => return Err(self.error("Unexpected character")),
                },
            }
        }

        while let Some(op) = operators.pop() {
            self.combine(op, &mut operands)?;
        }
        let result = operands.pop().ok_or_else(|| self.error("Too many operators"))?;
        if !operands.is_empty() {
            return Err(self.error("Too many operands"));
        }
        Ok(result)
    }

    /// Pop two operands and push the combined binary node.
    fn combine(&self, op: BinaryOp, operands: &mut Vec<Node>) -> Result<(), ExprParseError> {
        let right = operands.pop();
        let left = operands.pop();
        match (left, right) {
            (Some(left), Some(right)) => {
                operands.push(Node::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                });
                Ok(())
            }
            _ => Err(self.error("Too many operators")),
        }
    }

    fn parse_operand(&mut self) -> Result<Node, ExprParseError> {
        match self.peek() {
            None => Err(self.error("Missing operand")),
            Some('(') => {
                self.advance();
                let inner = self.parse_expression(Terminator::Paren)?;
                // parse_expression only stops at the matching ')'.
                self.advance();
                Ok(inner)
            }
            Some('-') if self.second_char_is_digit() => self.parse_number(),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some(c) if is_ident_start(c) => self.parse_path_or_call(),
            Some(_) => Err(self.error("Unexpected character")),
        }
    }

    /// An identifier-rooted operand: a function call if the identifier is a
    /// reserved name directly followed by `(`, otherwise a path.
    fn parse_path_or_call(&mut self) -> Result<Node, ExprParseError> {
        let name = self.parse_identifier()?;
        if let Some(func) = Func::from_name(&name) {
            if self.peek() == Some('(') {
                self.advance();
                let args = self.parse_arguments()?;
                return Ok(Node::Call { func, args });
            }
        }
        self.parse_path_rest(name)
    }

    /// Comma-separated arguments up to the call's closing `)`.
    fn parse_arguments(&mut self) -> Result<Vec<Node>, ExprParseError> {
        let mut args = Vec::new();
        loop {
            let arg = self.parse_expression(Terminator::Argument)?;
            args.push(arg);
            match self.peek() {
                Some(',') => self.advance(),
                Some(')') => {
                    self.advance();
                    return Ok(args);
                }
                _ => return Err(self.error("Missing closing parenthesis")),
            }
        }
    }

    /// The continuation after an identifier: `.member`, `[subscript]`, or
    /// nothing.
    fn parse_path_rest(&mut self, name: String) -> Result<Node, ExprParseError> {
        match self.peek() {
            Some('.') => {
                self.advance();
                let child = self.parse_member()?;
                Ok(Node::GetMember {
                    name,
                    child: Box::new(child),
                })
            }
            Some('[') => {
                self.advance();
                let child = self.parse_subscript()?;
                Ok(Node::GetSubscript {
                    name,
                    child: Box::new(child),
                })
            }
            _ => Ok(Node::Identifier(name)),
        }
    }

    /// The identifier-rooted rest of a path, after a `.`.
    fn parse_member(&mut self) -> Result<Node, ExprParseError> {
        match self.peek() {
            Some(c) if is_ident_start(c) => {}
            _ => return Err(self.error("Missing member name after '.'")),
        }
        let name = self.parse_identifier()?;
        self.parse_path_rest(name)
    }

    /// A subscript: the index expression (a full sub-expression, up to the
    /// matching `]`) plus its continuation.
    fn parse_subscript(&mut self) -> Result<SubscriptNode, ExprParseError> {
        let index = self.parse_expression(Terminator::Bracket)?;
        // parse_expression only stops at the matching ']'.
        self.advance();
        let then = match self.peek() {
            Some('.') => {
                self.advance();
                SubscriptThen::Member(Box::new(self.parse_member()?))
            }
            Some('[') => {
                self.advance();
                SubscriptThen::Subscript(Box::new(self.parse_subscript()?))
            }
            _ => SubscriptThen::Done,
        };
        Ok(SubscriptNode {
            index: Box::new(index),
            then,
        })
    }

    fn parse_identifier(&mut self) -> Result<String, ExprParseError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_ident_start(c) => self.advance(),
            _ => return Err(self.error("Expected identifier")),
        }
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// A numeric literal, classified by the consumed-length rule shared
    /// with the JSON parser.
    fn parse_number(&mut self) -> Result<Node, ExprParseError> {
        let rest = &self.input[self.pos..];
        match num::parse_number(rest) {
            Ok((ParsedNumber::Int(n), used)) => {
                self.pos += used;
                Ok(Node::IntLiteral(n))
            }
            Ok((ParsedNumber::Float(x), used)) => {
                self.pos += used;
                Ok(Node::FloatLiteral(x))
            }
            Err(NumberError::Overflow) => Err(self.error("Integer literal out of 64-bit range")),
            Err(NumberError::NoDigits) => Err(self.error("Invalid number")),
        }
    }

    fn second_char_is_digit(&self) -> bool {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        matches!(chars.next(), Some(c) if c.is_ascii_digit())
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}
