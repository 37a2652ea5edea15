//! AST construction helpers.

use crate::types::*;

/// Helper functions for constructing expression AST nodes.
pub struct Ast;

impl Ast {
    /// Create a bare identifier node.
    pub fn ident(name: impl Into<String>) -> Node {
        Node::Identifier(name.into())
    }

    /// Create an integer literal.
    pub fn int(value: i64) -> Node {
        Node::IntLiteral(value)
    }

    /// Create a float literal.
    pub fn float(value: f64) -> Node {
        Node::FloatLiteral(value)
    }

    /// Create a member access: `name.child`.
    pub fn member(name: impl Into<String>, child: Node) -> Node {
        Node::GetMember {
            name: name.into(),
            child: Box::new(child),
        }
    }

    /// Create a subscript access: `name[…]`.
    pub fn subscript(name: impl Into<String>, child: SubscriptNode) -> Node {
        Node::GetSubscript {
            name: name.into(),
            child: Box::new(child),
        }
    }

    /// Create a terminal subscript: `[index]` with nothing after it.
    pub fn index(index: Node) -> SubscriptNode {
        SubscriptNode {
            index: Box::new(index),
            then: SubscriptThen::Done,
        }
    }

    /// Create a subscript followed by a member access: `[index].child`.
    pub fn index_then_member(index: Node, child: Node) -> SubscriptNode {
        SubscriptNode {
            index: Box::new(index),
            then: SubscriptThen::Member(Box::new(child)),
        }
    }

    /// Create a subscript followed by another subscript: `[index][…]`.
    pub fn index_then_subscript(index: Node, next: SubscriptNode) -> SubscriptNode {
        SubscriptNode {
            index: Box::new(index),
            then: SubscriptThen::Subscript(Box::new(next)),
        }
    }

    /// Create a function call node.
    pub fn call(func: Func, args: Vec<Node>) -> Node {
        Node::Call { func, args }
    }

    /// Create a binary arithmetic node.
    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ast_construction() {
        // a.b[0].c
        let node = Ast::member(
            "a",
            Ast::subscript("b", Ast::index_then_member(Ast::int(0), Ast::ident("c"))),
        );

        let Node::GetMember { name, child } = &node else {
            panic!("expected member access");
        };
        assert_eq!("a", name.as_str());
        assert!(matches!(child.as_ref(), Node::GetSubscript { .. }));
    }
}
