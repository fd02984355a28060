use std::fmt;

use crate::{
    ast::{BoolOp, CompareOp},
    value::Value,
};

/// Abstract Syntax Tree node produced by the parser.
///
/// Groups are n-ary: the parser flattens adjacent groups with the same
/// operator, so a `Group` never has an immediate child `Group` with the same
/// `op`, and always has at least two children.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Single comparison
    ///
    /// # Example
    /// ```text
    /// user.age >= 18
    /// ```
    Clause {
        /// Dotted field path, not yet split
        field: String,
        op: CompareOp,
        value: Value,
    },

    /// `and` / `or` combination of two or more nodes
    ///
    /// # Example
    /// ```text
    /// a == 1 and b == 2 and c == 3
    /// ```
    Group { op: BoolOp, children: Vec<Node> },

    /// Negation
    ///
    /// # Example
    /// ```text
    /// not role == 'admin'
    /// ```
    Not(Box<Node>),
}

impl Node {
    pub fn clause(field: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Node::Clause {
            field: field.into(),
            op,
            value,
        }
    }

    pub fn negate(node: Node) -> Self {
        Node::Not(Box::new(node))
    }

    /// Combine two nodes under `op`, splicing in the children of either side
    /// that is already a group with the same operator.
    pub fn merge(op: BoolOp, left: Node, right: Node) -> Self {
        let mut children = Vec::new();
        for side in [left, right] {
            match side {
                Node::Group {
                    op: inner,
                    children: nested,
                } if inner == op => children.extend(nested),
                other => children.push(other),
            }
        }
        Node::Group { op, children }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Clause { field, op, value } => write!(f, "({} {} {})", op, field, value),
            Node::Group { op, children } => {
                write!(f, "({}", op)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
            Node::Not(inner) => write!(f, "(not {})", inner),
        }
    }
}
