//! Expression evaluator.
//!
//! Walks an AST against an immutable value tree. Member and subscript
//! access narrow the current object; subscript index expressions and
//! function arguments always resolve against the whole document. Errors
//! raised below the top accumulate a breadcrumb path as they unwind.

use crate::error::{Breadcrumb, EvalError, PathComponent};
use crate::types::{BinaryOp, Func, Node, SubscriptNode, SubscriptThen};
use crate::value::{Members, Value};

/// Evaluate an expression against a document's top-level object.
pub fn evaluate(root: &Members, node: &Node) -> Result<Value, EvalError> {
    Evaluator { root }.eval(node, root)
}

struct Evaluator<'a> {
    /// Whole-document context for subscripts and function arguments.
    root: &'a Members,
}

impl<'a> Evaluator<'a> {
    fn eval(&self, node: &Node, current: &Members) -> Result<Value, EvalError> {
        match node {
            Node::Identifier(name) => self.lookup(current, name).map(Value::clone),
            Node::IntLiteral(n) => Ok(Value::Int(*n)),
            Node::FloatLiteral(x) => Ok(Value::Float(*x)),
            Node::GetMember { name, child } => {
                let Value::Object(object) = self.lookup(current, name)? else {
                    return Err(EvalError::NotAnObject(Breadcrumb::key(name.clone())));
                };
                self.eval(child, object)
                    .map_err(|e| e.prepend(PathComponent::Key(name.clone())))
            }
            Node::GetSubscript { name, child } => {
                let Value::Array(items) = self.lookup(current, name)? else {
                    return Err(EvalError::NotAnArray(Breadcrumb::key(name.clone())));
                };
                self.index_array(child, items)
                    .map_err(|e| e.prepend(PathComponent::Key(name.clone())))
            }
            Node::Call { func, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, self.root)?);
                }
                match func {
                    Func::Max | Func::Min => extremum(*func, values),
                    Func::Size => size(values),
                }
            }
            Node::Binary { op, left, right } => {
                let lhs = self.eval(left, self.root)?;
                let rhs = self.eval(right, self.root)?;
                binary(*op, lhs, rhs)
            }
        }
    }

    fn lookup<'m>(&self, current: &'m Members, name: &str) -> Result<&'m Value, EvalError> {
        current
            .get(name)
            .ok_or_else(|| EvalError::NoSuchKey(Breadcrumb::key(name.to_string())))
    }

    /// Resolve one subscript step against an array, then follow the
    /// continuation with the indexed element as the new context.
    fn index_array(&self, node: &SubscriptNode, items: &[Value]) -> Result<Value, EvalError> {
        let index = match self.eval(&node.index, self.root)? {
            Value::Int(i) => i,
            other => return Err(EvalError::NotAnIndex(other.type_name())),
        };
        let item = usize::try_from(index).ok().and_then(|i| items.get(i));
        let Some(item) = item else {
            return Err(EvalError::OutOfBounds {
                path: Breadcrumb::index(index),
                len: items.len(),
            });
        };
        match &node.then {
            SubscriptThen::Done => Ok(item.clone()),
            SubscriptThen::Member(child) => {
                let Value::Object(object) = item else {
                    return Err(EvalError::NotAnObject(Breadcrumb::index(index)));
                };
                self.eval(child, object)
                    .map_err(|e| e.prepend(PathComponent::Index(index)))
            }
            SubscriptThen::Subscript(next) => {
                let Value::Array(inner) = item else {
                    return Err(EvalError::NotAnArray(Breadcrumb::index(index)));
                };
                self.index_array(next, inner)
                    .map_err(|e| e.prepend(PathComponent::Index(index)))
            }
        }
    }
}

/// `max`/`min`. A single argument that evaluates to an array supplies the
/// candidate set; otherwise the arguments themselves do. All-integer
/// candidates compare as integers; one float promotes the whole set.
fn extremum(func: Func, values: Vec<Value>) -> Result<Value, EvalError> {
    let candidates = match values.as_slice() {
        [Value::Array(items)] => {
            if items.is_empty() {
                return Err(EvalError::EmptyArray(func));
            }
            items.clone()
        }
        _ => values,
    };

    let mut any_float = false;
    for candidate in &candidates {
        match candidate {
            Value::Int(_) => {}
            Value::Float(_) => any_float = true,
            other => {
                return Err(EvalError::NonNumericArgument {
                    func,
                    got: other.type_name(),
                })
            }
        }
    }

    let maximize = func == Func::Max;
    if any_float {
        let floats = candidates.iter().filter_map(Value::as_f64);
        let best = if maximize {
            floats.fold(f64::NEG_INFINITY, f64::max)
        } else {
            floats.fold(f64::INFINITY, f64::min)
        };
        Ok(Value::Float(best))
    } else {
        let ints = candidates.iter().filter_map(Value::as_int);
        let best = if maximize { ints.max() } else { ints.min() };
        best.map(Value::Int).ok_or(EvalError::EmptyArray(func))
    }
}

/// `size`: character count of a string, element count of an array, key
/// count of an object.
fn size(values: Vec<Value>) -> Result<Value, EvalError> {
    let [value] = values.as_slice() else {
        return Err(EvalError::WrongArity(Func::Size));
    };
    match value {
        Value::String(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::Array(items) => Ok(Value::Int(items.len() as i64)),
        Value::Object(members) => Ok(Value::Int(members.len() as i64)),
        other => Err(EvalError::NotSizable(other.type_name())),
    }
}

/// Binary arithmetic: two integers stay in `i64`, anything else promotes
/// both operands to `f64`.
fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    if let (Value::Int(a), Value::Int(b)) = (&lhs, &rhs) {
        return int_arith(op, *a, *b);
    }
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(x), Some(y)) => Ok(Value::Float(float_arith(op, x, y))),
        _ => {
            let got = if lhs.is_number() {
                rhs.type_name()
            } else {
                lhs.type_name()
            };
            Err(EvalError::NonNumericOperand { op, got })
        }
    }
}

fn int_arith(op: BinaryOp, a: i64, b: i64) -> Result<Value, EvalError> {
    let result = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Subtract => a.wrapping_sub(b),
        BinaryOp::Multiply => a.wrapping_mul(b),
        BinaryOp::Divide => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            // i64 division truncates toward zero.
            a.wrapping_div(b)
        }
        // Integer power: the float power rounded to the nearest integer.
        BinaryOp::Raise => (a as f64).powf(b as f64).round() as i64,
    };
    Ok(Value::Int(result))
}

fn float_arith(op: BinaryOp, x: f64, y: f64) -> f64 {
    match op {
        BinaryOp::Add => x + y,
        BinaryOp::Subtract => x - y,
        BinaryOp::Multiply => x * y,
        BinaryOp::Divide => x / y,
        BinaryOp::Raise => x.powf(y),
    }
}
