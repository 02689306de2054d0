use std::{collections::HashMap, fmt, io::Write, sync::Arc};

use log::{debug, trace};

use crate::{
    error::{EvalError, Result},
    ops::{add, div, mul, neg, sub},
    unary_fn::UnaryFn,
};

/// The capability every node of an expression has: numeric evaluation at a
/// point and a symbolic derivative that is itself differentiable.
///
/// Implement this for your own type and wrap it with [`Term::custom`] to mix
/// it into expressions built from the provided nodes.
pub trait Differentiable: fmt::Debug + Send + Sync {
    /// Evaluate the function at `x`.
    fn value(&self, x: f64) -> Result<f64>;

    /// Produce the derivative with respect to `x` as a new expression.
    /// Nothing is evaluated numerically here.
    fn derivative(&self) -> Term;

    /// A short human readable name, used by `Display` and graphviz output.
    fn name(&self) -> String {
        format!("{self:?}")
    }
}

#[derive(Clone, Debug)]
pub(crate) struct UnaryFnPayload {
    term: Term,
    f: Arc<dyn UnaryFn>,
}

#[derive(Clone, Debug)]
pub(crate) enum TermInt {
    Constant(f64),
    /// `a * x + b`
    Linear(f64, f64),
    Add(Term, Term),
    Sub(Term, Term),
    Mul(Term, Term),
    Div(Term, Term),
    Neg(Term),
    Unary(UnaryFnPayload),
    Custom(Arc<dyn Differentiable>),
}

impl TermInt {
    fn eval(&self, x: f64) -> Result<f64> {
        use TermInt::*;
        Ok(match self {
            Constant(val) => *val,
            Linear(a, b) => a * x + b,
            Add(lhs, rhs) => lhs.value(x)? + rhs.value(x)?,
            Sub(lhs, rhs) => lhs.value(x)? - rhs.value(x)?,
            Mul(lhs, rhs) => lhs.value(x)? * rhs.value(x)?,
            Div(lhs, rhs) => {
                let numerator = lhs.value(x)?;
                let denominator = rhs.value(x)?;
                if denominator == 0. {
                    debug!("denominator {rhs} vanishes at x = {x}");
                    return Err(EvalError::DivisionByZero { numerator });
                }
                numerator / denominator
            }
            Neg(term) => -term.value(x)?,
            Unary(UnaryFnPayload { term, f }) => f.f(term.value(x)?)?,
            Custom(custom) => custom.value(x)?,
        })
    }

    fn children(&self) -> Vec<&Term> {
        use TermInt::*;
        match self {
            Constant(_) | Linear(..) | Custom(_) => vec![],
            Add(lhs, rhs) | Sub(lhs, rhs) | Mul(lhs, rhs) | Div(lhs, rhs) => vec![lhs, rhs],
            Neg(term) | Unary(UnaryFnPayload { term, .. }) => vec![term],
        }
    }

    /// Whether `Display` wraps this node in its own parentheses.
    fn is_bracketed(&self) -> bool {
        use TermInt::*;
        match self {
            Add(..) | Sub(..) | Mul(..) | Div(..) => true,
            Linear(a, b) => !(*a == 1. && *b == 0.),
            _ => false,
        }
    }

    /// Whether a prefix `-` in front of the rendered node reads unambiguously.
    fn is_atomic(&self) -> bool {
        use TermInt::*;
        match self {
            Constant(val) => val.is_sign_positive(),
            Linear(..) | Unary(_) => true,
            _ => self.is_bracketed(),
        }
    }

    /// Label of this node alone, without its children.
    fn label(&self) -> String {
        use TermInt::*;
        match self {
            Constant(val) => format!("{val}"),
            Linear(a, b) => format!("{a} * x + {b}"),
            Add(..) => "+".to_string(),
            Sub(..) => "-".to_string(),
            Mul(..) => "*".to_string(),
            Div(..) => "/".to_string(),
            Neg(_) => "neg".to_string(),
            Unary(UnaryFnPayload { f, .. }) => f.name().to_string(),
            Custom(custom) => custom.name(),
        }
    }
}

/// A shared handle to an immutable expression node.
///
/// Cloning a `Term` only bumps a reference count, so the same subtree can be
/// used by any number of parent expressions, on any number of threads.
#[derive(Clone, Debug)]
pub struct Term(Arc<TermInt>);

impl Term {
    pub(crate) fn new_payload(val: TermInt) -> Self {
        Self(Arc::new(val))
    }

    /// The constant function `c`.
    pub fn constant(c: f64) -> Self {
        Self::new_payload(TermInt::Constant(c))
    }

    /// The affine function `a * x + b`.
    pub fn linear(a: f64, b: f64) -> Self {
        Self::new_payload(TermInt::Linear(a, b))
    }

    /// The identity function, `Linear(1, 0)`.
    pub fn x() -> Self {
        Self::linear(1., 0.)
    }

    /// Wrap a user defined [`Differentiable`] so it can take part in
    /// expressions.
    pub fn custom(d: impl Differentiable + 'static) -> Self {
        Self::new_payload(TermInt::Custom(Arc::new(d)))
    }

    /// Wrap this term in an elementary function.
    /// The chain rule is delegated to [`UnaryFn::gen_graph`].
    pub fn apply(&self, f: impl UnaryFn + 'static) -> Self {
        Self::new_payload(TermInt::Unary(UnaryFnPayload {
            term: self.clone(),
            f: Arc::new(f),
        }))
    }

    /// The derivative evaluated at `x`, i.e. `self.derivative().value(x)`.
    pub fn derivative_at(&self, x: f64) -> Result<f64> {
        self.derivative().value(x)
    }

    pub fn value_and_derivative(&self, x: f64) -> Result<(f64, f64)> {
        Ok((self.value(x)?, self.derivative_at(x)?))
    }

    /// Differentiate `n` times. `n == 0` returns the same tree.
    pub fn nth_derivative(&self, n: usize) -> Self {
        (0..n).fold(self.clone(), |term, order| {
            trace!("generating derivative of order {}", order + 1);
            term.derive()
        })
    }

    /// Returns true if both handles point to the very same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Number of distinct nodes reachable from this term. Shared subtrees are
    /// counted once.
    pub fn node_count(&self) -> usize {
        let mut map = HashMap::new();
        self.accum(&mut map);
        map.len()
    }

    /// Write graphviz dot file to the given writer.
    pub fn dot(&self, writer: &mut impl Write) -> std::io::Result<()> {
        let mut map = HashMap::new();
        self.accum(&mut map);
        writeln!(writer, "digraph G {{\nrankdir=\"LR\";")?;
        for (id, (term, _)) in &map {
            writeln!(
                writer,
                "a{} [label=\"{}\"];",
                *id,
                term.label().replace('"', "\\\"")
            )?;
        }
        for (id, (_, parents)) in &map {
            for pid in parents {
                writeln!(writer, "a{} -> a{};", pid, *id)?;
            }
        }
        writeln!(writer, "}}")?;
        Ok(())
    }

    fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    fn accum<'a>(&'a self, map: &mut HashMap<usize, (&'a TermInt, Vec<usize>)>) {
        if map.contains_key(&self.id()) {
            return;
        }
        let children = self.0.children();
        for child in &children {
            child.accum(map);
        }
        let parents = children.iter().map(|child| child.id()).collect();
        map.insert(self.id(), (&*self.0, parents));
    }

    fn derive(&self) -> Self {
        use TermInt::*;
        match &*self.0 {
            Constant(_) => Self::constant(0.),
            Linear(a, _) => Self::constant(*a),
            Add(lhs, rhs) => add(lhs.derive(), rhs.derive()),
            Sub(lhs, rhs) => sub(lhs.derive(), rhs.derive()),
            Mul(lhs, rhs) => add(mul(lhs.derive(), rhs), mul(lhs, rhs.derive())),
            Div(lhs, rhs) => div(
                sub(mul(lhs.derive(), rhs), mul(lhs, rhs.derive())),
                mul(rhs, rhs),
            ),
            Neg(term) => neg(term.derive()),
            Unary(UnaryFnPayload { term, f }) => f.gen_graph(self, term, &term.derive()),
            Custom(custom) => custom.derivative(),
        }
    }
}

impl Differentiable for Term {
    fn value(&self, x: f64) -> Result<f64> {
        self.0.eval(x)
    }

    fn derivative(&self) -> Term {
        self.derive()
    }

    fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TermInt::*;
        match &*self.0 {
            Constant(val) => write!(f, "{val}"),
            Linear(a, b) => {
                if self.0.is_bracketed() {
                    write!(f, "(")?;
                }
                if *a == 1. {
                    write!(f, "x")?;
                } else {
                    write!(f, "{a} * x")?;
                }
                if *b > 0. || b.is_nan() {
                    write!(f, " + {b}")?;
                } else if *b < 0. {
                    write!(f, " - {}", -b)?;
                }
                if self.0.is_bracketed() {
                    write!(f, ")")?;
                }
                Ok(())
            }
            Add(lhs, rhs) => write!(f, "({lhs} + {rhs})"),
            Sub(lhs, rhs) => write!(f, "({lhs} - {rhs})"),
            Mul(lhs, rhs) => write!(f, "({lhs} * {rhs})"),
            Div(lhs, rhs) => write!(f, "({lhs} / {rhs})"),
            Neg(term) => {
                if term.0.is_atomic() {
                    write!(f, "-{term}")
                } else {
                    write!(f, "-({term})")
                }
            }
            Unary(UnaryFnPayload { term, f: func }) => {
                if term.0.is_bracketed() {
                    write!(f, "{}{term}", func.name())
                } else {
                    write!(f, "{}({term})", func.name())
                }
            }
            Custom(custom) => write!(f, "{}", custom.name()),
        }
    }
}

pub fn constant(c: f64) -> Term {
    Term::constant(c)
}

pub fn linear(a: f64, b: f64) -> Term {
    Term::linear(a, b)
}

pub fn x() -> Term {
    Term::x()
}
