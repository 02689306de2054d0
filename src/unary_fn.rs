use log::debug;

use crate::{
    error::{EvalError, Result},
    ops::{div, mul, neg},
    Term,
};

/// A trait that represents an elementary function wrapping a single argument
/// expression, like `sin(e)`.
/// It needs to implement the numeric transformation of the value and the
/// symbolic chain rule.
pub trait UnaryFn: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
    fn f(&self, data: f64) -> Result<f64>;

    /// A method to generate a graph node that represents differentiation of this node.
    /// It takes this node, its input and the input's derived node as the arguments.
    fn gen_graph(&self, this: &Term, input: &Term, derived: &Term) -> Term;
}

#[derive(Debug, Clone, Copy)]
pub struct Sin;

impl UnaryFn for Sin {
    fn name(&self) -> &str {
        "sin"
    }
    fn f(&self, data: f64) -> Result<f64> {
        Ok(data.sin())
    }
    fn gen_graph(&self, _this: &Term, input: &Term, derived: &Term) -> Term {
        mul(input.cos(), derived)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Cos;

impl UnaryFn for Cos {
    fn name(&self) -> &str {
        "cos"
    }
    fn f(&self, data: f64) -> Result<f64> {
        Ok(data.cos())
    }
    fn gen_graph(&self, _this: &Term, input: &Term, derived: &Term) -> Term {
        neg(mul(input.sin(), derived))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sqrt;

impl UnaryFn for Sqrt {
    fn name(&self) -> &str {
        "sqrt"
    }
    fn f(&self, data: f64) -> Result<f64> {
        if data < 0. {
            debug!("sqrt called with negative argument {data}");
            return Err(EvalError::NegativeSqrt { arg: data });
        }
        Ok(data.sqrt())
    }
    fn gen_graph(&self, this: &Term, _input: &Term, derived: &Term) -> Term {
        div(derived, mul(2., this))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Exp;

impl UnaryFn for Exp {
    fn name(&self) -> &str {
        "exp"
    }
    fn f(&self, data: f64) -> Result<f64> {
        let value = data.exp();
        if value.is_infinite() && data.is_finite() {
            debug!("exp overflowed at {data}");
            return Err(EvalError::NonFinite { op: "exp", value });
        }
        Ok(value)
    }
    fn gen_graph(&self, this: &Term, _input: &Term, derived: &Term) -> Term {
        mul(this, derived)
    }
}

impl Term {
    pub fn sin(&self) -> Self {
        self.apply(Sin)
    }

    pub fn cos(&self) -> Self {
        self.apply(Cos)
    }

    /// Evaluating fails with [`EvalError::NegativeSqrt`] where the argument is
    /// negative.
    pub fn sqrt(&self) -> Self {
        self.apply(Sqrt)
    }

    pub fn exp(&self) -> Self {
        self.apply(Exp)
    }
}

pub fn sin(term: impl Into<Term>) -> Term {
    term.into().sin()
}

pub fn cos(term: impl Into<Term>) -> Term {
    term.into().cos()
}

pub fn sqrt(term: impl Into<Term>) -> Term {
    term.into().sqrt()
}

pub fn exp(term: impl Into<Term>) -> Term {
    term.into().exp()
}

#[cfg(test)]
use crate::{linear, Differentiable};

#[test]
fn test_sin_chain_rule() {
    let f = sin(linear(2., 0.));
    assert_eq!(f.value(0.).unwrap(), 0.);
    assert_eq!(f.derivative_at(0.).unwrap(), 2.);
    assert_eq!(f.derivative().to_string(), "(cos(2 * x) * 2)");
}

#[test]
fn test_cos_derivative_shape() {
    let f = cos(linear(1., 0.));
    assert_eq!(f.derivative().to_string(), "-(sin(x) * 1)");
    assert_eq!(f.derivative_at(0.).unwrap(), 0.);
}

#[test]
fn test_sqrt_domain() {
    let f = sqrt(linear(1., -4.));
    assert_eq!(f.value(1.), Err(EvalError::NegativeSqrt { arg: -3. }));
    assert_eq!(f.value(8.).unwrap(), 2.);
    assert_eq!(f.derivative_at(8.).unwrap(), 0.25);
    assert_eq!(sqrt(0.).value(0.).unwrap(), 0.);
}

#[test]
fn test_sqrt_derivative_at_zero() {
    let f = sqrt(linear(1., 0.) * linear(1., 0.));
    assert_eq!(f.value(0.).unwrap(), 0.);
    assert!(matches!(
        f.derivative_at(0.),
        Err(EvalError::DivisionByZero { .. })
    ));
}

#[test]
fn test_exp() {
    let f = exp(linear(1., 0.));
    assert_eq!(f.value(0.).unwrap(), 1.);
    assert_eq!(f.nth_derivative(3).value(0.).unwrap(), 1.);
    assert!(matches!(
        f.value(1000.),
        Err(EvalError::NonFinite { op: "exp", .. })
    ));
}
