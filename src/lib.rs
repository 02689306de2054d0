//! Symbolic differentiation of single variable expressions.
//!
//! Expressions are built from elementary terms with the arithmetic operators,
//! evaluated with [`Differentiable::value`] and differentiated with
//! [`Differentiable::derivative`], which returns another expression.
//!
//! ```
//! use symdiff::{constant, x, Differentiable};
//!
//! let f = x().sin() + constant(2.) * x().cos();
//! let df = f.derivative();
//! assert!((df.value(0.5).unwrap() - (0.5f64.cos() - 2. * 0.5f64.sin())).abs() < 1e-9);
//! ```
pub mod error;
mod ops;
mod term;
mod unary_fn;

pub use error::EvalError;
pub use ops::{add, div, mul, neg, sub};
pub use term::{constant, linear, x, Differentiable, Term};
pub use unary_fn::{cos, exp, sin, sqrt, Cos, Exp, Sin, Sqrt, UnaryFn};
