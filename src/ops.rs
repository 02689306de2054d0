//! Composition of terms with arithmetic.
//!
//! The functions [`add`], [`sub`], [`mul`], [`div`] and [`neg`] build the
//! composite nodes. The operator implementations below are sugar over them
//! for every mix of `Term`, `&Term` and numeric literals. Literals are
//! coerced to constants and operand order is kept as written.

use std::ops;

use crate::{term::TermInt, Term};

pub fn add(lhs: impl Into<Term>, rhs: impl Into<Term>) -> Term {
    Term::new_payload(TermInt::Add(lhs.into(), rhs.into()))
}

pub fn sub(lhs: impl Into<Term>, rhs: impl Into<Term>) -> Term {
    Term::new_payload(TermInt::Sub(lhs.into(), rhs.into()))
}

pub fn mul(lhs: impl Into<Term>, rhs: impl Into<Term>) -> Term {
    Term::new_payload(TermInt::Mul(lhs.into(), rhs.into()))
}

pub fn div(lhs: impl Into<Term>, rhs: impl Into<Term>) -> Term {
    Term::new_payload(TermInt::Div(lhs.into(), rhs.into()))
}

pub fn neg(term: impl Into<Term>) -> Term {
    Term::new_payload(TermInt::Neg(term.into()))
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::constant(value)
    }
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::constant(f64::from(value))
    }
}

impl From<&Term> for Term {
    fn from(value: &Term) -> Self {
        value.clone()
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $build:ident) => {
        impl ops::$trait<Term> for Term {
            type Output = Term;
            fn $method(self, rhs: Term) -> Term {
                $build(self, rhs)
            }
        }

        impl ops::$trait<&Term> for Term {
            type Output = Term;
            fn $method(self, rhs: &Term) -> Term {
                $build(self, rhs)
            }
        }

        impl ops::$trait<Term> for &Term {
            type Output = Term;
            fn $method(self, rhs: Term) -> Term {
                $build(self, rhs)
            }
        }

        impl ops::$trait<&Term> for &Term {
            type Output = Term;
            fn $method(self, rhs: &Term) -> Term {
                $build(self, rhs)
            }
        }

        impl_binary_op!(@scalar $trait, $method, $build, f64);
        impl_binary_op!(@scalar $trait, $method, $build, i32);
    };

    (@scalar $trait:ident, $method:ident, $build:ident, $scalar:ty) => {
        impl ops::$trait<$scalar> for Term {
            type Output = Term;
            fn $method(self, rhs: $scalar) -> Term {
                $build(self, rhs)
            }
        }

        impl ops::$trait<$scalar> for &Term {
            type Output = Term;
            fn $method(self, rhs: $scalar) -> Term {
                $build(self, rhs)
            }
        }

        impl ops::$trait<Term> for $scalar {
            type Output = Term;
            fn $method(self, rhs: Term) -> Term {
                $build(self, rhs)
            }
        }

        impl ops::$trait<&Term> for $scalar {
            type Output = Term;
            fn $method(self, rhs: &Term) -> Term {
                $build(self, rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Sub, sub, sub);
impl_binary_op!(Mul, mul, mul);
impl_binary_op!(Div, div, div);

impl ops::Neg for Term {
    type Output = Term;
    fn neg(self) -> Term {
        neg(self)
    }
}

impl ops::Neg for &Term {
    type Output = Term;
    fn neg(self) -> Term {
        neg(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{linear, x, Differentiable};

    #[test]
    fn test_literal_coercion() {
        let f = linear(3., 0.);
        assert_eq!((&f + 2.).value(5.).unwrap(), 17.);
        assert_eq!((2. + &f).value(5.).unwrap(), 17.);
        assert_eq!((&f + 2).to_string(), "((3 * x) + 2)");
        assert_eq!((2 + &f).to_string(), "(2 + (3 * x))");
    }

    #[test]
    fn test_operand_order() {
        let f = linear(2., 0.);
        let h = 10. - &f;
        assert_eq!(h.value(1.5).unwrap(), 7.);
        assert_eq!(h.derivative_at(1.5).unwrap(), -2.);
        assert_eq!((&f - 10.).value(1.5).unwrap(), -7.);
        assert_eq!((1. / x()).value(4.).unwrap(), 0.25);
        assert_eq!((x() / 1.).value(4.).unwrap(), 4.);
    }

    #[test]
    fn test_explicit_functions() {
        let f = add(mul(2, x()), neg(1));
        assert_eq!(f.to_string(), "((2 * x) + -1)");
        assert_eq!(f.value(3.).unwrap(), 5.);
        assert_eq!(sub(x(), 1).value(3.).unwrap(), 2.);
        assert_eq!(div(x(), 2).value(3.).unwrap(), 1.5);
        assert_eq!((-&f).value(3.).unwrap(), -5.);
    }
}
