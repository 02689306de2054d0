use approx::assert_relative_eq;
use symdiff::{linear, sqrt, Differentiable, EvalError, Term};

/// `(a x)^2` supplied by hand instead of built from nodes.
#[derive(Debug)]
struct Square {
    a: f64,
}

impl Differentiable for Square {
    fn value(&self, x: f64) -> Result<f64, EvalError> {
        Ok((self.a * x).powi(2))
    }

    fn derivative(&self) -> Term {
        linear(2. * self.a * self.a, 0.)
    }

    fn name(&self) -> String {
        format!("({} * x)^2", self.a)
    }
}

#[test]
fn sqrt_of_square() {
    let a = 2.5;
    let g = sqrt(Term::custom(Square { a }));
    assert_relative_eq!(g.value(3.).unwrap(), a * 3.);
    assert_relative_eq!(g.derivative_at(3.).unwrap(), a);
    assert_relative_eq!(g.value(-4.).unwrap(), a * 4.);
    assert_relative_eq!(g.derivative_at(-4.).unwrap(), -a);
    assert_eq!(g.to_string(), "sqrt((2.5 * x)^2)");
}

#[test]
fn custom_in_expression() {
    let f = Term::custom(Square { a: 1. }) * 3. + 1.;
    assert_eq!(f.value(2.).unwrap(), 13.);
    assert_eq!(f.derivative_at(2.).unwrap(), 12.);
    assert_eq!(f.nth_derivative(2).value(2.).unwrap(), 6.);
}

#[derive(Debug)]
struct Reciprocal;

impl Differentiable for Reciprocal {
    fn value(&self, x: f64) -> Result<f64, EvalError> {
        if x == 0. {
            return Err(EvalError::DivisionByZero { numerator: 1. });
        }
        Ok(1. / x)
    }

    fn derivative(&self) -> Term {
        -(Term::custom(Reciprocal) * Term::custom(Reciprocal))
    }
}

#[test]
fn custom_errors_propagate() {
    let f = Term::custom(Reciprocal) + 1.;
    assert_eq!(f.value(0.5).unwrap(), 3.);
    assert_eq!(f.derivative_at(0.5).unwrap(), -4.);
    assert!(f.value(0.).is_err());
    assert_eq!(Term::custom(Reciprocal).to_string(), "Reciprocal");
}
