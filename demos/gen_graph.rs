use symdiff::{x, Differentiable, EvalError, Term, UnaryFn};

/// Hyperbolic tangent, whose derivative `1 - tanh^2` reuses the node itself.
#[derive(Debug)]
struct Tanh;

impl UnaryFn for Tanh {
    fn name(&self) -> &str {
        "tanh"
    }

    fn f(&self, data: f64) -> Result<f64, EvalError> {
        Ok(data.tanh())
    }

    fn gen_graph(&self, this: &Term, _input: &Term, derived: &Term) -> Term {
        (1. - this * this) * derived
    }
}

fn main() {
    let f = (x() * 2.).apply(Tanh);
    let df = f.derivative();
    eprintln!("f'(0.5) = {}", df.value(0.5).unwrap());
    df.dot(&mut std::io::stdout()).unwrap();
}
