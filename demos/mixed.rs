use std::io::Write;

use symdiff::{x, Differentiable, Term};

fn main() {
    let all = build_model();
    let derived = all.derivative();
    let mut file = std::io::BufWriter::new(std::fs::File::create("data.csv").unwrap());
    for i in -40..=40 {
        let x = i as f64 / 20. * std::f64::consts::PI;
        writeln!(file, "{x}, {}, {}", all.value(x).unwrap(), derived.value(x).unwrap()).unwrap();
    }
    println!("f(x) = {all}");
    println!("f'(x) = {derived}");
}

fn build_model() -> Term {
    let sin_a = x().sin();
    let b = x() * 5.;
    let sin_b = b.sin();
    let c_sin_b = 0.2 * &sin_b;
    &sin_a + &c_sin_b
}
