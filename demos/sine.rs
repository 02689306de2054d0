use symdiff::{x, Differentiable};

fn main() {
    let sin_x = x().sin();
    let d1 = sin_x.derivative();
    let d2 = d1.derivative();
    for i in -10..=10 {
        let x = i as f64 / 10. * std::f64::consts::PI;
        println!(
            "[{x}, {}, {}, {}],",
            sin_x.value(x).unwrap(),
            d1.value(x).unwrap(),
            d2.value(x).unwrap()
        );
    }
}
