use std::thread;

use symdiff::{linear, x, Differentiable, Term};

#[test]
fn diamond() {
    let a = linear(1., 1.);
    let b = linear(3., 0.);
    let c = linear(5., 0.);
    let ab = &a + &b;
    let ac = &a + &c;
    let abac = &ab + &ac;

    println!("abac: {abac}");
    assert_eq!(abac.value(1.).unwrap(), 12.);
    assert_eq!(abac.derivative_at(1.).unwrap(), 10.);
    // a is reachable through both branches but stored once
    assert_eq!(abac.node_count(), 6);
    assert_eq!(a.to_string(), "(x + 1)");
}

#[test]
fn operands_are_not_mutated() {
    let f = x().sin();
    let before = f.to_string();
    let g = &f * 2. + &f / 3.;
    let _ = g.derivative().derivative();
    assert_eq!(f.to_string(), before);
    assert_eq!(f.value(0.).unwrap(), 0.);
}

#[test]
fn evaluate_from_threads() {
    let f: Term = x().sin() * x().cos();
    let df = f.derivative();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let df = df.clone();
            thread::spawn(move || df.value(i as f64 * 0.25).unwrap())
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let x = i as f64 * 0.25;
        let expected = (2. * x).cos();
        assert!((handle.join().unwrap() - expected).abs() < 1e-12);
    }
}
