use super::*;

const ALL: [Ease; 2] = [Ease::Linear, Ease::Smooth];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), ease.apply(0.0));
        assert_eq!(ease.apply(7.0), ease.apply(1.0));
    }
}

#[test]
fn smooth_is_symmetric_and_monotonic() {
    assert!((Ease::Smooth.apply(0.5) - 0.5).abs() < 1e-12);
    let a = Ease::Smooth.apply(0.2);
    let b = Ease::Smooth.apply(0.8);
    assert!((a + b - 1.0).abs() < 1e-9);

    let mut prev = 0.0;
    for i in 1..=100 {
        let v = Ease::Smooth.apply(f64::from(i) / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn smooth_starts_slower_than_linear() {
    assert!(Ease::Smooth.apply(0.1) < 0.1);
    assert!(Ease::Smooth.apply(0.9) > 0.9);
}

#[test]
fn serde_names_are_snake_case() {
    let s = serde_json::to_string(&Ease::Linear).unwrap();
    assert_eq!(s, "\"linear\"");
    let e: Ease = serde_json::from_str("\"smooth\"").unwrap();
    assert_eq!(e, Ease::Smooth);
}
