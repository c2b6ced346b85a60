use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn in_out_rates_are_point_symmetric() {
    for ease in [Ease::InOutQuad, Ease::InOutCubic, Ease::Smoothstep] {
        assert_eq!(ease.apply(0.5), 0.5);
        for t in [0.1, 0.3, 0.45] {
            assert!((ease.apply(t) + ease.apply(1.0 - t) - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn out_rates_mirror_in_rates() {
    for (ease_in, ease_out) in [(Ease::InQuad, Ease::OutQuad), (Ease::InCubic, Ease::OutCubic)] {
        for t in [0.2, 0.5, 0.8] {
            assert!((ease_out.apply(t) - (1.0 - ease_in.apply(1.0 - t))).abs() < 1e-12);
        }
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    assert_eq!(Ease::InCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::OutQuad.apply(7.0), 1.0);
}

#[test]
fn serde_uses_kebab_case() {
    let s = serde_json::to_string(&Ease::InOutCubic).unwrap();
    assert_eq!(s, "\"in-out-cubic\"");
    let e: Ease = serde_json::from_str("\"smoothstep\"").unwrap();
    assert_eq!(e, Ease::Smoothstep);
}
