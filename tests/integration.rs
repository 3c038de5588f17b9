//! Integration tests for the esscher pricing pipeline.
//!
//! Exercises the full path from a variate model through pricing, Greeks, and
//! implied-vol recovery, across models (normal, logistic, discrete,
//! standardized), payoff variants, both precisions, and shared-thread use.

use std::sync::Arc;
use std::thread;

use approx::assert_abs_diff_eq;
use esscher::{
    Discrete, EsscherError, ImpliedConfig, Logistic, Normal, OptionPricer, Payoff, Standardized,
    Variate,
};

// ---------------------------------------------------------------------------
// Black (standard normal) reference behavior
// ---------------------------------------------------------------------------

#[test]
fn black_put_reference_value() {
    let normal = Normal::standard();
    let pricer = OptionPricer::new(&normal);
    let put = Payoff::put(100.0).unwrap();
    assert_abs_diff_eq!(
        pricer.value(100.0, 0.1, &put).unwrap(),
        3.9877611676744920,
        epsilon = 1e-13
    );
}

#[test]
fn moneyness_reference_value() {
    let normal = Normal::standard();
    let pricer = OptionPricer::new(&normal);
    assert_abs_diff_eq!(
        pricer.moneyness(100.0, 0.1, 100.0).unwrap(),
        0.05,
        epsilon = 1e-16
    );
}

#[test]
fn greeks_chain_from_value_to_gamma() {
    // delta is the f-derivative of value; gamma the f-derivative of delta;
    // vega the s-derivative of value. One grid, all three checks.
    let normal = Normal::standard();
    let pricer = OptionPricer::new(&normal);
    let call = Payoff::call(100.0).unwrap();
    let df = 1e-4;
    let ds = 1e-5;

    for i in 0..=20 {
        let f = 90.0 + i as f64;
        let d_fd = (pricer.value(f + df, 0.15, &call).unwrap()
            - pricer.value(f - df, 0.15, &call).unwrap())
            / (2.0 * df);
        assert_abs_diff_eq!(d_fd, pricer.delta(f, 0.15, &call).unwrap(), epsilon = 1e-7);

        let g_fd = (pricer.delta(f + df, 0.15, &call).unwrap()
            - pricer.delta(f - df, 0.15, &call).unwrap())
            / (2.0 * df);
        assert_abs_diff_eq!(g_fd, pricer.gamma(f, 0.15, 100.0).unwrap(), epsilon = 1e-7);
    }

    for i in 0..=10 {
        let s = 0.1 + 0.01 * i as f64;
        let v_fd = (pricer.value(100.0, s + ds, &call).unwrap()
            - pricer.value(100.0, s - ds, &call).unwrap())
            / (2.0 * ds);
        assert_abs_diff_eq!(v_fd, pricer.vega(100.0, s, 100.0).unwrap(), epsilon = 1e-7);
    }
}

#[test]
fn degenerate_boundaries() {
    let normal = Normal::standard();
    let pricer = OptionPricer::new(&normal);
    let call = Payoff::call(100.0).unwrap();

    assert_eq!(pricer.value(0.0, 0.2, &call).unwrap(), 0.0);
    assert_eq!(pricer.value(110.0, 0.0, &call).unwrap(), 10.0);
    assert_eq!(pricer.gamma(100.0, 0.0, 100.0).unwrap(), f64::INFINITY);
    assert_eq!(pricer.delta(110.0, 0.0, &call).unwrap(), 1.0);
    assert_eq!(pricer.delta(95.0, 0.0, &call).unwrap(), 0.0);
}

#[test]
fn implied_round_trip_spec_grid() {
    let normal = Normal::standard();
    let pricer = OptionPricer::new(&normal);
    for &s in &[0.05, 0.1, 0.2, 0.5] {
        let price = pricer.value_signed(100.0, s, 100.0).unwrap();
        let vol = pricer.implied(100.0, price, 100.0).unwrap();
        assert_abs_diff_eq!(vol, s, epsilon = 1e-7);
    }
}

// ---------------------------------------------------------------------------
// Alternative variates through the same engine
// ---------------------------------------------------------------------------

#[test]
fn logistic_prices_satisfy_parity_and_round_trip() {
    let logistic = Logistic::new();
    let pricer = OptionPricer::new(&logistic);

    for &s in &[0.1, 0.3] {
        for &k in &[90.0, 100.0, 115.0] {
            let call = pricer.value(100.0, s, &Payoff::call(k).unwrap()).unwrap();
            let put = pricer.value(100.0, s, &Payoff::put(k).unwrap()).unwrap();
            assert!(call.is_finite() && put.is_finite());
            assert_abs_diff_eq!(call - put, 100.0 - k, epsilon = 1e-10);
        }
    }

    // Implied vol uses the default finite-difference edf for vega.
    let price = pricer.value_signed(100.0, 0.2, 100.0).unwrap();
    let vol = pricer.implied(100.0, price, 100.0).unwrap();
    assert_abs_diff_eq!(vol, 0.2, epsilon = 1e-6);
}

#[test]
fn logistic_fatter_tails_than_normal() {
    // Same variance, so ATM prices are close but deep wings carry more value.
    let normal = Normal::standard();
    let logistic = Logistic::new();
    let np = OptionPricer::new(&normal);
    let lp = OptionPricer::new(&logistic);

    let wing = Payoff::call(140.0).unwrap();
    let n_wing = np.value(100.0, 0.1, &wing).unwrap();
    let l_wing = lp.value(100.0, 0.1, &wing).unwrap();
    assert!(
        l_wing > n_wing,
        "logistic wing {l_wing} should exceed normal wing {n_wing}"
    );
}

#[test]
fn discrete_variate_prices_digitals() {
    // Symmetric three-point tree, mean 0 and variance 1.
    let tree = Discrete::new(vec![-1.5, 0.0, 1.5], vec![2.0 / 9.0, 5.0 / 9.0, 2.0 / 9.0]).unwrap();
    assert_abs_diff_eq!(tree.cumulant(0.0, 1), 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(tree.cumulant(0.0, 2), 1.0, epsilon = 1e-15);

    let pricer = OptionPricer::new(&tree);
    let dc = pricer
        .value(100.0, 0.2, &Payoff::digital_call(100.0).unwrap())
        .unwrap();
    let dp = pricer
        .value(100.0, 0.2, &Payoff::digital_put(100.0).unwrap())
        .unwrap();
    assert_abs_diff_eq!(dc + dp, 1.0, epsilon = 1e-14);

    // Linear payoffs still satisfy parity on a purely atomic model.
    let call = pricer.value(100.0, 0.2, &Payoff::call(95.0).unwrap()).unwrap();
    let put = pricer.value(100.0, 0.2, &Payoff::put(95.0).unwrap()).unwrap();
    assert_abs_diff_eq!(call - put, 5.0, epsilon = 1e-12);
}

#[test]
fn standardized_normal_prices_like_standard() {
    let shifted = Standardized::new(Normal::new(0.8, 2.5).unwrap()).unwrap();
    let standard = Normal::standard();
    let sp = OptionPricer::new(&shifted);
    let np = OptionPricer::new(&standard);

    for &s in &[0.1, 0.3] {
        for &k in &[-110.0, 90.0, 100.0] {
            assert_abs_diff_eq!(
                sp.value_signed(100.0, s, k).unwrap(),
                np.value_signed(100.0, s, k).unwrap(),
                epsilon = 1e-10
            );
        }
    }

    let price = sp.value_signed(100.0, 0.2, 100.0).unwrap();
    let vol = sp.implied(100.0, price, 100.0).unwrap();
    assert_abs_diff_eq!(vol, 0.2, epsilon = 1e-7);
}

// ---------------------------------------------------------------------------
// Precision, concurrency, serialization
// ---------------------------------------------------------------------------

#[test]
fn single_precision_engine_end_to_end() {
    let normal = Normal::<f32>::standard();
    let pricer = OptionPricer::new(&normal);
    let call = Payoff::call(100.0_f32).unwrap();

    let value = pricer.value(100.0, 0.2, &call).unwrap();
    assert_abs_diff_eq!(value, 7.965_567_5_f32, epsilon = 1e-4);

    let vol = pricer.implied(100.0_f32, value, 100.0).unwrap();
    assert_abs_diff_eq!(vol, 0.2_f32, epsilon = 1e-3);
}

#[test]
fn concurrent_pricing_against_shared_variate() {
    let normal = Arc::new(Normal::<f64>::standard());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let normal = Arc::clone(&normal);
            thread::spawn(move || {
                let pricer = OptionPricer::new(&*normal);
                let k = 90.0 + 5.0 * i as f64;
                let price = pricer.value_signed(100.0, 0.25, k).unwrap();
                pricer.implied(100.0, price, k).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let vol = handle.join().unwrap();
        assert_abs_diff_eq!(vol, 0.25, epsilon = 1e-7);
    }
}

#[test]
fn model_and_config_serde() {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let json = serde_json::to_string(&normal).unwrap();
    let back: Normal<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(normal, back);

    let payoff = Payoff::digital_put(95.0_f64).unwrap();
    let json = serde_json::to_string(&payoff).unwrap();
    let back: Payoff<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(payoff, back);

    let config = ImpliedConfig::<f64>::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(serde_json::from_str::<ImpliedConfig<f64>>(&json).is_ok());
}

#[test]
fn errors_are_structured() {
    let normal = Normal::standard();
    let pricer = OptionPricer::new(&normal);

    let err = pricer.moneyness(100.0, 0.0, 100.0).unwrap_err();
    assert!(matches!(err, EsscherError::InvalidInput { .. }));
    assert!(err.to_string().contains("vol"));

    let config = ImpliedConfig {
        s0: 5.0,
        max_iter: 2,
        ..ImpliedConfig::default()
    };
    let price = pricer.value_signed(100.0, 0.4, 100.0).unwrap();
    let err = pricer.implied_with(100.0, price, 100.0, &config).unwrap_err();
    assert!(matches!(err, EsscherError::NoConvergence { .. }));
}
