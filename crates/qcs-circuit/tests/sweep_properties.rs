//! Property tests for sweep normalization.

use proptest::prelude::*;
use qcs_circuit::{ParamResolver, Sweep, Sweepable, to_resolvers};

proptest! {
    #[test]
    fn linspace_yields_length_points_with_exact_endpoints(
        start in -10.0f64..10.0,
        stop in -10.0f64..10.0,
        length in 2usize..40,
    ) {
        let rs = Sweep::linspace("t", start, stop, length).resolvers().unwrap();
        prop_assert_eq!(rs.len(), length);
        prop_assert_eq!(rs[0].get("t"), Some(start));
        prop_assert_eq!(rs[length - 1].get("t"), Some(stop));
    }

    #[test]
    fn product_length_is_product_of_factor_lengths(a in 0usize..6, b in 0usize..6, c in 1usize..4) {
        let sweep = Sweep::Product(vec![
            Sweep::linspace("a", 0.0, 1.0, a),
            Sweep::linspace("b", 0.0, 1.0, b),
            Sweep::linspace("c", 0.0, 1.0, c),
        ]);
        let rs = sweep.resolvers().unwrap();
        prop_assert_eq!(rs.len(), a * b * c);
        prop_assert_eq!(rs.len(), sweep.len());
        for r in &rs {
            prop_assert_eq!(r.len(), 3);
        }
    }

    #[test]
    fn points_preserve_order(values in proptest::collection::vec(-5.0f64..5.0, 0..20)) {
        let sweepable: Sweepable = Sweep::points("x", values.clone()).into();
        let rs = to_resolvers(&sweepable).unwrap();
        let got: Vec<f64> = rs.iter().filter_map(|r| r.get("x")).collect();
        prop_assert_eq!(got, values);
    }

    #[test]
    fn explicit_resolver_lists_round_trip(n in 0usize..10) {
        let resolvers: Vec<ParamResolver> = (0..n)
            .map(|i| ParamResolver::new().with("k", i as f64))
            .collect();
        let sweepable: Sweepable = resolvers.clone().into();
        prop_assert_eq!(to_resolvers(&sweepable).unwrap(), resolvers);
    }
}
