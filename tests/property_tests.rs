use proptest::prelude::*;
use std::time::Duration;
use u_scheduler::scheduler::{
    is_logarithmic_number, sdiv, Method, MethodResult, MethodSequence, Scheduler,
    SchedulerConfig, Solution,
};

#[derive(Clone, Debug)]
struct Cost(f64);

impl Solution for Cost {
    fn objective(&self) -> f64 {
        self.0
    }
}

fn noop_methods(n: usize) -> Vec<Method<Cost>> {
    (0..n)
        .map(|i| {
            Method::new(
                format!("m{i}"),
                |_: &mut Cost, _: &usize, _: &mut MethodResult| {},
                i,
            )
        })
        .collect()
}

fn names(methods: impl Iterator<Item = Method<Cost>>) -> Vec<String> {
    methods.map(|m| m.name().to_string()).collect()
}

// --- STRATEGIES ---

prop_compose! {
    fn arb_deltas()(deltas in proptest::collection::vec(-10.0..10.0f64, 1..60)) -> Vec<f64> {
        deltas
    }
}

proptest! {
    #[test]
    fn sdiv_is_quotient_for_nonzero(x in -1e6..1e6f64, y in -1e6..1e6f64) {
        prop_assume!(y != 0.0);
        prop_assert_eq!(sdiv(x, y), x / y);
    }

    #[test]
    fn sdiv_is_nan_for_zero(x in -1e6..1e6f64) {
        prop_assert!(sdiv(x, 0.0).is_nan());
    }

    #[test]
    fn single_pass_yields_each_method_once_in_order(n in 0usize..12, seed in any::<u64>()) {
        let ms = noop_methods(n);
        let got = names(MethodSequence::new(&ms, false, false, seed));
        prop_assert_eq!(got, names(ms.into_iter()));
    }

    #[test]
    fn randomized_repeat_blocks_are_permutations(
        n in 1usize..10,
        passes in 1usize..8,
        seed in any::<u64>(),
    ) {
        let ms = noop_methods(n);
        let mut expected = names(ms.clone().into_iter());
        expected.sort();
        let mut seq = MethodSequence::new(&ms, true, true, seed);
        for _ in 0..passes {
            let mut block = names(seq.by_ref().take(n));
            block.sort();
            prop_assert_eq!(&block, &expected);
        }
    }

    #[test]
    fn iteration_counts_calls_and_incumbent_never_worsens(deltas in arb_deltas()) {
        let step = Method::new(
            "step",
            |s: &mut Cost, _: &usize, res: &mut MethodResult| {
                res.log_info = Some(format!("{}", s.0));
            },
            0,
        );
        let mut sched = Scheduler::new(
            Cost(0.0),
            vec![step.clone()],
            SchedulerConfig::unbounded(),
            true,
        );
        let mut sol = sched.incumbent().clone();
        let mut best = sched.incumbent().objective();

        for (i, d) in deltas.iter().enumerate() {
            sol.0 += d;
            let before = sched.incumbent().objective();
            sched.perform_method(&step, &mut sol, false).unwrap();
            let after = sched.incumbent().objective();

            prop_assert_eq!(sched.iteration(), i + 1);
            prop_assert!(after <= before, "incumbent worsened: {} -> {}", before, after);
            best = best.min(sol.0);
            prop_assert_eq!(after, best);
        }
    }

    #[test]
    fn update_incumbent_reports_exactly_the_copies(values in proptest::collection::vec(-100i32..100, 1..40)) {
        let mut sched: Scheduler<Cost> =
            Scheduler::new(Cost(0.0), Vec::new(), SchedulerConfig::default(), false);
        let mut best: Option<f64> = None;
        for v in values {
            let v = v as f64;
            let expected = best.is_none_or(|b| v < b);
            let replaced = sched.update_incumbent(&Cost(v), Duration::ZERO);
            prop_assert_eq!(replaced, expected);
            if expected {
                best = Some(v);
            }
            prop_assert_eq!(Some(sched.incumbent().objective()), best);
        }
    }

    #[test]
    fn logarithmic_numbers_have_a_single_leading_digit_of_1_2_5(k in 0u32..15, d in 1usize..10) {
        let x = d * 10usize.pow(k);
        prop_assert_eq!(is_logarithmic_number(x), matches!(d, 1 | 2 | 5));
    }
}
