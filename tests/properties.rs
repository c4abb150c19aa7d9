//! Property-based tests for throttling and loop termination.

use loop_progress::ProgressBuilder;
use proptest::prelude::*;

/// Runs a full loop and returns the loop values and everything written to the sink.
fn run(total: u64, ticks: u64, step: u64) -> (Vec<u64>, String) {
    let mut out = Vec::new();
    let values = {
        let mut bar = ProgressBuilder::new(total)
            .ticks(ticks)
            .update(step)
            .build(&mut out)
            .unwrap();
        let values: Vec<u64> = bar.iter().collect();
        assert!(bar.is_finished());
        values
    };
    (values, String::from_utf8(out).unwrap())
}

/// Drawn lines, without the trailing newline.
fn drawn(out: &str) -> Vec<&str> {
    let body = out.strip_suffix('\n').expect("finalizing newline");
    body.split_terminator('\r').collect()
}

fn percent(line: &str) -> u64 {
    line.strip_suffix('%')
        .and_then(|rest| rest.rsplit(' ').next())
        .and_then(|pct| pct.parse().ok())
        .unwrap_or_else(|| panic!("no percentage in {line:?}"))
}

/// Generates a total with a tick count that does not exceed it.
fn arb_total_and_ticks() -> impl Strategy<Value = (u64, u64)> {
    (1u64..2_000).prop_flat_map(|total| (Just(total), 1..=total))
}

proptest! {
    /// One line per tick, and the loop stops exactly at the total.
    #[test]
    fn prop_one_line_per_tick((total, ticks) in arb_total_and_ticks()) {
        let (values, out) = run(total, ticks, 1);

        prop_assert_eq!(values.len() as u64, total);
        prop_assert_eq!(values.last().copied(), Some(total - 1));
        prop_assert_eq!(drawn(&out).len() as u64, ticks);

        let last = format!(" {total} / {total}  100%");
        prop_assert!(drawn(&out).last().is_some_and(|line| line.ends_with(&last)));
    }

    /// Drawn percentages never go down and end on 100.
    #[test]
    fn prop_percent_monotonic((total, ticks) in arb_total_and_ticks()) {
        let (_, out) = run(total, ticks, 1);
        let percents: Vec<u64> = drawn(&out).into_iter().map(percent).collect();

        prop_assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_eq!(percents.last().copied(), Some(100));
    }

    /// A step of `s` runs `ceil(total / s)` bodies, yielding multiples of `s`.
    #[test]
    fn prop_step_count(total in 1u64..500, step in 1u64..50) {
        let (values, _) = run(total, total, step);

        prop_assert_eq!(values.len() as u64, total.div_ceil(step));
        prop_assert!(values.iter().enumerate().all(|(i, v)| *v == i as u64 * step));
    }
}
