use std::time::Duration;

use area_chart::core::{CategoryScale, Datum, LinearScale, nice_domain, shared, ticks};
use area_chart::interaction::IntervalTimer;
use area_chart::render::NullRenderer;
use area_chart::widget::{AreaChart, AreaChartProps};
use proptest::prelude::*;

fn dataset(len: usize) -> Vec<Datum> {
    (0..len)
        .map(|i| Datum::new(format!("2021-01-{:02}", i + 1), (i * 7 % 13) as f64))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn cycling_index_is_tick_count_modulo_len(len in 1usize..12, ticks in 0u32..40) {
        let props = AreaChartProps::new()
            .with_data(shared(dataset(len)))
            .with_duration(Duration::from_millis(250));
        let mut widget = AreaChart::new(props, |_| Ok(NullRenderer::default()));
        widget.mount().expect("mount");

        let fired = widget
            .advance(Duration::from_millis(250) * ticks)
            .expect("advance");
        prop_assert_eq!(fired, ticks as usize);
        prop_assert_eq!(widget.cycling_index(), ticks as usize % len);
    }

    #[test]
    fn interval_timer_fires_whole_periods(
        period_ms in 1u64..5_000,
        steps in proptest::collection::vec(0u64..20_000, 0..20)
    ) {
        let mut timer = IntervalTimer::new(Duration::from_millis(period_ms)).expect("timer");
        let fired: u64 = steps
            .iter()
            .map(|step| u64::from(timer.advance(Duration::from_millis(*step))))
            .sum();
        let total: u64 = steps.iter().sum();
        prop_assert_eq!(fired, total / period_ms);
        prop_assert_eq!(timer.state().pending, Duration::from_millis(total % period_ms));
    }

    #[test]
    fn nice_domain_covers_the_data(min in -1.0e6f64..1.0e6, span in 1.0e-3f64..1.0e6) {
        let max = min + span;
        let (lo, hi) = nice_domain(min, max, 5);
        prop_assert!(lo <= min);
        prop_assert!(hi >= max);
        let values = ticks(lo, hi, 5);
        prop_assert!(!values.is_empty());
        prop_assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn linear_scale_inverts(
        start in -1.0e4f64..1.0e4,
        span in 1.0f64..1.0e4,
        value in -1.0e4f64..1.0e4
    ) {
        let scale = LinearScale::new(start, start + span)
            .and_then(|scale| scale.with_range([0.0, 0.95]))
            .expect("scale");
        let back = scale.invert(scale.scale(value).expect("scale")).expect("invert");
        prop_assert!((back - value).abs() <= 1e-6 * value.abs().max(1.0));
    }

    #[test]
    fn category_positions_round_trip_to_their_index(len in 1usize..40, index_seed in 0usize..1000) {
        let values: Vec<String> = (0..len).map(|i| format!("c{i}")).collect();
        let scale = CategoryScale::new(values, [0.0, 0.99]);
        let index = index_seed % len;
        prop_assert_eq!(scale.nearest_index(scale.scale_index(index)), Some(index));
    }
}
