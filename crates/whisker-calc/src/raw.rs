//! Statistics for traces carrying raw samples.

use whisker_stats::summary::BoxSummary;

use crate::{
    calc::TraceFrame,
    record::{BoxRecord, Sample, ValueRange},
    trace::PointsMode,
};

/// Groups the samples of a trace by position and computes one record per
/// non-empty group, in ascending position order.
pub(crate) fn aggregate(frame: &TraceFrame<'_>) -> (Vec<BoxRecord>, Option<ValueRange>) {
    let trace = frame.trace;
    let values = frame.val_axis.make_calcdata(
        trace.data(frame.val_letter).unwrap_or_default(),
        frame.len,
    );

    let mut pts_per_bin = vec![Vec::<Sample>::new(); frame.bins.len()];
    for (i, (v, pos)) in values.iter().zip(&frame.positions).enumerate() {
        let (Some(v), Some(pos)) = (*v, *pos) else {
            continue;
        };
        let Some(bin) = frame.bins.bin_of(pos) else {
            continue;
        };
        let (tx, htx) = trace.texts_at(i);
        pts_per_bin[bin].push(Sample {
            tx,
            htx,
            ..Sample::new(v, i)
        });
    }

    let points = trace.points_mode();
    let mut min_lower_notch = f64::INFINITY;
    let mut max_upper_notch = f64::NEG_INFINITY;
    let mut records = vec![];

    for (&pos, mut pts) in frame.bins.distinct().iter().zip(pts_per_bin) {
        pts.sort_by(|a, b| a.v.total_cmp(&b.v));
        let box_vals = pts.iter().map(|pt| pt.v).collect::<Vec<_>>();
        let Some(summary) = BoxSummary::from_sorted(&box_vals, trace.quartile_method) else {
            continue;
        };

        min_lower_notch = min_lower_notch.min(summary.ln);
        max_upper_notch = max_upper_notch.max(summary.un);

        let pts2 = match points {
            PointsMode::All => (0..pts.len()).collect(),
            PointsMode::None | PointsMode::Outliers | PointsMode::SuspectedOutliers => box_vals
                .iter()
                .enumerate()
                .filter(|&(_, &v)| summary.is_outside_fences(v))
                .map(|(k, _)| k)
                .collect(),
        };

        records.push(BoxRecord {
            pos,
            pos_letter: frame.pos_letter,
            min: summary.min,
            q1: summary.q1,
            med: summary.med,
            q3: summary.q3,
            max: summary.max,
            lf: summary.lf,
            uf: summary.uf,
            lo: Some(summary.lo),
            uo: Some(summary.uo),
            ln: summary.ln,
            un: summary.un,
            mean: Some(summary.mean),
            sd: Some(summary.sd),
            pts,
            pts2,
            meta: None,
        });
    }

    let notches = if trace.is_notched() {
        vec![min_lower_notch, max_upper_notch]
    } else {
        vec![]
    };
    let range = ValueRange::padded_from(values.iter().flatten().copied().chain(notches));

    (records, range)
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;
    use serde_json::json;

    use crate::{
        axis::{CategoryAxis, LinearAxis},
        calc::calc_box,
        record::{BoxCalc, BoxRecord, CalcOutput, Sample},
        trace::{AxisLetter, BoxTrace},
    };

    fn run(value: serde_json::Value) -> CalcOutput {
        let trace: BoxTrace = serde_json::from_value(value).unwrap();
        calc_box(&trace, &LinearAxis, &LinearAxis, 0)
    }

    fn records(value: serde_json::Value) -> Vec<BoxRecord> {
        run(value).calc.records().to_vec()
    }

    fn indices<'a>(samples: impl Iterator<Item = &'a Sample>) -> Vec<usize> {
        samples.map(|pt| pt.i).collect()
    }

    #[test]
    fn test_groups_by_distinct_position() {
        let output = run(json!({
            "x": [1, 1, 2, 2, 5],
            "y": [10, 11, 20, 21, 50],
        }));
        let records = output.calc.records();
        assert_eq!(
            records.iter().map(|r| r.pts.len()).collect::<Vec<_>>(),
            [2, 2, 1]
        );
        assert_eq!(
            records.iter().map(|r| r.pos).collect::<Vec<_>>(),
            [1.0, 2.0, 5.0]
        );
        assert_eq!(output.calc.meta().unwrap().d_pos, 0.5);
        assert!(records[1..].iter().all(|r| r.meta.is_none()));
    }

    #[test]
    fn test_single_sample_box() {
        let records = records(json!({ "y": [7.25] }));
        let r = &records[0];
        assert_eq!(
            (r.min, r.lf, r.q1, r.med, r.q3, r.uf, r.max),
            (7.25, 7.25, 7.25, 7.25, 7.25, 7.25, 7.25)
        );
        assert_eq!(r.mean, Some(7.25));
        assert_eq!(r.sd, Some(0.0));
        assert!(r.is_flat());
    }

    #[test]
    fn test_unusable_samples_are_dropped() {
        let records = records(json!({
            "x": [1, "bad", 1, null, 1],
            "y": [1, 2, "x", 4, "5"],
        }));
        assert_eq!(records.len(), 1);
        assert_eq!(indices(records[0].pts.iter()), [0, 4]);
        assert_eq!(records[0].max, 5.0);
    }

    #[test]
    fn test_no_usable_samples_is_empty() {
        let output = run(json!({ "x": [1, 2], "y": [null, "n/a"] }));
        assert_eq!(output.calc, BoxCalc::Empty);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_samples_sorted_with_text() {
        let records = records(json!({
            "y": [3, 1, 2],
            "text": ["three", "one", null],
            "hovertext": [null, "h1"],
        }));
        let pts = &records[0].pts;
        assert_eq!(pts.iter().map(|pt| pt.v).collect::<Vec<_>>(), [1.0, 2.0, 3.0]);
        assert_eq!(indices(pts.iter()), [1, 2, 0]);
        assert_eq!(pts[0].tx.as_deref(), Some("one"));
        assert_eq!(pts[0].htx.as_deref(), Some("h1"));
        assert_eq!(pts[1].tx, None);
        assert_eq!(pts[2].tx.as_deref(), Some("three"));
    }

    #[test]
    fn test_shared_text_is_not_copied_per_sample() {
        let records = records(json!({
            "y": [2, 1],
            "text": "same label",
            "hovertext": [10, "b"],
        }));
        let pts = &records[0].pts;
        assert!(pts.iter().all(|pt| pt.tx.is_none()));
        assert_eq!(pts[0].htx.as_deref(), Some("b"));
        assert_eq!(pts[1].htx.as_deref(), Some("10"));
    }

    #[test]
    fn test_points_filter_by_mode() {
        let y = json!([-40, 1, 2, 3, 4, 5, 6, 7, 8, 9, 90]);
        for mode in [json!(false), json!("outliers"), json!("suspectedoutliers")] {
            let records = records(json!({ "y": y, "boxpoints": mode }));
            assert_eq!(indices(records[0].plotted_points()), [0, 10]);
        }
        let records = records(json!({ "y": y, "boxpoints": "all" }));
        assert_eq!(records[0].pts2.len(), 11);
    }

    #[test]
    fn test_suspected_outlier_thresholds() {
        let records = records(json!({ "y": [1, 2, 3, 4] }));
        let r = &records[0];
        assert_eq!((r.q1, r.q3), (1.5, 3.5));
        assert_eq!(r.lo, Some(-4.5));
        assert_eq!(r.uo, Some(9.5));
    }

    #[test]
    fn test_quartile_methods() {
        let y = json!([1, 2, 3, 4, 5]);
        let q = |method: &str| {
            let r = records(json!({ "y": y, "quartilemethod": method })).remove(0);
            (r.q1, r.med, r.q3)
        };
        assert_eq!(q("linear"), (1.75, 3.0, 4.25));
        assert_eq!(q("exclusive"), (1.5, 3.0, 4.5));
        assert_eq!(q("inclusive"), (2.0, 3.0, 4.0));
    }

    #[test]
    fn test_even_size_quartile_methods_agree() {
        let y = json!([9, 2, 7, 4, 5, 1]);
        let linear = records(json!({ "y": y }));
        for method in ["exclusive", "inclusive"] {
            let other = records(json!({ "y": y, "quartilemethod": method }));
            assert_eq!(other, linear);
        }
    }

    #[test]
    fn test_range_includes_notches_when_notched() {
        let plain = run(json!({ "y": [1, 2, 3, 4] })).calc.range().unwrap();
        assert_eq!((plain.min, plain.max), (1.0, 4.0));
        assert!(plain.padded);

        let notched = run(json!({ "y": [1, 2, 3, 4], "notched": true }))
            .calc
            .range()
            .unwrap();
        assert!((notched.min - (2.5 - 1.57)).abs() < 1e-12);
        assert!((notched.max - (2.5 + 1.57)).abs() < 1e-12);
    }

    #[test]
    fn test_range_covers_values_without_position() {
        let range = run(json!({ "x": [0, null], "y": [1, 100] })).calc.range().unwrap();
        assert_eq!((range.min, range.max), (1.0, 100.0));
    }

    #[test]
    fn test_horizontal_orientation() {
        let output = run(json!({
            "x": [5, 6, 7],
            "y": [0, 0, 1],
            "orientation": "h",
        }));
        let records = output.calc.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pos_letter, AxisLetter::Y);
        assert_eq!(records[0].med, 5.5);
        let meta = output.calc.meta().unwrap();
        assert_eq!((meta.pos_letter, meta.val_letter), (AxisLetter::Y, AxisLetter::X));
    }

    #[test]
    fn test_category_positions() {
        let trace: BoxTrace = serde_json::from_value(json!({
            "x": ["b", "a", "b", "zz"],
            "y": [1, 2, 3, 4],
        }))
        .unwrap();
        let xaxis = CategoryAxis::new(["a".to_owned(), "b".to_owned()]).unwrap();
        let output = calc_box(&trace, &xaxis, &LinearAxis, 0);
        let records = output.calc.records();
        assert_eq!(records.len(), 2);
        assert_eq!(indices(records[0].pts.iter()), [1]);
        assert_eq!(indices(records[1].pts.iter()), [0, 2]);
    }

    #[test]
    fn test_position_fallbacks() {
        let at = |value: serde_json::Value, slot: u32| {
            let trace: BoxTrace = serde_json::from_value(value).unwrap();
            calc_box(&trace, &LinearAxis, &LinearAxis, slot).calc.records()[0].pos
        };
        assert_eq!(at(json!({ "y": [1], "x0": 4 }), 3), 4.0);
        assert_eq!(at(json!({ "y": [1], "name": "2.5" }), 3), 2.5);
        assert_eq!(at(json!({ "y": [1], "name": "trace 1" }), 3), 3.0);

        let trace: BoxTrace =
            serde_json::from_value(json!({ "y": [1], "x0": "nowhere" })).unwrap();
        assert!(calc_box(&trace, &LinearAxis, &LinearAxis, 0).calc.is_empty());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let value = json!({
            "x": [3, 1, 3, 1, 2, 2, 2],
            "y": [0.1, 5.5, -2.0, 3.3, 9.9, 1e-3, 7.0],
            "notched": true,
            "selectedpoints": [2],
        });
        assert_eq!(run(value.clone()), run(value));
    }

    #[test]
    fn test_selection_flags_one_sample() {
        let output = run(json!({
            "x": [0, 0, 1, 1, 1],
            "y": [1, 2, 3, 4, 5],
            "selectedpoints": [3, 42, -1, 1.5],
        }));
        let records = output.calc.records();
        assert_eq!(indices(records[0].selected_points()), Vec::<usize>::new());
        assert_eq!(indices(records[1].selected_points()), [3]);
        let unselected = records.iter().flat_map(|r| &r.pts).filter(|pt| !pt.selected);
        assert_eq!(unselected.count(), 4);
    }

    #[test]
    fn test_meta_labels() {
        let output = run(json!({ "y": [1, 2], "boxmean": "sd" }));
        assert_eq!(output.calc.meta().unwrap().labels.mean, "mean ± σ:");
        let output = run(json!({ "y": [1, 2] }));
        assert_eq!(output.calc.meta().unwrap().labels.mean, "mean:");
    }

    #[test]
    fn test_value_strings_parse() {
        let records = records(json!({ "y": ["1", " 2 ", null] }));
        assert_eq!(records[0].pts.len(), 2);
    }

    #[test]
    fn test_random_traces_keep_box_invariants() {
        // interpolated quartiles may overshoot a bracketing value by rounding
        const EPS: f64 = 1e-9;

        let mut rng = Pcg64Mcg::seed_from_u64(7);
        for _ in 0..200 {
            let len = rng.random_range(1..80);
            let x = (0..len)
                .map(|_| json!(rng.random_range(0..5)))
                .collect::<Vec<_>>();
            let y = (0..len)
                .map(|_| {
                    if rng.random_bool(0.05) {
                        json!(null)
                    } else {
                        json!(rng.random_range(-100.0..100.0))
                    }
                })
                .collect::<Vec<_>>();
            let num_valid = y.iter().filter(|v| !v.is_null()).count();

            let output = run(json!({ "x": x, "y": y, "boxpoints": "suspectedoutliers" }));
            let records = output.calc.records();
            assert_eq!(records.iter().map(|r| r.pts.len()).sum::<usize>(), num_valid);
            assert!(records.windows(2).all(|w| w[0].pos < w[1].pos));
            for r in records {
                assert!(r.min <= r.lf + EPS && r.lf <= r.q1);
                assert!(r.q1 <= r.med + EPS && r.med <= r.q3 + EPS);
                assert!(r.q3 <= r.uf && r.uf <= r.max + EPS);
                assert!(r.pts.windows(2).all(|w| w[0].v <= w[1].v));
                assert!(r.pts2.windows(2).all(|w| w[0] < w[1]));
                assert!(r.plotted_points().all(|pt| pt.v < r.lf || pt.v > r.uf));
            }
        }
    }
}
