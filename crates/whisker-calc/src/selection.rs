use std::collections::HashMap;

use crate::record::BoxRecord;

/// Flags the samples whose original index is in `selected`.
///
/// Only the `selected` flag of matching samples changes; indices that match
/// no sample are ignored.
///
/// # Examples
///
/// ```
/// use whisker_calc::{
///     axis::LinearAxis,
///     calc::calc_box,
///     selection::tag_selected,
///     trace::BoxTrace,
/// };
///
/// let trace: BoxTrace = serde_json::from_value(serde_json::json!({
///     "x": [0, 0, 1, 1],
///     "y": [5, 6, 7, 8],
/// })).unwrap();
/// let mut output = calc_box(&trace, &LinearAxis, &LinearAxis, 0);
/// let whisker_calc::record::BoxCalc::Boxes { records, .. } = &mut output.calc else {
///     unreachable!();
/// };
/// tag_selected(records, &[2]);
/// assert_eq!(records[1].selected_points().map(|pt| pt.i).collect::<Vec<_>>(), [2]);
/// assert_eq!(records[0].selected_points().count(), 0);
/// ```
pub fn tag_selected(records: &mut [BoxRecord], selected: &[usize]) {
    for record in records {
        let pt_number_to_index = record
            .pts
            .iter()
            .enumerate()
            .map(|(k, pt)| (pt.i, k))
            .collect::<HashMap<_, _>>();

        for i in selected {
            if let Some(&k) = pt_number_to_index.get(i) {
                record.pts[k].selected = true;
            }
        }
    }
}
