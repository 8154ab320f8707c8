//! Records for traces that supply their own statistics.

use crate::{
    axis::Datum,
    calc::TraceFrame,
    diagnostic::Diagnostic,
    record::{BoxRecord, Sample, ValueRange},
};

/// Summary values read from one precomputed row.
#[derive(Debug, Clone, Copy)]
struct RowStats {
    q1: Option<f64>,
    med: Option<f64>,
    q3: Option<f64>,
}

impl RowStats {
    /// The validated quartiles, if present and ordered.
    fn checked(self) -> Option<(f64, f64, f64)> {
        match (self.q1, self.med, self.q3) {
            (Some(q1), Some(med), Some(q3)) if q1 <= med && med <= q3 => Some((q1, med, q3)),
            _ => None,
        }
    }

    /// Value an invalid row collapses to.
    fn fallback(self) -> f64 {
        match (self.med, self.q1, self.q3) {
            (Some(med), _, _) => med,
            (None, Some(q1), Some(q3)) => f64::midpoint(q1, q3),
            (None, Some(q), None) | (None, None, Some(q)) => q,
            (None, None, None) => 0.0,
        }
    }
}

/// Builds one record per row with a valid position.
///
/// Rows whose quartiles are missing or out of order raise a
/// [`Diagnostic::InvalidPrecomputedStats`] and are drawn flat.
pub(crate) fn adapt(
    frame: &TraceFrame<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> (Vec<BoxRecord>, Option<ValueRange>) {
    let trace = frame.trace;
    let axis = frame.val_axis;
    let d2c = |column: &Option<Vec<Datum>>, i: usize| {
        column
            .as_ref()
            .and_then(|c| c.get(i))
            .and_then(|datum| axis.d2c(datum))
    };
    let show_points = trace.points_mode().shows_points();
    let notched = trace.is_notched();

    let mut records = vec![];
    for (i, pos) in frame.positions.iter().enumerate() {
        let Some(pos) = *pos else {
            continue;
        };

        let mut pts = trace
            .outliers
            .as_ref()
            .and_then(|rows| rows.get(i))
            .and_then(Option::as_ref)
            .map(|row| {
                row.iter()
                    .filter_map(|datum| axis.d2c(datum))
                    .map(|v| Sample::new(v, i))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        pts.sort_by(|a, b| a.v.total_cmp(&b.v));
        let pts2 = (0..pts.len()).collect();

        let row = RowStats {
            q1: d2c(&trace.q1, i),
            med: d2c(&trace.median, i),
            q3: d2c(&trace.q3, i),
        };

        let record = if let Some((q1, med, q3)) = row.checked() {
            let lf = d2c(&trace.lower_fence, i).filter(|&lf| lf <= q1).unwrap_or(q1);
            let uf = d2c(&trace.upper_fence, i).filter(|&uf| uf >= q3).unwrap_or(q3);
            let ns = d2c(&trace.notch_span, i).filter(|&ns| ns > 0.0).unwrap_or(0.0);
            let (ln, un) = (med - ns, med + ns);

            let mut min = lf;
            let mut max = uf;
            if let (true, Some(first), Some(last)) = (show_points, pts.first(), pts.last()) {
                min = min.min(first.v);
                max = max.max(last.v);
            }
            if notched {
                min = min.min(ln);
                max = max.max(un);
            }

            BoxRecord {
                pos,
                pos_letter: frame.pos_letter,
                min,
                q1,
                med,
                q3,
                max,
                lf,
                uf,
                lo: None,
                uo: None,
                ln,
                un,
                mean: d2c(&trace.mean, i),
                sd: d2c(&trace.sd, i),
                pts,
                pts2,
                meta: None,
            }
        } else {
            let v0 = row.fallback();
            Diagnostic::InvalidPrecomputedStats {
                row: i,
                fallback: v0,
            }
            .emit(diagnostics);

            BoxRecord {
                pos,
                pos_letter: frame.pos_letter,
                min: v0,
                q1: v0,
                med: v0,
                q3: v0,
                max: v0,
                lf: v0,
                uf: v0,
                lo: None,
                uo: None,
                ln: v0,
                un: v0,
                mean: Some(v0),
                sd: Some(v0),
                pts,
                pts2,
                meta: None,
            }
        };

        records.push(record);
    }

    let range = ValueRange::padded_from(records.iter().flat_map(|r| [r.min, r.max]));
    (records, range)
}
