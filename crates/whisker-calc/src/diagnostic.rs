use serde::Serialize;

/// A recoverable problem found while computing a trace.
///
/// Diagnostics never abort the computation; the affected box is degraded
/// instead. Each one is also logged at warn level when raised.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Precomputed `q1`, `median` and `q3` are missing or out of order; the
    /// row is drawn as a flat line at `fallback`.
    #[display("Invalid input - make sure that q1 <= median <= q3 (row {row})")]
    InvalidPrecomputedStats { row: usize, fallback: f64 },
}

impl Diagnostic {
    pub(crate) fn emit(self, sink: &mut Vec<Diagnostic>) {
        log::warn!("{self}");
        sink.push(self);
    }
}
