//! Box trace configuration
//!
//! [`BoxTrace`] mirrors the trace attributes the statistics core reads,
//! using the external attribute names on the wire (`quartilemethod`,
//! `boxpoints`, `selectedpoints`, ...). Unset attributes resolve to their
//! defaults through the accessor methods, which depend on whether the
//! trace carries raw samples or precomputed statistics.
//!
//! # Serialization
//!
//! ```json
//! {
//!   "name": "control",
//!   "y": [1.2, 3.4, 2.2, 9.9],
//!   "x": ["a", "a", "b", "b"],
//!   "quartilemethod": "exclusive",
//!   "boxpoints": "all",
//!   "notched": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use whisker_stats::percentiles::QuartileMethod;

use crate::axis::{AxisKind, Datum};

/// Axis a coordinate binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum AxisLetter {
    #[display("x")]
    X,
    #[display("y")]
    Y,
}

/// Direction the boxes are drawn in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Vertical boxes: positions on x, values on y.
    #[default]
    #[serde(rename = "v")]
    Vertical,
    /// Horizontal boxes: positions on y, values on x.
    #[serde(rename = "h")]
    Horizontal,
}

impl Orientation {
    /// The (position, value) axis letters.
    #[must_use]
    pub fn letters(self) -> (AxisLetter, AxisLetter) {
        match self {
            Orientation::Vertical => (AxisLetter::X, AxisLetter::Y),
            Orientation::Horizontal => (AxisLetter::Y, AxisLetter::X),
        }
    }
}

/// Which sample points are drawn next to a box.
///
/// On the wire this is `false` or one of `"outliers"`,
/// `"suspectedoutliers"` and `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum PointsMode {
    /// No points.
    None,
    /// Points beyond the whisker fences.
    Outliers,
    /// Points beyond the fences, with those beyond the 3 IQR thresholds
    /// highlighted by the renderer.
    SuspectedOutliers,
    /// Every sample.
    All,
}

impl PointsMode {
    /// Whether any points are drawn.
    #[must_use]
    pub fn shows_points(self) -> bool {
        !self.is_none()
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TraceAttrError {
    #[display("invalid boxpoints value '{value}'")]
    InvalidPointsMode { value: String },
    #[display("invalid boxmean value '{value}'")]
    InvalidBoxMean { value: String },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FlagOrName {
    Flag(bool),
    Name(String),
}

impl TryFrom<FlagOrName> for PointsMode {
    type Error = TraceAttrError;

    fn try_from(repr: FlagOrName) -> Result<Self, Self::Error> {
        match repr {
            FlagOrName::Flag(false) => Ok(PointsMode::None),
            FlagOrName::Name(name) => match name.as_str() {
                "outliers" => Ok(PointsMode::Outliers),
                "suspectedoutliers" => Ok(PointsMode::SuspectedOutliers),
                "all" => Ok(PointsMode::All),
                _ => Err(TraceAttrError::InvalidPointsMode { value: name }),
            },
            FlagOrName::Flag(true) => Err(TraceAttrError::InvalidPointsMode {
                value: "true".to_owned(),
            }),
        }
    }
}

impl From<PointsMode> for FlagOrName {
    fn from(mode: PointsMode) -> Self {
        match mode {
            PointsMode::None => FlagOrName::Flag(false),
            PointsMode::Outliers => FlagOrName::Name("outliers".to_owned()),
            PointsMode::SuspectedOutliers => FlagOrName::Name("suspectedoutliers".to_owned()),
            PointsMode::All => FlagOrName::Name("all".to_owned()),
        }
    }
}

impl Serialize for PointsMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        FlagOrName::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PointsMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        FlagOrName::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// Whether the mean (and standard deviation) is drawn.
///
/// On the wire this is `true`, `false` or `"sd"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum BoxMean {
    Off,
    Mean,
    Sd,
}

impl<'de> Deserialize<'de> for BoxMean {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match FlagOrName::deserialize(deserializer)? {
            FlagOrName::Flag(false) => Ok(BoxMean::Off),
            FlagOrName::Flag(true) => Ok(BoxMean::Mean),
            FlagOrName::Name(name) if name == "sd" => Ok(BoxMean::Sd),
            FlagOrName::Name(name) => Err(serde::de::Error::custom(
                TraceAttrError::InvalidBoxMean { value: name },
            )),
        }
    }
}

impl Serialize for BoxMean {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BoxMean::Off => serializer.serialize_bool(false),
            BoxMean::Mean => serializer.serialize_bool(true),
            BoxMean::Sd => serializer.serialize_str("sd"),
        }
    }
}

/// A text attribute given either per sample or once for the whole trace.
///
/// Only the per-sample form is copied into the samples; a shared value is
/// accepted and left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextAttr {
    PerSample(Vec<Datum>),
    Shared(Datum),
}

impl TextAttr {
    fn label_at(&self, i: usize) -> Option<String> {
        match self {
            TextAttr::PerSample(texts) => texts.get(i).and_then(Datum::as_label),
            TextAttr::Shared(_) => None,
        }
    }
}

/// Outlier samples per precomputed row; a row may be `null`.
pub type OutlierRows = Vec<Option<Vec<Datum>>>;

/// Attributes of one box trace.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxTrace {
    pub name: Option<String>,
    pub x: Option<Vec<Datum>>,
    pub y: Option<Vec<Datum>>,
    pub x0: Option<Datum>,
    pub y0: Option<Datum>,
    pub orientation: Option<Orientation>,
    #[serde(rename = "quartilemethod")]
    pub quartile_method: QuartileMethod,
    #[serde(rename = "boxpoints", alias = "points")]
    pub box_points: Option<PointsMode>,
    pub notched: Option<bool>,
    #[serde(rename = "boxmean")]
    pub box_mean: Option<BoxMean>,
    #[serde(rename = "selectedpoints")]
    pub selected_points: Option<Vec<Datum>>,
    pub text: Option<TextAttr>,
    #[serde(rename = "hovertext")]
    pub hover_text: Option<TextAttr>,

    pub q1: Option<Vec<Datum>>,
    pub median: Option<Vec<Datum>>,
    pub q3: Option<Vec<Datum>>,
    #[serde(rename = "lowerfence")]
    pub lower_fence: Option<Vec<Datum>>,
    #[serde(rename = "upperfence")]
    pub upper_fence: Option<Vec<Datum>>,
    pub mean: Option<Vec<Datum>>,
    pub sd: Option<Vec<Datum>>,
    #[serde(rename = "notchspan")]
    pub notch_span: Option<Vec<Datum>>,
    pub outliers: Option<OutlierRows>,
}

fn non_empty<T>(data: Option<&Vec<T>>) -> Option<&[T]> {
    data.map(Vec::as_slice).filter(|d| !d.is_empty())
}

impl BoxTrace {
    /// Whether the trace supplies `q1`, `median` and `q3` instead of raw
    /// samples.
    #[must_use]
    pub fn has_precomputed_stats(&self) -> bool {
        non_empty(self.q1.as_ref()).is_some()
            && non_empty(self.median.as_ref()).is_some()
            && non_empty(self.q3.as_ref()).is_some()
    }

    /// The non-empty data array bound to `letter`, if any.
    #[must_use]
    pub fn data(&self, letter: AxisLetter) -> Option<&[Datum]> {
        match letter {
            AxisLetter::X => non_empty(self.x.as_ref()),
            AxisLetter::Y => non_empty(self.y.as_ref()),
        }
    }

    /// The scalar position fallback (`x0` or `y0`) for `letter`.
    #[must_use]
    pub fn pos0(&self, letter: AxisLetter) -> Option<&Datum> {
        match letter {
            AxisLetter::X => self.x0.as_ref(),
            AxisLetter::Y => self.y0.as_ref(),
        }
    }

    /// Default orientation and number of rows implied by the data arrays.
    fn detect_layout(&self) -> (Option<Orientation>, usize) {
        let x = self.data(AxisLetter::X);
        let y = self.data(AxisLetter::Y);

        if self.has_precomputed_stats() {
            let stats_len = [&self.q1, &self.median, &self.q3]
                .into_iter()
                .filter_map(|d| d.as_ref().map(Vec::len))
                .min()
                .unwrap_or(0);
            return match (x, y) {
                (Some(x), _) => (Some(Orientation::Vertical), x.len().min(stats_len)),
                (None, Some(y)) => (Some(Orientation::Horizontal), y.len().min(stats_len)),
                (None, None) => (None, 0),
            };
        }

        match (x, y) {
            (Some(x), Some(y)) => (Some(Orientation::Vertical), x.len().min(y.len())),
            (None, Some(y)) => (Some(Orientation::Vertical), y.len()),
            (Some(x), None) => (Some(Orientation::Horizontal), x.len()),
            (None, None) => (None, 0),
        }
    }

    /// Number of rows (samples, or precomputed boxes) the trace holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use whisker_calc::trace::BoxTrace;
    ///
    /// let trace: BoxTrace = serde_json::from_value(serde_json::json!({
    ///     "x": [1, 2, 3],
    ///     "y": [4, 5],
    /// })).unwrap();
    /// assert_eq!(trace.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.detect_layout().1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The explicit orientation, or the one implied by the data arrays.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
            .or(self.detect_layout().0)
            .unwrap_or_default()
    }

    /// The explicit points mode, or its default: outliers for raw samples,
    /// and for precomputed stats outliers only when an `outliers` array is
    /// supplied.
    #[must_use]
    pub fn points_mode(&self) -> PointsMode {
        self.box_points.unwrap_or_else(|| {
            if !self.has_precomputed_stats() || self.outliers.is_some() {
                PointsMode::Outliers
            } else {
                PointsMode::None
            }
        })
    }

    /// Whether notches are drawn; defaults to on for precomputed stats that
    /// supply `notchspan`.
    #[must_use]
    pub fn is_notched(&self) -> bool {
        self.notched.unwrap_or_else(|| {
            self.has_precomputed_stats() && non_empty(self.notch_span.as_ref()).is_some()
        })
    }

    /// The explicit mean mode, or the one implied by precomputed `mean` and
    /// `sd` arrays.
    #[must_use]
    pub fn box_mean(&self) -> BoxMean {
        self.box_mean.unwrap_or_else(|| {
            if !self.has_precomputed_stats() || non_empty(self.mean.as_ref()).is_none() {
                BoxMean::Off
            } else if non_empty(self.sd.as_ref()).is_some() {
                BoxMean::Sd
            } else {
                BoxMean::Mean
            }
        })
    }

    /// The trace name, when it can stand in for a position on an axis of
    /// the given kind.
    #[must_use]
    pub fn name_as_position(&self, kind: AxisKind) -> Option<&str> {
        let name = self.name.as_deref()?;
        let usable = match kind {
            AxisKind::Category => true,
            AxisKind::Linear => Datum::from(name).as_number().is_some(),
        };
        usable.then_some(name)
    }

    /// Whether the trace has nothing but its group slot to place it on a
    /// position axis of the given kind.
    #[must_use]
    pub fn positioned_by_slot(&self, kind: AxisKind) -> bool {
        let (pos_letter, _) = self.orientation().letters();
        self.data(pos_letter).is_none()
            && self.pos0(pos_letter).is_none()
            && self.name_as_position(kind).is_none()
    }

    /// The `selectedpoints` entries that are valid sample indices.
    #[must_use]
    pub fn selected_indices(&self) -> Option<Vec<usize>> {
        self.selected_points
            .as_ref()
            .map(|points| points.iter().filter_map(Datum::as_index).collect())
    }

    /// Text and hover text attached to sample `i`.
    #[must_use]
    pub fn texts_at(&self, i: usize) -> (Option<String>, Option<String>) {
        let at = |texts: Option<&TextAttr>| texts.and_then(|t| t.label_at(i));
        (at(self.text.as_ref()), at(self.hover_text.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn trace(value: serde_json::Value) -> BoxTrace {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_raw_layout_detection() {
        let t = trace(json!({ "y": [1, 2, 3] }));
        assert_eq!((t.orientation(), t.len()), (Orientation::Vertical, 3));

        let t = trace(json!({ "x": [1, 2, 3] }));
        assert_eq!((t.orientation(), t.len()), (Orientation::Horizontal, 3));

        let t = trace(json!({ "x": [1, 2, 3], "y": [1, 2, 3, 4], "orientation": "h" }));
        assert_eq!((t.orientation(), t.len()), (Orientation::Horizontal, 3));

        let t = trace(json!({ "x": [], "y": [] }));
        assert!(t.is_empty());
    }

    #[test]
    fn test_precomputed_layout_detection() {
        let t = trace(json!({
            "x": ["a", "b", "c"],
            "q1": [1, 2],
            "median": [2, 3, 4],
            "q3": [3, 4, 5],
        }));
        assert!(t.has_precomputed_stats());
        assert_eq!((t.orientation(), t.len()), (Orientation::Vertical, 2));

        let t = trace(json!({ "y": ["a"], "q1": [1], "median": [2], "q3": [3] }));
        assert_eq!(t.orientation(), Orientation::Horizontal);

        let t = trace(json!({ "q1": [1], "median": [2], "q3": [3] }));
        assert_eq!(t.len(), 0);

        let t = trace(json!({ "y": [1], "q1": [1], "median": [], "q3": [3] }));
        assert!(!t.has_precomputed_stats());
    }

    #[test]
    fn test_points_mode_wire_format() {
        assert_eq!(
            trace(json!({ "boxpoints": false })).points_mode(),
            PointsMode::None
        );
        assert_eq!(
            trace(json!({ "boxpoints": "suspectedoutliers" })).points_mode(),
            PointsMode::SuspectedOutliers
        );
        assert_eq!(
            trace(json!({ "points": "all" })).points_mode(),
            PointsMode::All
        );
        assert!(serde_json::from_value::<BoxTrace>(json!({ "boxpoints": true })).is_err());
        assert!(serde_json::from_value::<BoxTrace>(json!({ "boxpoints": "some" })).is_err());
        assert_eq!(serde_json::to_value(PointsMode::None).unwrap(), json!(false));
        assert_eq!(serde_json::to_value(PointsMode::All).unwrap(), json!("all"));
    }

    #[test]
    fn test_points_mode_defaults() {
        assert_eq!(trace(json!({ "y": [1] })).points_mode(), PointsMode::Outliers);
        let pre = json!({ "x": [0], "q1": [1], "median": [2], "q3": [3] });
        assert_eq!(trace(pre.clone()).points_mode(), PointsMode::None);
        let mut with_outliers = pre;
        with_outliers["outliers"] = json!([[9]]);
        assert_eq!(trace(with_outliers).points_mode(), PointsMode::Outliers);
    }

    #[test]
    fn test_box_mean_and_notch_defaults() {
        let t = trace(json!({
            "x": [0], "q1": [1], "median": [2], "q3": [3],
            "mean": [2.1], "sd": [0.4], "notchspan": [0.2],
        }));
        assert_eq!(t.box_mean(), BoxMean::Sd);
        assert!(t.is_notched());

        let t = trace(json!({ "x": [0], "q1": [1], "median": [2], "q3": [3], "mean": [2.1] }));
        assert_eq!(t.box_mean(), BoxMean::Mean);
        assert!(!t.is_notched());

        let t = trace(json!({ "y": [1], "boxmean": "sd", "notched": true }));
        assert_eq!(t.box_mean(), BoxMean::Sd);
        assert!(t.is_notched());
        assert!(serde_json::from_value::<BoxTrace>(json!({ "boxmean": "median" })).is_err());
    }

    #[test]
    fn test_name_as_position() {
        let t = trace(json!({ "name": "12.5" }));
        assert_eq!(t.name_as_position(AxisKind::Linear), Some("12.5"));
        let t = trace(json!({ "name": "trace 0" }));
        assert_eq!(t.name_as_position(AxisKind::Linear), None);
        assert_eq!(t.name_as_position(AxisKind::Category), Some("trace 0"));
    }

    #[test]
    fn test_texts_at() {
        let t = trace(json!({ "text": ["a", null], "hovertext": ["h0"] }));
        assert_eq!(t.texts_at(0), (Some("a".to_owned()), Some("h0".to_owned())));
        assert_eq!(t.texts_at(1), (None, None));
        assert_eq!(t.texts_at(5), (None, None));
    }

    #[test]
    fn test_shared_and_numeric_texts() {
        let t = trace(json!({ "y": [1, 2], "text": "same label", "hovertext": [1, 2.5] }));
        assert_eq!(t.text, Some(TextAttr::Shared(Datum::from("same label"))));
        assert_eq!(t.texts_at(0), (None, Some("1".to_owned())));
        assert_eq!(t.texts_at(1), (None, Some("2.5".to_owned())));
    }

    #[test]
    fn test_selected_indices_skip_non_indices() {
        let t = trace(json!({ "y": [1, 2], "selectedpoints": [-1, 1, 0.5, "0", null] }));
        assert_eq!(t.selected_indices(), Some(vec![1, 0]));
        assert_eq!(trace(json!({ "y": [1] })).selected_indices(), None);
    }

    #[test]
    fn test_positioned_by_slot() {
        assert!(trace(json!({ "y": [1] })).positioned_by_slot(AxisKind::Category));
        assert!(!trace(json!({ "y": [1], "x0": 2 })).positioned_by_slot(AxisKind::Linear));
        let named = trace(json!({ "y": [1], "name": "ctl" }));
        assert!(named.positioned_by_slot(AxisKind::Linear));
        assert!(!named.positioned_by_slot(AxisKind::Category));
        let horizontal = trace(json!({ "x": [1], "y0": "a" }));
        assert!(!horizontal.positioned_by_slot(AxisKind::Category));
    }
}
