//! Axis collaborators
//!
//! The statistics core only needs two things from an axis: converting a
//! raw datum into a numeric coordinate ([`Axis::d2c`]) and doing so for a
//! whole data array ([`Axis::make_calcdata`]). Anything that fails to
//! convert becomes `None` and is dropped by the callers.
//!
//! Two axes are provided:
//!
//! - [`LinearAxis`]: numbers, and strings that parse as finite numbers
//! - [`CategoryAxis`]: values mapped to the index of their category

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A raw input value as found in trace data arrays.
///
/// # Examples
///
/// ```
/// use whisker_calc::axis::Datum;
///
/// let data: Vec<Datum> = serde_json::from_str(r#"[1.5, "a", null, true]"#).unwrap();
/// assert_eq!(data[0], Datum::Number(1.5));
/// assert_eq!(data[1], Datum::from("a"));
/// assert_eq!(data[2], Datum::Null);
/// assert_eq!(data[3], Datum::Bool(true));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Number(f64),
    Text(String),
    Bool(bool),
    #[default]
    Null,
}

impl Datum {
    /// Interprets the datum as a finite number.
    ///
    /// Strings are trimmed and parsed; anything else that is not a finite
    /// number gives `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Datum::Number(n) => *n,
            Datum::Text(s) => s.trim().parse::<f64>().ok()?,
            Datum::Bool(_) | Datum::Null => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Interprets the datum as a non-negative integer index.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        let n = self.as_number()?;
        (n >= 0.0 && n.fract() == 0.0).then_some(n as usize)
    }

    /// Text form of a string or finite number.
    #[must_use]
    pub fn as_label(&self) -> Option<String> {
        match self {
            Datum::Text(s) => Some(s.clone()),
            Datum::Number(n) if n.is_finite() => Some(n.to_string()),
            Datum::Number(_) | Datum::Bool(_) | Datum::Null => None,
        }
    }

    /// Key used to look the datum up among category names.
    #[must_use]
    pub fn category_key(&self) -> Option<String> {
        self.as_label()
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Datum::Number(value)
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Datum::Text(value.to_owned())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Datum::Text(value)
    }
}

impl<T> From<Option<T>> for Datum
where
    T: Into<Datum>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Datum::Null, Into::into)
    }
}

/// How an axis maps data to coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    #[default]
    Linear,
    Category,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AxisError {
    #[display("duplicate category '{category}'")]
    DuplicateCategory { category: String },
}

/// Conversion from raw data to numeric axis coordinates.
pub trait Axis {
    /// The kind of the axis.
    fn kind(&self) -> AxisKind;

    /// Converts one datum to a coordinate, or `None` if it has no place on
    /// this axis.
    fn d2c(&self, datum: &Datum) -> Option<f64>;

    /// Converts the first `len` entries of `data`.
    ///
    /// The result always has `len` entries; positions past the end of
    /// `data` are `None`.
    fn make_calcdata(&self, data: &[Datum], len: usize) -> Vec<Option<f64>> {
        (0..len)
            .map(|i| data.get(i).and_then(|datum| self.d2c(datum)))
            .collect()
    }
}

/// A numeric axis.
///
/// # Examples
///
/// ```
/// use whisker_calc::axis::{Axis, Datum, LinearAxis};
///
/// assert_eq!(LinearAxis.d2c(&Datum::from(" 2.5 ")), Some(2.5));
/// assert_eq!(LinearAxis.d2c(&Datum::from("two")), None);
/// assert_eq!(LinearAxis.d2c(&Datum::Number(f64::NAN)), None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinearAxis;

impl Axis for LinearAxis {
    fn kind(&self) -> AxisKind {
        AxisKind::Linear
    }

    fn d2c(&self, datum: &Datum) -> Option<f64> {
        datum.as_number()
    }
}

/// An axis of named categories placed at 0, 1, 2, ...
///
/// # Examples
///
/// ```
/// use whisker_calc::axis::{Axis, CategoryAxis, Datum};
///
/// let data = [Datum::from("b"), Datum::from("a"), Datum::from("b")];
/// let axis = CategoryAxis::from_data(&data);
/// assert_eq!(axis.categories(), &["b".to_owned(), "a".to_owned()]);
/// assert_eq!(axis.d2c(&Datum::from("a")), Some(1.0));
/// assert_eq!(axis.d2c(&Datum::from("c")), None);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategoryAxis {
    categories: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategoryAxis {
    /// Creates an axis with a fixed category order.
    pub fn new<I>(categories: I) -> Result<Self, AxisError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut axis = Self::default();
        for category in categories {
            if axis.index.contains_key(&category) {
                return Err(AxisError::DuplicateCategory { category });
            }
            axis.push(category);
        }
        Ok(axis)
    }

    /// Creates an axis whose categories are the distinct data values in
    /// first-seen order.
    #[must_use]
    pub fn from_data<'a, I>(data: I) -> Self
    where
        I: IntoIterator<Item = &'a Datum>,
    {
        let mut axis = Self::default();
        axis.extend_from_data(data);
        axis
    }

    /// Appends categories for data values not seen yet.
    pub fn extend_from_data<'a, I>(&mut self, data: I)
    where
        I: IntoIterator<Item = &'a Datum>,
    {
        for key in data.into_iter().filter_map(Datum::category_key) {
            if !self.index.contains_key(&key) {
                self.push(key);
            }
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    fn push(&mut self, category: String) {
        self.index.insert(category.clone(), self.categories.len());
        self.categories.push(category);
    }
}

impl Axis for CategoryAxis {
    fn kind(&self) -> AxisKind {
        AxisKind::Category
    }

    #[expect(clippy::cast_precision_loss)]
    fn d2c(&self, datum: &Datum) -> Option<f64> {
        let key = datum.category_key()?;
        self.index.get(&key).map(|&i| i as f64)
    }
}
