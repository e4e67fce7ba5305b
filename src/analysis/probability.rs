//! Empirical exceedance and shortfall probabilities against named thresholds.

use crate::analysis::valid_values;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which side of a cutoff counts as an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdDirection {
    /// Values strictly greater than the cutoff.
    Above,
    /// Values strictly less than the cutoff.
    Below,
}

impl ThresholdDirection {
    /// Resolves the direction implied by a threshold name.
    ///
    /// `cold` and `dry` look below their cutoff. Everything else, including
    /// `hot`, `wet`, `windy`, `humid` and names outside that vocabulary, looks
    /// above it.
    ///
    /// ```
    /// use weather_probability::ThresholdDirection;
    ///
    /// assert_eq!(ThresholdDirection::from_name("dry"), ThresholdDirection::Below);
    /// assert_eq!(ThresholdDirection::from_name("windy"), ThresholdDirection::Above);
    /// assert_eq!(ThresholdDirection::from_name("scorching"), ThresholdDirection::Above);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name {
            "cold" | "dry" => ThresholdDirection::Below,
            _ => ThresholdDirection::Above,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            ThresholdDirection::Above => "above",
            ThresholdDirection::Below => "below",
        }
    }

    fn is_event(&self, value: f64, cutoff: f64) -> bool {
        match self {
            ThresholdDirection::Above => value > cutoff,
            ThresholdDirection::Below => value < cutoff,
        }
    }
}

impl fmt::Display for ThresholdDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// A named cutoff with its comparison direction fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Threshold {
    pub name: String,
    pub cutoff: f64,
    pub direction: ThresholdDirection,
}

impl Threshold {
    /// Creates a threshold, deriving the direction from `name`.
    pub fn named(name: impl Into<String>, cutoff: f64) -> Self {
        let name = name.into();
        let direction = ThresholdDirection::from_name(&name);
        Self {
            name,
            cutoff,
            direction,
        }
    }

    /// Creates a threshold with an explicit direction, whatever its name.
    pub fn new(name: impl Into<String>, cutoff: f64, direction: ThresholdDirection) -> Self {
        Self {
            name: name.into(),
            cutoff,
            direction,
        }
    }

    /// Output key, e.g. `above_35` or `below_2.5`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.direction, self.cutoff)
    }
}

/// An ordered collection of thresholds for one variable.
///
/// Serializes as a map from name to either a bare cutoff, whose direction
/// follows from the name, or `{"cutoff": .., "direction": ..}` when the
/// direction differs from what the name implies:
///
/// ```json
/// {"hot": 35, "cold": 5, "frost": {"cutoff": 0, "direction": "below"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ThresholdEntry>",
    into = "BTreeMap<String, ThresholdEntry>"
)]
pub struct ThresholdSet {
    thresholds: Vec<Threshold>,
}

impl ThresholdSet {
    pub fn new(thresholds: Vec<Threshold>) -> Self {
        Self { thresholds }
    }

    /// Builds a set from `(name, cutoff)` pairs, keeping their order.
    pub fn from_named<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, cutoff)| Threshold::named(name, cutoff))
                .collect(),
        )
    }

    pub fn push(&mut self, threshold: Threshold) {
        self.thresholds.push(threshold);
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Threshold> {
        self.thresholds.iter()
    }
}

/// Wire form of one threshold inside a [`ThresholdSet`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdEntry {
    Cutoff(f64),
    Directed {
        cutoff: f64,
        direction: ThresholdDirection,
    },
}

impl From<BTreeMap<String, ThresholdEntry>> for ThresholdSet {
    fn from(map: BTreeMap<String, ThresholdEntry>) -> Self {
        Self::new(
            map.into_iter()
                .map(|(name, entry)| match entry {
                    ThresholdEntry::Cutoff(cutoff) => Threshold::named(name, cutoff),
                    ThresholdEntry::Directed { cutoff, direction } => {
                        Threshold::new(name, cutoff, direction)
                    }
                })
                .collect(),
        )
    }
}

impl From<ThresholdSet> for BTreeMap<String, ThresholdEntry> {
    fn from(set: ThresholdSet) -> Self {
        set.thresholds
            .into_iter()
            .map(|t| {
                let entry = if t.direction == ThresholdDirection::from_name(&t.name) {
                    ThresholdEntry::Cutoff(t.cutoff)
                } else {
                    ThresholdEntry::Directed {
                        cutoff: t.cutoff,
                        direction: t.direction,
                    }
                };
                (t.name, entry)
            })
            .collect()
    }
}

/// Label (`above_<cutoff>` / `below_<cutoff>`) to probability in `[0, 1]`.
pub type ProbabilityResult = BTreeMap<String, f64>;

/// Fraction of valid values on the event side of each threshold.
///
/// Comparisons are strict, so a value equal to the cutoff never counts.
/// Returns an empty map when there is nothing to compare. When two thresholds
/// produce the same label the later one wins.
///
/// # Examples
///
/// ```
/// use weather_probability::{compute_probabilities, ThresholdSet};
///
/// let values = [Some(30.0), Some(40.0), Some(50.0)];
/// let probs = compute_probabilities(&values, &ThresholdSet::from_named([("cold", 35.0)]));
/// assert_eq!(probs["below_35"], 1.0 / 3.0);
/// ```
pub fn compute_probabilities(values: &[Option<f64>], thresholds: &ThresholdSet) -> ProbabilityResult {
    let mut probabilities = ProbabilityResult::new();
    if values.is_empty() || thresholds.is_empty() {
        warn!("Empty values or thresholds provided to compute_probabilities");
        return probabilities;
    }

    let valid = valid_values(values);
    if valid.is_empty() {
        warn!("All values are missing in compute_probabilities");
        return probabilities;
    }

    let total = valid.len() as f64;
    for threshold in thresholds.iter() {
        let hits = valid
            .iter()
            .filter(|&&v| threshold.direction.is_event(v, threshold.cutoff))
            .count();
        probabilities.insert(threshold.label(), hits as f64 / total);
    }
    probabilities
}
