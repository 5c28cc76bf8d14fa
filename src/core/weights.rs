use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Fixed ceiling weight of the legacy scoring formula
pub const LEGACY_CEILING_WEIGHT: f64 = 1.2;

/// Weight for labels not listed in a table
pub const DEFAULT_LABEL_WEIGHT: f64 = 1.0;

/// Errors raised while building scoring tables
#[derive(Debug, Error)]
pub enum WeightTableError {
    #[error("Weight for label '{label}' must be a positive finite number, got {weight}")]
    InvalidWeight { label: String, weight: f64 },

    #[error("Default weight must be a positive finite number, got {0}")]
    InvalidDefault(f64),

    #[error("Empty label in weight table")]
    EmptyLabel,

    #[error("Interest '{0}' is listed more than once in the association table")]
    DuplicateInterest(String),

    #[error("Interest '{0}' has an empty location category")]
    EmptyCategory(String),

    #[error("Failed to parse tables: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Label → weight lookup with an explicit fallback
///
/// Every label has a weight: listed labels use their entry, anything else
/// gets `default_weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightTableConfig", into = "WeightTableConfig")]
pub struct WeightTable {
    labels: HashMap<String, f64>,
    default_weight: f64,
}

/// Serialized form of a weight table
///
/// Labels are a list rather than a map so that label case survives
/// configuration sources that normalise keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTableConfig {
    #[serde(default = "default_label_weight")]
    pub default: f64,
    #[serde(default)]
    pub labels: Vec<LabelWeight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelWeight {
    pub label: String,
    pub weight: f64,
}

fn default_label_weight() -> f64 { DEFAULT_LABEL_WEIGHT }

impl TryFrom<WeightTableConfig> for WeightTable {
    type Error = WeightTableError;

    fn try_from(value: WeightTableConfig) -> Result<Self, Self::Error> {
        WeightTable::new(
            value.labels.into_iter().map(|lw| (lw.label, lw.weight)),
            value.default,
        )
    }
}

impl From<WeightTable> for WeightTableConfig {
    fn from(value: WeightTable) -> Self {
        let mut labels: Vec<LabelWeight> = value
            .labels
            .into_iter()
            .map(|(label, weight)| LabelWeight { label, weight })
            .collect();
        labels.sort_by(|a, b| a.label.cmp(&b.label));
        Self {
            default: value.default_weight,
            labels,
        }
    }
}

#[inline]
fn valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}

impl WeightTable {
    pub fn new<I, S>(labels: I, default_weight: f64) -> Result<Self, WeightTableError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        if !valid_weight(default_weight) {
            return Err(WeightTableError::InvalidDefault(default_weight));
        }

        let mut table = HashMap::new();
        for (label, weight) in labels {
            let label = label.into();
            if label.trim().is_empty() {
                return Err(WeightTableError::EmptyLabel);
            }
            if !valid_weight(weight) {
                return Err(WeightTableError::InvalidWeight { label, weight });
            }
            table.insert(label, weight);
        }

        Ok(Self {
            labels: table,
            default_weight,
        })
    }

    /// Weight of a label, falling back to the table default
    #[inline]
    pub fn weight(&self, label: &str) -> f64 {
        self.labels.get(label).copied().unwrap_or(self.default_weight)
    }

    pub fn is_listed(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// Largest weight any label can receive, the default included
    pub fn max_weight(&self) -> f64 {
        self.labels
            .values()
            .copied()
            .fold(self.default_weight, f64::max)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn default_interests() -> Self {
        Self::from_static(&[
            ("Music", 1.2),
            ("Dance", 1.2),
            ("Cooking", 1.1),
            ("Art", 1.1),
            ("Photography", 1.0),
            ("Travel", 1.0),
            ("Reading", 0.9),
            ("Sports", 0.9),
            ("Cinema", 0.8),
        ])
    }

    pub fn default_locations() -> Self {
        Self::from_static(&[
            ("shows", 1.2),
            ("festivals", 1.2),
            ("theaters", 1.1),
            ("museums", 1.1),
            ("galleries", 1.0),
            ("restaurants", 1.0),
            ("cafes", 0.9),
            ("parks", 0.9),
            ("cinemas", 0.8),
        ])
    }

    fn from_static(entries: &[(&str, f64)]) -> Self {
        Self {
            labels: entries.iter().map(|(l, w)| (l.to_string(), *w)).collect(),
            default_weight: DEFAULT_LABEL_WEIGHT,
        }
    }
}

/// One row of the interest → location category association table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub interest: String,
    pub categories: Vec<String>,
}

/// Which location categories each interest is thematically tied to
///
/// Rows and categories keep their declared order; cross-matches are emitted
/// in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Association>", into = "Vec<Association>")]
pub struct AssociationTable {
    rows: Vec<Association>,
    index: HashMap<String, usize>,
}

impl TryFrom<Vec<Association>> for AssociationTable {
    type Error = WeightTableError;

    fn try_from(rows: Vec<Association>) -> Result<Self, Self::Error> {
        AssociationTable::new(rows)
    }
}

impl From<AssociationTable> for Vec<Association> {
    fn from(value: AssociationTable) -> Self {
        value.rows
    }
}

impl AssociationTable {
    pub fn new(rows: Vec<Association>) -> Result<Self, WeightTableError> {
        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.interest.trim().is_empty() {
                return Err(WeightTableError::EmptyLabel);
            }
            if row.categories.iter().any(|c| c.trim().is_empty()) {
                return Err(WeightTableError::EmptyCategory(row.interest.clone()));
            }
            if index.insert(row.interest.clone(), i).is_some() {
                return Err(WeightTableError::DuplicateInterest(row.interest.clone()));
            }
        }
        Ok(Self { rows, index })
    }

    /// Categories associated with an interest, in declared order
    pub fn categories(&self, interest: &str) -> &[String] {
        self.index
            .get(interest)
            .map(|&i| self.rows[i].categories.as_slice())
            .unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Association] {
        &self.rows
    }

    fn indexed(rows: Vec<Association>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.interest.clone(), i))
            .collect();
        Self { rows, index }
    }
}

fn row(interest: &str, categories: &[&str]) -> Association {
    Association {
        interest: interest.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

impl Default for AssociationTable {
    fn default() -> Self {
        Self::indexed(vec![
            row("Music", &["shows", "festivals", "theaters", "venues"]),
            row("Cinema", &["cinemas", "festivals", "cultural-centers"]),
            row("Travel", &["nature", "beaches", "parks", "landmarks"]),
            row("Cooking", &["restaurants", "markets", "food-fairs", "festivals"]),
            row("Photography", &["galleries", "museums", "nature", "parks", "landmarks"]),
            row("Reading", &["bookstores", "cafes", "parks", "libraries"]),
            row("Sports", &["sports", "gyms", "parks", "courts"]),
            row("Art", &["museums", "galleries", "cultural-centers", "studios"]),
            row("Dance", &["clubs", "shows", "festivals", "dance-studios"]),
        ])
    }
}

/// How the per-axis normalization ceiling is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CeilingPolicy {
    /// Always `LEGACY_CEILING_WEIGHT`, even if a table holds a heavier label
    Legacy,
    /// Heaviest weight the table can hand out
    #[default]
    MaxWeight,
}

impl CeilingPolicy {
    pub fn ceiling_weight(self, table: &WeightTable) -> f64 {
        match self {
            CeilingPolicy::Legacy => LEGACY_CEILING_WEIGHT,
            CeilingPolicy::MaxWeight => table.max_weight(),
        }
    }
}

/// Everything the scorer needs besides the two profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTables {
    #[serde(default = "WeightTable::default_interests")]
    pub interest_weights: WeightTable,
    #[serde(default = "WeightTable::default_locations")]
    pub location_weights: WeightTable,
    #[serde(default)]
    pub associations: AssociationTable,
    #[serde(default)]
    pub ceiling: CeilingPolicy,
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self {
            interest_weights: WeightTable::default_interests(),
            location_weights: WeightTable::default_locations(),
            associations: AssociationTable::default(),
            ceiling: CeilingPolicy::default(),
        }
    }
}

impl ScoringTables {
    /// Parse standalone tables from TOML, validating every entry
    pub fn from_toml_str(source: &str) -> Result<Self, WeightTableError> {
        Ok(toml::from_str(source)?)
    }
}
