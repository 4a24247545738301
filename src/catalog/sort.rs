//! Vehicle List Sorting
//!
//! Re-orders an already fetched vehicle list in memory, without going back to the store.
//!
//! ## Modes
//! - **`year_desc`** (default): newest model year first. A year that does not parse as a
//!   number ranks as the newest of all. Ties fall back to make, then model.
//! - **`make_asc`**: manufacturer name A-Z, then model name.
//! - **`model_asc`**: model name A-Z, then manufacturer name.
//!
//! Sorting is a pure function of `(list, mode)`: the input slice is copied, never mutated,
//! and the stable sort makes re-sorting with the same mode a no-op.

use super::types::VehicleWithManufacturerName;

use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    YearDesc,
    MakeAsc,
    ModelAsc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::YearDesc => "year_desc",
            SortMode::MakeAsc => "make_asc",
            SortMode::ModelAsc => "model_asc",
        }
    }

    /// Unknown or missing selectors fall back to the default mode.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!("Unknown sort mode '{}', using {}", raw, SortMode::default());
                SortMode::default()
            }),
            None => SortMode::default(),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode: {0}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year_desc" => Ok(SortMode::YearDesc),
            "make_asc" => Ok(SortMode::MakeAsc),
            "model_asc" => Ok(SortMode::ModelAsc),
            other => Err(UnknownSortMode(other.to_string())),
        }
    }
}

/// Returns a sorted copy of `vehicles`.
pub fn sort_vehicles(
    vehicles: &[VehicleWithManufacturerName],
    mode: SortMode,
) -> Vec<VehicleWithManufacturerName> {
    let mut sorted = vehicles.to_vec();
    sorted.sort_by(|a, b| compare(a, b, mode));
    sorted
}

fn compare(
    a: &VehicleWithManufacturerName,
    b: &VehicleWithManufacturerName,
    mode: SortMode,
) -> Ordering {
    match mode {
        SortMode::MakeAsc => locale_cmp(a.manu_name(), b.manu_name())
            .then_with(|| locale_cmp(a.model_name(), b.model_name())),
        SortMode::ModelAsc => locale_cmp(a.model_name(), b.model_name())
            .then_with(|| locale_cmp(a.manu_name(), b.manu_name())),
        SortMode::YearDesc => {
            compare_years_desc(parse_model_year(a.model_year()), parse_model_year(b.model_year()))
                .then_with(|| locale_cmp(a.manu_name(), b.manu_name()))
                .then_with(|| locale_cmp(a.model_name(), b.model_name()))
        }
    }
}

// Unparseable years rank before every parseable one.
fn compare_years_desc(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => b.cmp(&a),
    }
}

/// Reads the leading integer of a model year: optional leading whitespace and sign, then
/// the run of ASCII digits. `"2019-2023"` gives 2019; `"abc"` gives `None`.
pub fn parse_model_year(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }

    // Digit runs too long for i64 saturate instead of becoming unparseable.
    let value = match rest[..digits_len].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    Some(value)
}

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Unicode collation (CLDR root order). Case and accents only break ties, so `"Škoda"`
/// sorts between `"Seat"` and `"Tesla"`, and lowercase comes before uppercase.
///
/// The SQLite store registers this same comparison as the `locale` collation.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}
