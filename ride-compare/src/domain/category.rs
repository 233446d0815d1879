//! Ride category types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Vehicle tier offered by a provider.
///
/// This is a closed set. Values coming back from the comparison backend
/// that fall outside it are carried as [`NormalizedCategory::Unknown`]
/// rather than rejected.
///
/// # Examples
///
/// ```
/// use ride_compare::domain::RideCategory;
///
/// let xl: RideCategory = "XL".parse().unwrap();
/// assert_eq!(xl, RideCategory::Xl);
/// assert_eq!(xl.as_str(), "XL");
///
/// assert!("Moto".parse::<RideCategory>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RideCategory {
    #[default]
    Standard,
    #[serde(rename = "XL")]
    Xl,
    Premium,
}

impl RideCategory {
    /// All categories, in display order.
    pub const ALL: [RideCategory; 3] = [
        RideCategory::Standard,
        RideCategory::Xl,
        RideCategory::Premium,
    ];

    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            RideCategory::Standard => "Standard",
            RideCategory::Xl => "XL",
            RideCategory::Premium => "Premium",
        }
    }
}

impl FromStr for RideCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Standard" => Ok(RideCategory::Standard),
            "XL" => Ok(RideCategory::Xl),
            "Premium" => Ok(RideCategory::Premium),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for RideCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category as reported on an estimate.
///
/// Keeps the backend's original value so that the record is never
/// rewritten; [`NormalizedCategory::grouping`] gives the category used
/// for grouping and display, which is `Standard` for anything unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum NormalizedCategory {
    Known(RideCategory),
    Unknown(String),
}

impl NormalizedCategory {
    /// Category used for grouping and display profiles.
    pub fn grouping(&self) -> RideCategory {
        match self {
            NormalizedCategory::Known(category) => *category,
            NormalizedCategory::Unknown(_) => RideCategory::Standard,
        }
    }

    /// The value as the backend sent it.
    pub fn as_str(&self) -> &str {
        match self {
            NormalizedCategory::Known(category) => category.as_str(),
            NormalizedCategory::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, NormalizedCategory::Known(_))
    }
}

impl Default for NormalizedCategory {
    fn default() -> Self {
        NormalizedCategory::Unknown(String::new())
    }
}

impl From<RideCategory> for NormalizedCategory {
    fn from(category: RideCategory) -> Self {
        NormalizedCategory::Known(category)
    }
}

impl From<Option<String>> for NormalizedCategory {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(raw) => match raw.parse() {
                Ok(category) => NormalizedCategory::Known(category),
                Err(_) => NormalizedCategory::Unknown(raw),
            },
            None => NormalizedCategory::default(),
        }
    }
}

impl From<NormalizedCategory> for String {
    fn from(category: NormalizedCategory) -> Self {
        match category {
            NormalizedCategory::Known(category) => category.as_str().to_string(),
            NormalizedCategory::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for NormalizedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
