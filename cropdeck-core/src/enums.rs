//! Enum types for cropdeck entities

use crate::error::EnumParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CONTAINER ENUMS
// ============================================================================

/// Whether a container is a physical farm unit or a simulated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    #[default]
    Physical,
    Virtual,
}

impl ContainerType {
    /// Wire representation used in payloads and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::Physical => "physical",
            ContainerType::Virtual => "virtual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerType::Physical => "Physical",
            ContainerType::Virtual => "Virtual",
        }
    }

    pub fn all() -> &'static [ContainerType] {
        &[ContainerType::Physical, ContainerType::Virtual]
    }

    /// Only physical containers carry a location.
    pub fn has_location(&self) -> bool {
        matches!(self, ContainerType::Physical)
    }
}

/// What a container is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContainerPurpose {
    #[default]
    Development,
    Research,
    Production,
}

impl ContainerPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerPurpose::Development => "development",
            ContainerPurpose::Research => "research",
            ContainerPurpose::Production => "production",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerPurpose::Development => "Development",
            ContainerPurpose::Research => "Research",
            ContainerPurpose::Production => "Production",
        }
    }

    pub fn all() -> &'static [ContainerPurpose] {
        &[
            ContainerPurpose::Development,
            ContainerPurpose::Research,
            ContainerPurpose::Production,
        ]
    }
}

/// Lifecycle status of a container. Transitions are decided server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    #[default]
    Created,
    Active,
    Maintenance,
    Inactive,
}

impl ContainerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerStatus::Created => "created",
            ContainerStatus::Active => "active",
            ContainerStatus::Maintenance => "maintenance",
            ContainerStatus::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerStatus::Created => "Created",
            ContainerStatus::Active => "Active",
            ContainerStatus::Maintenance => "Maintenance",
            ContainerStatus::Inactive => "Inactive",
        }
    }

    pub fn all() -> &'static [ContainerStatus] {
        &[
            ContainerStatus::Created,
            ContainerStatus::Active,
            ContainerStatus::Maintenance,
            ContainerStatus::Inactive,
        ]
    }
}

/// Time window selected on the performance overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Quarter => "quarter",
            TimeRange::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "Week",
            TimeRange::Month => "Month",
            TimeRange::Quarter => "Quarter",
            TimeRange::Year => "Year",
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }

    pub fn all() -> &'static [TimeRange] {
        &[
            TimeRange::Week,
            TimeRange::Month,
            TimeRange::Quarter,
            TimeRange::Year,
        ]
    }
}

// ============================================================================
// CYCLING
// ============================================================================

/// Step to the next entry of a fixed option list, wrapping around.
pub fn cycle_next<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

/// Step through `None` followed by every option, wrapping back to `None`.
///
/// Used by filter selectors where `None` means "no constraint".
pub fn cycle_optional<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let idx = all.iter().position(|v| *v == value);
            match idx {
                Some(i) if i + 1 < all.len() => Some(all[i + 1]),
                _ => None,
            }
        }
    }
}

// ============================================================================
// DISPLAY / PARSE
// ============================================================================

fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

macro_rules! display_and_parse {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = EnumParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let token = normalize_token(s);
                $ty::all()
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == token)
                    .ok_or_else(|| EnumParseError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

display_and_parse!(ContainerType, "container type");
display_and_parse!(ContainerPurpose, "container purpose");
display_and_parse!(ContainerStatus, "container status");
display_and_parse!(TimeRange, "time range");
