//! Helper types for port operations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// =============================================================================
// Reference Data Types
// =============================================================================

/// A reference table the import job can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Spells,
    Equipment,
    Races,
    Classes,
    Backgrounds,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 5] = [
        Self::Spells,
        Self::Equipment,
        Self::Races,
        Self::Classes,
        Self::Backgrounds,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spells => "spells",
            Self::Equipment => "equipment",
            Self::Races => "races",
            Self::Classes => "classes",
            Self::Backgrounds => "backgrounds",
        }
    }

    /// Destination table for this kind.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Spells => "open5e_spells",
            Self::Equipment => "open5e_equipment",
            Self::Races => "open5e_races",
            Self::Classes => "open5e_classes",
            Self::Backgrounds => "open5e_backgrounds",
        }
    }

    /// Source feeds combined into this kind, in import order.
    pub fn feeds(&self) -> &'static [ReferenceFeed] {
        match self {
            Self::Spells => &[ReferenceFeed::Spells],
            Self::Equipment => &[
                ReferenceFeed::MagicItems,
                ReferenceFeed::Weapons,
                ReferenceFeed::Armor,
            ],
            Self::Races => &[ReferenceFeed::Races],
            Self::Classes => &[ReferenceFeed::Classes],
            Self::Backgrounds => &[ReferenceFeed::Backgrounds],
        }
    }

    /// Plural noun used in import summaries.
    pub fn summary_noun(&self) -> &'static str {
        match self {
            Self::Equipment => "equipment items",
            other => other.as_str(),
        }
    }

    /// Whether a single failing feed may be skipped instead of aborting.
    pub fn tolerates_feed_failure(&self) -> bool {
        self.feeds().len() > 1
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The requested reference type is not one the import job knows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid type specified")]
pub struct InvalidReferenceKind(pub String);

impl FromStr for ReferenceKind {
    type Err = InvalidReferenceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidReferenceKind(s.to_string()))
    }
}

/// One upstream Open5e list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceFeed {
    Spells,
    MagicItems,
    Weapons,
    Armor,
    Races,
    Classes,
    Backgrounds,
}

impl ReferenceFeed {
    /// Endpoint name, also used as the dump file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spells => "spells",
            Self::MagicItems => "magicitems",
            Self::Weapons => "weapons",
            Self::Armor => "armor",
            Self::Races => "races",
            Self::Classes => "classes",
            Self::Backgrounds => "backgrounds",
        }
    }
}

impl fmt::Display for ReferenceFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transformed reference record ready for upsert, keyed by `slug`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub slug: String,
    pub name: String,
    pub document_slug: Option<String>,
    /// Remaining columns as a JSON object.
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_exact_names_only() {
        assert_eq!("spells".parse(), Ok(ReferenceKind::Spells));
        assert_eq!("backgrounds".parse(), Ok(ReferenceKind::Backgrounds));
        let err = "monsters".parse::<ReferenceKind>().expect_err("unknown kind");
        assert_eq!(err.to_string(), "Invalid type specified");
    }

    #[test]
    fn equipment_combines_three_feeds() {
        assert_eq!(ReferenceKind::Equipment.feeds().len(), 3);
        assert!(ReferenceKind::Equipment.tolerates_feed_failure());
        assert!(!ReferenceKind::Spells.tolerates_feed_failure());
        assert_eq!(ReferenceKind::Equipment.summary_noun(), "equipment items");
    }

    #[test]
    fn table_names_are_prefixed() {
        for kind in ReferenceKind::ALL {
            assert!(kind.table_name().starts_with("open5e_"));
        }
    }
}
