// crates/license-api-config/src/teams.rs
// ============================================================================
// Module: Team Directory
// Description: Team identifiers and the named team lookup table.
// Purpose: Map logical team names used by tests onto real numeric team IDs.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Teams are identified remotely by numeric IDs. Test scenarios refer to them
//! by stable logical names (`"Team 1"`, `"Team 2"`) so the same suites run
//! against any environment once the directory is configured.
//! Invariants:
//! - Team IDs are non-zero.
//! - Names and IDs are unique within a directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Logical name of the first test team.
pub const TEAM_1: &str = "Team 1";
/// Logical name of the second test team.
pub const TEAM_2: &str = "Team 2";
/// Default numeric ID for [`TEAM_1`].
const DEFAULT_TEAM_1_ID: u64 = 2_573_297;
/// Default numeric ID for [`TEAM_2`].
const DEFAULT_TEAM_2_ID: u64 = 2_717_496;

// ============================================================================
// SECTION: Team Identifier
// ============================================================================

/// Numeric team identifier as used by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(u64);

impl TeamId {
    /// Wraps a raw numeric team ID.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value: u64 =
            raw.trim().parse().map_err(|_| format!("team id must be a positive integer: {raw}"))?;
        if value == 0 {
            return Err("team id must be greater than zero".to_string());
        }
        Ok(Self(value))
    }
}

impl From<u64> for TeamId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// ============================================================================
// SECTION: Team Directory
// ============================================================================

/// Named lookup table of test teams.
///
/// # Invariants
/// - Every entry maps a unique name to a unique non-zero [`TeamId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDirectory {
    /// Name to team ID entries, ordered by name.
    entries: BTreeMap<String, TeamId>,
}

impl Default for TeamDirectory {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(TEAM_1.to_string(), TeamId(DEFAULT_TEAM_1_ID));
        entries.insert(TEAM_2.to_string(), TeamId(DEFAULT_TEAM_2_ID));
        Self {
            entries,
        }
    }
}

impl TeamDirectory {
    /// Builds a directory from `(name, id)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error when the list is empty, a name repeats, an ID repeats,
    /// or an ID is zero.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (S, TeamId)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        let mut seen_ids = BTreeSet::new();
        for (name, id) in entries {
            let name = name.into();
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err("team names must not be empty".to_string());
            }
            if id.get() == 0 {
                return Err(format!("team {name} must have a non-zero id"));
            }
            if !seen_ids.insert(id) {
                return Err(format!("team id {id} is listed more than once"));
            }
            if map.insert(name.clone(), id).is_some() {
                return Err(format!("team {name} is listed more than once"));
            }
        }
        if map.is_empty() {
            return Err("team directory must contain at least one team".to_string());
        }
        Ok(Self {
            entries: map,
        })
    }

    /// Returns the team ID for a logical name.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<TeamId> {
        self.entries.get(name).copied()
    }

    /// Returns the team ID for a logical name or a descriptive error.
    ///
    /// # Errors
    ///
    /// Returns an error naming the unknown team.
    pub fn require(&self, name: &str) -> Result<TeamId, String> {
        self.id(name).ok_or_else(|| format!("unknown team name: {name}"))
    }

    /// Returns the logical name for a team ID.
    #[must_use]
    pub fn name_of(&self, id: TeamId) -> Option<&str> {
        self.entries.iter().find(|(_, value)| **value == id).map(|(name, _)| name.as_str())
    }

    /// Returns true when the ID belongs to a configured team.
    #[must_use]
    pub fn contains_id(&self, id: TeamId) -> bool {
        self.entries.values().any(|value| *value == id)
    }

    /// Returns the set of configured team IDs.
    #[must_use]
    pub fn ids(&self) -> BTreeSet<TeamId> {
        self.entries.values().copied().collect()
    }

    /// Returns the configured logical names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates `(name, id)` entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TeamId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Returns the number of configured teams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the directory has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
