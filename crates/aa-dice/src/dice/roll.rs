//! The outcome record of a completed loaded roll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DieFace, MAX_FACE, MIN_FACE, Total};
use crate::anchor::Anchor;

/// The authoritative result of one roll.
///
/// Built once when a roll resolves and never changed afterwards; the next
/// roll produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    face1: DieFace,
    face2: DieFace,
    total: Total,
    anchor: Anchor,
    timestamp: DateTime<Utc>,
}

impl RollResult {
    /// Record a roll of `face1` and `face2` made under `anchor`, stamped now.
    pub fn new(face1: DieFace, face2: DieFace, anchor: Anchor) -> Self {
        Self::at(face1, face2, anchor, Utc::now())
    }

    /// Record a roll with an explicit timestamp.
    pub fn at(face1: DieFace, face2: DieFace, anchor: Anchor, timestamp: DateTime<Utc>) -> Self {
        Self {
            face1,
            face2,
            total: face1 + face2,
            anchor,
            timestamp,
        }
    }

    /// The first die face.
    pub fn face1(&self) -> DieFace {
        self.face1
    }

    /// The second die face.
    pub fn face2(&self) -> DieFace {
        self.face2
    }

    /// The sum of both faces.
    pub fn total(&self) -> Total {
        self.total
    }

    /// The anchor the roll was made under.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// When the roll resolved.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether the faces are in range and add up to the total.
    ///
    /// Always true for results built by this crate; useful for values read
    /// back from storage.
    pub fn is_consistent(&self) -> bool {
        let face_ok = |f: DieFace| (MIN_FACE..=MAX_FACE).contains(&f);
        face_ok(self.face1) && face_ok(self.face2) && self.face1 + self.face2 == self.total
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} = {}", self.face1, self.face2, self.total)
    }
}
