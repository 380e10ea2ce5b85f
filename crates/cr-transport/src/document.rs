//! Wire shapes of the map and statistics documents.
//!
//! # Map document
//!
//! ```json
//! {
//!   "up_right_point":  {"x": 40, "y": 22},
//!   "down_left_point": {"x": 0,  "y": 0},
//!   "borders": [{"first": {"x": 4, "y": 0}, "second": {"x": 4, "y": 10}}],
//!   "persons": [{"id": 0, "position": {"x": 15, "y": 15}, "goal": {"x": 18, "y": 15}}],
//!   "name":    "lobby",
//!   "groups":  [{"id": 0, "start_position": {"x": 2, "y": 2}, "total_count": 3, "person_ids": [1, 2, 3]}]
//! }
//! ```
//!
//! `name` and `groups` are optional.
//!
//! # Statistics document
//!
//! ```json
//! {
//!   "ideal":  {"value": 12.5, "problematic": 0},
//!   "valid":  {"value": null, "problematic": 2},
//!   "routes": [{"id": 0, "route": ["RIGHT", "RIGHT_UP", "WAIT"]}]
//! }
//! ```

use serde::{Deserialize, Serialize};

use cr_core::{GroupId, PersonId, Point};

// ── Map ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    /// Exclusive upper corner: `(width, height)`.
    pub up_right_point: Point,
    /// Must be the origin.
    pub down_left_point: Point,
    pub borders: Vec<BorderDoc>,
    pub persons: Vec<PersonDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupDoc>,
}

/// A wall between two corners.  Axis alignment is checked on load, not
/// during parsing, so a diagonal border is reported as a malformed document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderDoc {
    pub first:  Point,
    pub second: Point,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonDoc {
    pub id:       PersonId,
    pub position: Point,
    pub goal:     Point,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDoc {
    pub id:             GroupId,
    pub start_position: Point,
    pub total_count:    u32,
    #[serde(default)]
    pub person_ids:     Vec<PersonId>,
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatisticsDocument {
    pub ideal:  Estimate,
    pub valid:  Estimate,
    pub routes: Vec<RouteDoc>,
}

/// Evacuation time estimate computed by the planning service.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Seconds, or `None` when the service could not compute one.
    pub value: Option<f64>,
    /// Persons that did not reach their goal.
    pub problematic: i64,
}

/// One route as raw tokens; decoded by [`load_routes`][crate::load_routes].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDoc {
    pub id:    PersonId,
    pub route: Vec<String>,
}

/// The estimates of a statistics document, kept alongside its routes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    pub ideal: Estimate,
    pub valid: Estimate,
}
