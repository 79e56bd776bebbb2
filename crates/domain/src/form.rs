//! Editable representation of a quest.
//!
//! Mirrors [`QuestWire`](crate::quest::QuestWire) field for field, except the
//! flat `start_time`/`end_time` pair is folded into a single [`TimeRange`].
//! Validation rules are declared on the fields themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::quest::{Objective, QuestType};
use crate::schema::{ordered_range, required_text};

/// A quest as edited in the authoring form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct QuestForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(
        custom(function = "required_text"),
        length(max = 120, message = "Title must be at most 120 characters")
    )]
    pub title: String,
    #[validate(required(message = "Choose a quest type"))]
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub quest_type: Option<QuestType>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[serde(default)]
    pub description: String,
    #[validate(nested)]
    #[serde(default)]
    pub range: TimeRange,
    #[validate(length(max = 10, message = "A quest can have at most 10 tags"))]
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(
        length(min = 1, message = "Add at least one objective"),
        nested
    )]
    #[serde(default)]
    pub objectives: Vec<Objective>,
    /// Unmodelled wire keys, carried through editing unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuestForm {
    /// The starting point of a new-quest edit session.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Start and end of the window in which a quest is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "ordered_range"))]
pub struct TimeRange {
    #[validate(required(message = "Start time is required"))]
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[validate(required(message = "End time is required"))]
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }
}
