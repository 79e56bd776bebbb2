//! Quest records as stored and transmitted by the remote API.
//!
//! `QuestWire` is the API-facing shape. The objective and target types are
//! shared with the editable form model in [`crate::form`], which only differs
//! in how the start/end timestamps are laid out.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::DomainError;
use crate::schema::{known_block, required_text};

/// A quest as returned by `GET /quests/{id}` and accepted by `POST`/`PUT`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestWire {
    /// Server-assigned identifier (absent until the quest is created)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub quest_type: Option<QuestType>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    /// Keys this client does not model, sent back untouched on update
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A sub-unit of a quest with its own completion logic over targets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct Objective {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(
        custom(function = "required_text"),
        length(max = 500, message = "Description must be at most 500 characters")
    )]
    #[serde(default)]
    pub description: String,
    /// Optional text shown to players instead of the generated summary
    #[validate(length(max = 120, message = "Display text must be at most 120 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default)]
    pub logic: LogicMode,
    #[validate(
        length(min = 1, message = "Add at least one target"),
        nested
    )]
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Objective {
    /// An objective with no description, default logic and no targets.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The smallest completion condition within an objective.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct Target {
    #[serde(default)]
    pub kind: TargetKind,
    /// Vanilla block identifier, e.g. `minecraft:diamond_ore`
    #[validate(custom(function = "known_block"))]
    #[serde(default)]
    pub block: String,
    #[validate(
        required(message = "Count is required"),
        range(min = 1, max = 100000, message = "Count must be between 1 and 100000")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Target {
    pub fn empty() -> Self {
        Self::default()
    }
}

// =============================================================================
// Enumerated option values
// =============================================================================

/// Category of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    Daily,
    Weekly,
    Event,
    Story,
}

impl QuestType {
    pub const ALL: [QuestType; 4] = [Self::Daily, Self::Weekly, Self::Event, Self::Story];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Event => "event",
            Self::Story => "story",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Event => "Event",
            Self::Story => "Story",
        }
    }
}

impl fmt::Display for QuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown quest type: {}", s)))
    }
}

/// How an objective's targets combine to determine completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicMode {
    /// Every target must be completed
    #[default]
    And,
    /// Any single target completes the objective
    Or,
    /// Targets must be completed in listed order
    Sequential,
}

impl LogicMode {
    pub const ALL: [LogicMode; 3] = [Self::And, Self::Or, Self::Sequential];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Sequential => "sequential",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::And => "All targets",
            Self::Or => "Any target",
            Self::Sequential => "Targets in order",
        }
    }
}

impl fmt::Display for LogicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown logic mode: {}", s)))
    }
}

/// What the player has to do with the target block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Mine,
    Place,
    Collect,
}

impl TargetKind {
    pub const ALL: [TargetKind; 3] = [Self::Mine, Self::Place, Self::Collect];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mine => "mine",
            Self::Place => "place",
            Self::Collect => "collect",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mine => "Mine",
            Self::Place => "Place",
            Self::Collect => "Collect",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown target kind: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_deserializes_api_payload() {
        let json = r#"{
            "id": "q1",
            "title": "Deep Dive",
            "type": "weekly",
            "description": "Go mining",
            "start_time": "2024-01-01T00:00:00Z",
            "end_time": "2024-01-08T00:00:00Z",
            "tags": ["mining"],
            "objectives": [{
                "description": "Find diamonds",
                "logic": "sequential",
                "targets": [{"kind": "mine", "block": "minecraft:diamond_ore", "count": 3}]
            }]
        }"#;

        let quest: QuestWire = serde_json::from_str(json).unwrap();
        assert_eq!(quest.id.as_deref(), Some("q1"));
        assert_eq!(quest.quest_type, Some(QuestType::Weekly));
        assert_eq!(quest.objectives[0].logic, LogicMode::Sequential);
        assert_eq!(quest.objectives[0].targets[0].count, Some(3));
        assert!(quest.objectives[0].display.is_none());
    }

    #[test]
    fn test_wire_omits_absent_fields() {
        let quest = QuestWire {
            title: "T".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&quest).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("type").is_none());
        assert!(json.get("start_time").is_none());
        assert_eq!(json["title"], "T");
    }

    #[test]
    fn test_unknown_logic_mode_is_rejected() {
        let json = r#"{"description": "x", "logic": "xor", "targets": []}"#;
        assert!(serde_json::from_str::<Objective>(json).is_err());
        assert!("xor".parse::<LogicMode>().is_err());
    }

    #[test]
    fn test_option_values_parse() {
        assert_eq!("and".parse::<LogicMode>().unwrap(), LogicMode::And);
        assert_eq!("event".parse::<QuestType>().unwrap(), QuestType::Event);
        assert_eq!("place".parse::<TargetKind>().unwrap(), TargetKind::Place);
        assert_eq!(LogicMode::default(), LogicMode::And);
    }
}
