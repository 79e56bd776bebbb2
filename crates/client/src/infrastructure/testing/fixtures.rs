//! Simple test fixtures used across unit tests.

use blockhaven_domain::{LogicMode, Objective, QuestType, QuestWire, Target, TargetKind};
use chrono::{TimeZone, Utc};

use crate::ports::outbound::ApiError;

pub fn api_request_failed(msg: &str) -> ApiError {
    ApiError::RequestFailed(msg.to_string())
}

pub fn target(block: &str, count: u32) -> Target {
    Target {
        kind: TargetKind::Mine,
        block: block.to_string(),
        count: Some(count),
        ..Default::default()
    }
}

pub fn objective(description: &str, targets: Vec<Target>) -> Objective {
    Objective {
        id: None,
        description: description.to_string(),
        display: None,
        logic: LogicMode::And,
        targets,
        ..Default::default()
    }
}

/// A quest that passes every validation rule.
pub fn valid_quest_wire() -> QuestWire {
    QuestWire {
        id: None,
        title: "Diamond Rush".to_string(),
        quest_type: Some(QuestType::Daily),
        description: "Dig deep.".to_string(),
        start_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single(),
        end_time: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single(),
        tags: vec!["mining".to_string()],
        objectives: vec![
            objective(
                "Mine ores",
                vec![
                    target("minecraft:diamond_ore", 3),
                    target("minecraft:iron_ore", 10),
                ],
            ),
            objective("Gather wood", vec![target("minecraft:oak_log", 16)]),
        ],
        ..Default::default()
    }
}
