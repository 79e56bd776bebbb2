//! Wire ⇄ form reshaping.
//!
//! Both directions are pure structural moves: nothing is validated, nothing
//! can fail, and missing timestamps stay missing. Collections are moved, not
//! cloned, so a fetched quest hands its objectives to the edit session as-is.

use crate::form::{QuestForm, TimeRange};
use crate::quest::QuestWire;

/// Fold `start_time`/`end_time` into `range`.
pub fn wire_to_form(wire: QuestWire) -> QuestForm {
    let QuestWire {
        id,
        title,
        quest_type,
        description,
        start_time,
        end_time,
        tags,
        objectives,
        extra,
    } = wire;

    QuestForm {
        id,
        title,
        quest_type,
        description,
        range: TimeRange::new(start_time, end_time),
        tags,
        objectives,
        extra,
    }
}

/// Unfold `range` back into `start_time`/`end_time`.
pub fn form_to_wire(form: QuestForm) -> QuestWire {
    let QuestForm {
        id,
        title,
        quest_type,
        description,
        range,
        tags,
        objectives,
        extra,
    } = form;

    QuestWire {
        id,
        title,
        quest_type,
        description,
        start_time: range.start,
        end_time: range.end,
        tags,
        objectives,
        extra,
    }
}

impl From<QuestWire> for QuestForm {
    fn from(wire: QuestWire) -> Self {
        wire_to_form(wire)
    }
}

impl From<QuestForm> for QuestWire {
    fn from(form: QuestForm) -> Self {
        form_to_wire(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::{LogicMode, Objective, QuestType, Target, TargetKind};
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn sample_wire() -> QuestWire {
        QuestWire {
            id: Some("q7".to_string()),
            title: "Nether Run".to_string(),
            quest_type: Some(QuestType::Event),
            description: "Bring back quartz".to_string(),
            start_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            end_time: Some(Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap()),
            tags: vec!["nether".to_string(), "event".to_string()],
            objectives: vec![
                Objective {
                    id: Some("o1".to_string()),
                    description: "Mine quartz".to_string(),
                    display: Some("Quartz!".to_string()),
                    logic: LogicMode::Or,
                    targets: vec![
                        Target {
                            kind: TargetKind::Mine,
                            block: "minecraft:nether_quartz_ore".to_string(),
                            count: Some(32),
                            ..Default::default()
                        },
                        Target {
                            kind: TargetKind::Collect,
                            block: "minecraft:quartz_block".to_string(),
                            count: Some(4),
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                },
                Objective {
                    id: None,
                    description: "Build a portal".to_string(),
                    display: None,
                    logic: LogicMode::Sequential,
                    targets: vec![Target {
                        kind: TargetKind::Place,
                        block: "minecraft:obsidian".to_string(),
                        count: Some(10),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_wire_to_form_folds_timestamps_into_range() {
        let wire: QuestWire = serde_json::from_value(json!({
            "id": "q1",
            "start_time": "2024-01-01T00:00:00Z",
            "end_time": "2024-01-02T00:00:00Z",
            "title": "T"
        }))
        .unwrap();

        let form = wire_to_form(wire);

        assert_eq!(form.id.as_deref(), Some("q1"));
        assert_eq!(form.title, "T");
        assert_eq!(form.range.start, Some(ts("2024-01-01T00:00:00Z")));
        assert_eq!(form.range.end, Some(ts("2024-01-02T00:00:00Z")));

        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["range"]["start"], "2024-01-01T00:00:00Z");
        assert_eq!(value["range"]["end"], "2024-01-02T00:00:00Z");
        assert!(value.get("start_time").is_none());
        assert!(value.get("end_time").is_none());
    }

    #[test]
    fn test_wire_round_trip_is_lossless() {
        let wire = sample_wire();
        assert_eq!(form_to_wire(wire_to_form(wire.clone())), wire);
    }

    #[test]
    fn test_form_round_trip_is_lossless() {
        let form = wire_to_form(sample_wire());
        assert_eq!(wire_to_form(form_to_wire(form.clone())), form);
    }

    #[test]
    fn test_missing_timestamps_propagate_as_none() {
        let wire = QuestWire {
            title: "No dates".to_string(),
            end_time: Some(ts("2024-05-01T00:00:00Z")),
            ..Default::default()
        };

        let form = QuestForm::from(wire.clone());
        assert_eq!(form.range.start, None);
        assert_eq!(form.range.end, Some(ts("2024-05-01T00:00:00Z")));
        assert_eq!(QuestWire::from(form), wire);
    }

    #[test]
    fn test_unmodelled_keys_survive_json_round_trip() {
        let payload = json!({
            "id": "q1",
            "title": "T",
            "created_by": "admin",
            "version": 4,
            "objectives": [{
                "description": "d",
                "logic": "and",
                "rewards": [1],
                "targets": [{"kind": "mine", "block": "minecraft:stone", "count": 2, "weight": 0.5}]
            }]
        });

        let wire: QuestWire = serde_json::from_value(payload).unwrap();
        let form = wire_to_form(wire);
        assert_eq!(form.extra["created_by"], "admin");

        let back = serde_json::to_value(form_to_wire(form)).unwrap();
        assert_eq!(back["created_by"], "admin");
        assert_eq!(back["version"], 4);
        assert_eq!(back["objectives"][0]["rewards"], json!([1]));
        assert_eq!(back["objectives"][0]["targets"][0]["weight"], 0.5);
        assert_eq!(back["objectives"][0]["targets"][0]["count"], 2);
        assert!(back.get("range").is_none());
    }

    #[test]
    fn test_objective_order_is_preserved() {
        let form = wire_to_form(sample_wire());
        let descriptions: Vec<_> = form
            .objectives
            .iter()
            .map(|o| o.description.as_str())
            .collect();
        assert_eq!(descriptions, ["Mine quartz", "Build a portal"]);
        assert_eq!(
            form.objectives[0].targets[1].block,
            "minecraft:quartz_block"
        );
    }
}
