//! Static option sets for enumerated-choice fields.

use crate::blocks::{block_display_name, vanilla_blocks};
use crate::quest::{LogicMode, QuestType, TargetKind};

/// A single entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value committed to the form
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub fn quest_type_options() -> Vec<SelectOption> {
    QuestType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect()
}

pub fn logic_mode_options() -> Vec<SelectOption> {
    LogicMode::ALL
        .iter()
        .map(|m| SelectOption::new(m.as_str(), m.label()))
        .collect()
}

pub fn target_kind_options() -> Vec<SelectOption> {
    TargetKind::ALL
        .iter()
        .map(|k| SelectOption::new(k.as_str(), k.label()))
        .collect()
}

/// Vanilla blocks labelled with their display names.
pub fn block_options() -> Vec<SelectOption> {
    vanilla_blocks()
        .iter()
        .map(|id| SelectOption::new(id.as_str(), block_display_name(id)))
        .collect()
}
