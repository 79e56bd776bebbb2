//! BlockHaven domain: quest records, their editable form, and the rules
//! that decide whether a form may be submitted.

pub mod blocks;
pub mod conversion;
pub mod error;
pub mod form;
pub mod options;
pub mod quest;
pub mod schema;

pub use blocks::{block_display_name, is_known_block, vanilla_blocks};
pub use conversion::{form_to_wire, wire_to_form};
pub use error::DomainError;
pub use form::{QuestForm, TimeRange};
pub use options::{
    block_options, logic_mode_options, quest_type_options, target_kind_options, SelectOption,
};
pub use quest::{LogicMode, Objective, QuestType, QuestWire, Target, TargetKind};
pub use schema::{validate_form, FieldPath, FormErrors, PathSegment};
