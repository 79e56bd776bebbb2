//! Quest authoring form: edit sessions and the field bindings that drive them.

pub mod bindings;
pub mod session;

pub use bindings::{
    ChoiceBinding, DescriptionField, FieldBinding, FieldHandle, ObjectiveDescriptionField,
    ObjectiveDisplayField, ObjectiveLogicField, QuestTypeField, RangeEndField, RangeStartField,
    TagsField, TargetBlockField, TargetCountField, TargetKindField, TitleField,
};
pub use session::{submit_quest, Draft, FormStatus, QuestEdit, QuestFormSession, SubmitAttempt};
