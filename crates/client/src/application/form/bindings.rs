//! Field bindings between a [`QuestFormSession`] and input controls.
//!
//! Each binding knows one field: where it lives, how to read its value out of
//! a session, how to render it as input text, and how to turn raw input back
//! into a [`QuestEdit`]. Controls only ever see a [`FieldHandle`] and call
//! [`FieldBinding::handle_change`] / [`FieldBinding::handle_blur`].

use blockhaven_domain::{
    block_options, logic_mode_options, quest_type_options, target_kind_options, FieldPath,
    LogicMode, QuestType, SelectOption, TargetKind,
};
use chrono::{DateTime, NaiveDateTime, Utc};

use super::session::{QuestEdit, QuestFormSession};
use crate::ports::outbound::RandomProvider;

/// Input format of `<input type="datetime-local">`.
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

const TAG_SEPARATOR: char = ',';

pub const NOT_A_NUMBER: &str = "Must be a whole number";
pub const NOT_A_DATETIME: &str = "Must be a valid date and time";

/// Everything a control needs to render one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldHandle<V> {
    pub path: FieldPath,
    /// Committed value
    pub value: V,
    /// Text to show in the control: uncommitted input if any, else the value
    pub raw: String,
    pub touched: bool,
    pub valid: bool,
    pub errors: Vec<String>,
    pub placeholder: Option<String>,
}

impl<V> FieldHandle<V> {
    /// Error decoration is shown only for fields the user has reached.
    pub fn show_error(&self) -> bool {
        self.touched && !self.valid
    }
}

pub trait FieldBinding {
    type Value;

    fn path(&self) -> FieldPath;

    fn value(&self, session: &QuestFormSession) -> Self::Value;

    fn format(&self, value: &Self::Value) -> String;

    /// Turn raw input into an edit. `None` means the input is refused.
    fn parse(&self, raw: &str) -> Option<QuestEdit>;

    /// Paths whose errors belong to this control.
    fn error_paths(&self) -> Vec<FieldPath> {
        vec![self.path()]
    }

    fn placeholder(&self) -> Option<String> {
        None
    }

    fn read(&self, session: &QuestFormSession) -> FieldHandle<Self::Value> {
        let path = self.path();
        let errors: Vec<String> = self
            .error_paths()
            .iter()
            .flat_map(|p| session.errors().get(p).iter().cloned())
            .collect();
        let value = self.value(session);
        let raw = match session.draft(&path) {
            Some(draft) => draft.raw.clone(),
            None => self.format(&value),
        };
        FieldHandle {
            touched: session.is_touched(&path),
            valid: errors.is_empty(),
            errors,
            placeholder: self.placeholder(),
            value,
            raw,
            path,
        }
    }

    fn handle_change(&self, session: QuestFormSession, raw: &str) -> QuestFormSession {
        match self.parse(raw) {
            Some(edit) => session.apply(edit).apply(QuestEdit::Touch(self.path())),
            None => {
                tracing::debug!(field = %self.path(), raw, "Refused input");
                session
            }
        }
    }

    fn handle_blur(&self, session: QuestFormSession) -> QuestFormSession {
        session.apply(QuestEdit::Touch(self.path()))
    }
}

/// Choice controls also list what can be picked.
pub trait ChoiceBinding: FieldBinding {
    fn options(&self) -> Vec<SelectOption>;
}

// =============================================================================
// Quest fields
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleField;

impl FieldBinding for TitleField {
    type Value = String;

    fn path(&self) -> FieldPath {
        FieldPath::field("title")
    }

    fn value(&self, session: &QuestFormSession) -> String {
        session.form().title.clone()
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        Some(QuestEdit::SetTitle(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionField;

impl FieldBinding for DescriptionField {
    type Value = String;

    fn path(&self) -> FieldPath {
        FieldPath::field("description")
    }

    fn value(&self, session: &QuestFormSession) -> String {
        session.form().description.clone()
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        Some(QuestEdit::SetDescription(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestTypeField;

impl FieldBinding for QuestTypeField {
    type Value = Option<QuestType>;

    fn path(&self) -> FieldPath {
        FieldPath::field("quest_type")
    }

    fn value(&self, session: &QuestFormSession) -> Option<QuestType> {
        session.form().quest_type
    }

    fn format(&self, value: &Option<QuestType>) -> String {
        value.map(|t| t.as_str().to_string()).unwrap_or_default()
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        raw.parse().ok().map(QuestEdit::SetQuestType)
    }
}

impl ChoiceBinding for QuestTypeField {
    fn options(&self) -> Vec<SelectOption> {
        quest_type_options()
    }
}

/// Comma separated tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagsField;

impl FieldBinding for TagsField {
    type Value = Vec<String>;

    fn path(&self) -> FieldPath {
        FieldPath::field("tags")
    }

    fn value(&self, session: &QuestFormSession) -> Vec<String> {
        session.form().tags.clone()
    }

    fn format(&self, value: &Vec<String>) -> String {
        value.join(", ")
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        Some(QuestEdit::SetTagsText(raw.to_string()))
    }
}

/// Split comma-separated tag text, dropping blanks.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Time range
// =============================================================================

/// Accepts RFC 3339, or `datetime-local` input read as UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, DATETIME_LOCAL_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn format_datetime(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format(DATETIME_LOCAL_FORMAT).to_string())
        .unwrap_or_default()
}

fn datetime_edit(
    path: FieldPath,
    raw: &str,
    set: fn(Option<DateTime<Utc>>) -> QuestEdit,
) -> QuestEdit {
    if raw.trim().is_empty() {
        return set(None);
    }
    match parse_datetime(raw) {
        Some(dt) => set(Some(dt)),
        None => QuestEdit::Draft {
            path,
            raw: raw.to_string(),
            message: NOT_A_DATETIME.to_string(),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeStartField;

impl FieldBinding for RangeStartField {
    type Value = Option<DateTime<Utc>>;

    fn path(&self) -> FieldPath {
        FieldPath::field("range").key("start")
    }

    fn value(&self, session: &QuestFormSession) -> Option<DateTime<Utc>> {
        session.form().range.start
    }

    fn format(&self, value: &Option<DateTime<Utc>>) -> String {
        format_datetime(*value)
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        Some(datetime_edit(self.path(), raw, QuestEdit::SetRangeStart))
    }
}

/// End of the window; also shows the start/end ordering error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeEndField;

impl FieldBinding for RangeEndField {
    type Value = Option<DateTime<Utc>>;

    fn path(&self) -> FieldPath {
        FieldPath::field("range").key("end")
    }

    fn value(&self, session: &QuestFormSession) -> Option<DateTime<Utc>> {
        session.form().range.end
    }

    fn format(&self, value: &Option<DateTime<Utc>>) -> String {
        format_datetime(*value)
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        Some(datetime_edit(self.path(), raw, QuestEdit::SetRangeEnd))
    }

    fn error_paths(&self) -> Vec<FieldPath> {
        vec![self.path(), FieldPath::field("range")]
    }
}

// =============================================================================
// Objective fields
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveDescriptionField {
    pub objective: usize,
}

impl FieldBinding for ObjectiveDescriptionField {
    type Value = String;

    fn path(&self) -> FieldPath {
        FieldPath::objective(self.objective).key("description")
    }

    fn value(&self, session: &QuestFormSession) -> String {
        session
            .form()
            .objectives
            .get(self.objective)
            .map(|o| o.description.clone())
            .unwrap_or_default()
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        Some(QuestEdit::SetObjectiveDescription {
            objective: self.objective,
            value: raw.to_string(),
        })
    }
}

/// Optional display override; blank input clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveDisplayField {
    pub objective: usize,
}

impl FieldBinding for ObjectiveDisplayField {
    type Value = Option<String>;

    fn path(&self) -> FieldPath {
        FieldPath::objective(self.objective).key("display")
    }

    fn value(&self, session: &QuestFormSession) -> Option<String> {
        session
            .form()
            .objectives
            .get(self.objective)
            .and_then(|o| o.display.clone())
    }

    fn format(&self, value: &Option<String>) -> String {
        value.clone().unwrap_or_default()
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        let value = (!raw.trim().is_empty()).then(|| raw.to_string());
        Some(QuestEdit::SetObjectiveDisplay {
            objective: self.objective,
            value,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveLogicField {
    pub objective: usize,
}

impl FieldBinding for ObjectiveLogicField {
    type Value = LogicMode;

    fn path(&self) -> FieldPath {
        FieldPath::objective(self.objective).key("logic")
    }

    fn value(&self, session: &QuestFormSession) -> LogicMode {
        session
            .form()
            .objectives
            .get(self.objective)
            .map(|o| o.logic)
            .unwrap_or_default()
    }

    fn format(&self, value: &LogicMode) -> String {
        value.as_str().to_string()
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        let logic = raw.parse().ok()?;
        Some(QuestEdit::SetObjectiveLogic {
            objective: self.objective,
            logic,
        })
    }
}

impl ChoiceBinding for ObjectiveLogicField {
    fn options(&self) -> Vec<SelectOption> {
        logic_mode_options()
    }
}

// =============================================================================
// Target fields
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetKindField {
    pub objective: usize,
    pub target: usize,
}

impl FieldBinding for TargetKindField {
    type Value = TargetKind;

    fn path(&self) -> FieldPath {
        FieldPath::target(self.objective, self.target).key("kind")
    }

    fn value(&self, session: &QuestFormSession) -> TargetKind {
        target_of(session, self.objective, self.target)
            .map(|t| t.kind)
            .unwrap_or_default()
    }

    fn format(&self, value: &TargetKind) -> String {
        value.as_str().to_string()
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        let kind = raw.parse().ok()?;
        Some(QuestEdit::SetTargetKind {
            objective: self.objective,
            target: self.target,
            kind,
        })
    }
}

impl ChoiceBinding for TargetKindField {
    fn options(&self) -> Vec<SelectOption> {
        target_kind_options()
    }
}

/// Block picker. Unknown ids are committed and flagged by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetBlockField {
    pub objective: usize,
    pub target: usize,
}

impl FieldBinding for TargetBlockField {
    type Value = String;

    fn path(&self) -> FieldPath {
        FieldPath::target(self.objective, self.target).key("block")
    }

    fn value(&self, session: &QuestFormSession) -> String {
        target_of(session, self.objective, self.target)
            .map(|t| t.block.clone())
            .unwrap_or_default()
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        Some(QuestEdit::SetTargetBlock {
            objective: self.objective,
            target: self.target,
            block: raw.trim().to_string(),
        })
    }
}

impl ChoiceBinding for TargetBlockField {
    fn options(&self) -> Vec<SelectOption> {
        block_options()
    }
}

/// Required count of a target.
///
/// The placeholder is only a hint shown in the empty control; leaving the
/// field empty keeps the count unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCountField {
    pub objective: usize,
    pub target: usize,
    pub hint: Option<u32>,
}

impl TargetCountField {
    pub const HINT_MIN: i32 = 1;
    pub const HINT_MAX: i32 = 64;

    pub fn new(objective: usize, target: usize) -> Self {
        Self {
            objective,
            target,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: u32) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Pick a hint once per mounted control.
    pub fn random_hint(random: &dyn RandomProvider) -> u32 {
        let n = random.random_range(Self::HINT_MIN, Self::HINT_MAX);
        u32::try_from(n).unwrap_or(1)
    }
}

impl FieldBinding for TargetCountField {
    type Value = Option<u32>;

    fn path(&self) -> FieldPath {
        FieldPath::target(self.objective, self.target).key("count")
    }

    fn value(&self, session: &QuestFormSession) -> Option<u32> {
        target_of(session, self.objective, self.target).and_then(|t| t.count)
    }

    fn format(&self, value: &Option<u32>) -> String {
        value.map(|n| n.to_string()).unwrap_or_default()
    }

    fn placeholder(&self) -> Option<String> {
        self.hint.map(|n| n.to_string())
    }

    fn parse(&self, raw: &str) -> Option<QuestEdit> {
        let trimmed = raw.trim();
        let edit = if trimmed.is_empty() {
            QuestEdit::SetTargetCount {
                objective: self.objective,
                target: self.target,
                count: None,
            }
        } else {
            match trimmed.parse::<u32>() {
                Ok(count) => QuestEdit::SetTargetCount {
                    objective: self.objective,
                    target: self.target,
                    count: Some(count),
                },
                Err(_) => QuestEdit::Draft {
                    path: self.path(),
                    raw: raw.to_string(),
                    message: NOT_A_NUMBER.to_string(),
                },
            }
        };
        Some(edit)
    }
}

fn target_of(
    session: &QuestFormSession,
    objective: usize,
    target: usize,
) -> Option<&blockhaven_domain::Target> {
    session.form().objectives.get(objective)?.targets.get(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::FixedRandomProvider;
    use crate::infrastructure::testing::fixtures::valid_quest_wire;
    use chrono::TimeZone;

    fn session() -> QuestFormSession {
        QuestFormSession::from_wire(valid_quest_wire())
    }

    #[test]
    fn logic_choice_refuses_unknown_mode() {
        let binding = ObjectiveLogicField { objective: 0 };
        let before = session();

        let after = binding.handle_change(before.clone(), "xor");
        assert_eq!(after, before);

        let after = binding.handle_change(after, "sequential");
        assert_eq!(binding.value(&after), LogicMode::Sequential);
        assert!(binding.read(&after).touched);
    }

    #[test]
    fn quest_type_choice_lists_and_refuses() {
        assert_eq!(QuestTypeField.options().len(), 4);
        assert!(QuestTypeField.parse("monthly").is_none());
        assert_eq!(
            QuestTypeField.parse("weekly"),
            Some(QuestEdit::SetQuestType(QuestType::Weekly))
        );
    }

    #[test]
    fn decoration_needs_touch_and_error() {
        let session = session().apply(QuestEdit::SetTitle(String::new()));
        let handle = TitleField.read(&session);
        assert!(!handle.valid);
        assert!(!handle.touched);
        assert!(!handle.show_error());

        let handle = TitleField.read(&TitleField.handle_blur(session));
        assert!(handle.show_error());
        assert_eq!(handle.errors, ["This field is required"]);
    }

    #[test]
    fn count_coerces_text() {
        let binding = TargetCountField::new(0, 1);

        let s = binding.handle_change(session(), " 42 ");
        assert_eq!(binding.value(&s), Some(42));

        let s = binding.handle_change(s, "");
        assert_eq!(binding.value(&s), None);
        assert_eq!(binding.read(&s).errors, ["Count is required"]);

        let s = binding.handle_change(s, "a dozen");
        let handle = binding.read(&s);
        assert_eq!(handle.raw, "a dozen");
        assert_eq!(handle.errors, [NOT_A_NUMBER]);
        assert!(handle.show_error());
    }

    #[test]
    fn count_hint_is_never_committed() {
        let hint = TargetCountField::random_hint(&FixedRandomProvider(99));
        assert_eq!(hint, 64);

        let binding = TargetCountField::new(0, 0).with_hint(hint);
        let s = binding.handle_change(session(), "");
        let handle = binding.read(&s);

        assert_eq!(handle.placeholder.as_deref(), Some("64"));
        assert_eq!(handle.value, None);
        assert_eq!(handle.raw, "");
    }

    #[test]
    fn datetime_accepts_local_and_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).unwrap();
        assert_eq!(parse_datetime("2024-06-01T18:30"), Some(expected));
        assert_eq!(parse_datetime("2024-06-01T20:30:00+02:00"), Some(expected));
        assert_eq!(parse_datetime("tomorrow"), None);
        assert_eq!(format_datetime(Some(expected)), "2024-06-01T18:30");
    }

    #[test]
    fn range_end_shows_ordering_error() {
        let s = RangeEndField.handle_change(session(), "2023-12-31T00:00");
        let handle = RangeEndField.read(&s);

        assert_eq!(handle.errors, ["End time must be after start time"]);
        assert!(handle.show_error());
        assert!(RangeStartField.read(&s).valid);
    }

    #[test]
    fn bad_datetime_is_a_draft() {
        let s = RangeStartField.handle_change(session(), "soon");
        let handle = RangeStartField.read(&s);

        assert_eq!(handle.raw, "soon");
        assert_eq!(handle.errors, [NOT_A_DATETIME]);
        assert!(handle.value.is_some());
    }

    #[test]
    fn tags_split_on_commas() {
        let s = TagsField.handle_change(session(), "mining, , pvp ,event");
        assert_eq!(TagsField.value(&s), ["mining", "pvp", "event"]);
        assert!(TagsField.read(&s).valid);
    }

    #[test]
    fn tag_text_is_shown_as_typed() {
        let s = TagsField.handle_change(session(), "mining, ");
        let handle = TagsField.read(&s);

        assert_eq!(handle.value, ["mining"]);
        assert_eq!(handle.raw, "mining, ");
        assert!(handle.errors.is_empty());

        let s = TagsField.handle_change(s, "mining, pvp");
        assert_eq!(TagsField.read(&s).raw, "mining, pvp");
        assert_eq!(TagsField.value(&s), ["mining", "pvp"]);
    }

    #[test]
    fn tag_limit_error_survives_typed_text() {
        let raw = (1..=11).map(|n| format!("t{n}")).collect::<Vec<_>>().join(",");
        let s = TagsField.handle_change(session(), &raw);
        let handle = TagsField.read(&s);

        assert_eq!(handle.raw, raw);
        assert!(!handle.valid);
        assert!(handle.show_error());
    }

    #[test]
    fn blank_display_clears_override() {
        let binding = ObjectiveDisplayField { objective: 1 };
        let s = binding.handle_change(session(), "Chop chop");
        assert_eq!(binding.value(&s).as_deref(), Some("Chop chop"));

        let s = binding.handle_change(s, "  ");
        assert_eq!(binding.value(&s), None);
    }

    #[test]
    fn unknown_block_is_flagged() {
        let binding = TargetBlockField {
            objective: 0,
            target: 0,
        };
        let s = binding.handle_change(session(), "minecraft:bedrock");
        assert_eq!(binding.read(&s).errors, ["Choose a block from the list"]);
    }
}
