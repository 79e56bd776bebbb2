//! Quest form edit session.
//!
//! A [`QuestFormSession`] is an immutable snapshot of one quest being edited:
//! the form model, which fields the user has interacted with, raw input that
//! could not be committed yet, stable row keys for the objective and target
//! lists, the current validation errors and the submission status.
//!
//! Every change goes through [`QuestFormSession::apply`], which consumes the
//! snapshot and returns the next one.

use std::collections::{BTreeMap, BTreeSet};

use blockhaven_domain::{
    form_to_wire, validate_form, wire_to_form, FieldPath, FormErrors, LogicMode, Objective,
    QuestForm, QuestType, QuestWire, Target, TargetKind,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::bindings::split_tags;
use crate::application::services::QuestService;
use crate::application::ServiceError;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    /// Loaded and not yet edited
    #[default]
    Pristine,
    /// At least one field changed since load or the last failed submit
    Dirty,
    /// A save request is in flight
    Submitting,
    /// Saved; the session is finished
    Submitted,
    /// The last save failed; all input is kept
    Error(String),
}

impl FormStatus {
    pub fn accepts_edits(&self) -> bool {
        !matches!(self, FormStatus::Submitting | FormStatus::Submitted)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }
}

/// One user edit.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestEdit {
    SetTitle(String),
    SetDescription(String),
    SetQuestType(QuestType),
    /// Comma-separated tag text as typed
    SetTagsText(String),
    SetRangeStart(Option<DateTime<Utc>>),
    SetRangeEnd(Option<DateTime<Utc>>),
    AddObjective,
    RemoveObjective(usize),
    MoveObjective {
        from: usize,
        to: usize,
    },
    SetObjectiveDescription {
        objective: usize,
        value: String,
    },
    SetObjectiveDisplay {
        objective: usize,
        value: Option<String>,
    },
    SetObjectiveLogic {
        objective: usize,
        logic: LogicMode,
    },
    AddTarget {
        objective: usize,
    },
    RemoveTarget {
        objective: usize,
        target: usize,
    },
    MoveTarget {
        objective: usize,
        from: usize,
        to: usize,
    },
    SetTargetKind {
        objective: usize,
        target: usize,
        kind: TargetKind,
    },
    SetTargetBlock {
        objective: usize,
        target: usize,
        block: String,
    },
    SetTargetCount {
        objective: usize,
        target: usize,
        count: Option<u32>,
    },
    /// Raw input that could not be turned into a value
    Draft {
        path: FieldPath,
        raw: String,
        message: String,
    },
    /// Mark a field as interacted with
    Touch(FieldPath),
}

impl QuestEdit {
    /// The single field a value edit writes to.
    fn field_path(&self) -> Option<FieldPath> {
        let path = match self {
            QuestEdit::SetTitle(_) => FieldPath::field("title"),
            QuestEdit::SetDescription(_) => FieldPath::field("description"),
            QuestEdit::SetQuestType(_) => FieldPath::field("quest_type"),
            QuestEdit::SetTagsText(_) => FieldPath::field("tags"),
            QuestEdit::SetRangeStart(_) => FieldPath::field("range").key("start"),
            QuestEdit::SetRangeEnd(_) => FieldPath::field("range").key("end"),
            QuestEdit::SetObjectiveDescription { objective, .. } => {
                FieldPath::objective(*objective).key("description")
            }
            QuestEdit::SetObjectiveDisplay { objective, .. } => {
                FieldPath::objective(*objective).key("display")
            }
            QuestEdit::SetObjectiveLogic { objective, .. } => {
                FieldPath::objective(*objective).key("logic")
            }
            QuestEdit::SetTargetKind {
                objective, target, ..
            } => FieldPath::target(*objective, *target).key("kind"),
            QuestEdit::SetTargetBlock {
                objective, target, ..
            } => FieldPath::target(*objective, *target).key("block"),
            QuestEdit::SetTargetCount {
                objective, target, ..
            } => FieldPath::target(*objective, *target).key("count"),
            _ => return None,
        };
        Some(path)
    }
}

/// Raw input kept for a field.
///
/// With a message the input could not be committed and is the field's error.
/// Without one the value was committed and the text is kept for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub raw: String,
    pub message: Option<String>,
}

/// Outcome of [`QuestFormSession::begin_submit`].
#[derive(Debug)]
pub enum SubmitAttempt {
    /// Valid; the session is now `Submitting` and `wire` should be sent
    Ready {
        session: QuestFormSession,
        wire: QuestWire,
    },
    /// Not sent; every field is now marked touched so errors show
    Blocked(QuestFormSession),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestFormSession {
    form: QuestForm,
    touched: BTreeSet<FieldPath>,
    drafts: BTreeMap<FieldPath, Draft>,
    objective_keys: Vec<Uuid>,
    target_keys: Vec<Vec<Uuid>>,
    errors: FormErrors,
    status: FormStatus,
}

impl Default for QuestFormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestFormSession {
    /// Session for a new quest.
    pub fn new() -> Self {
        Self::from_form(QuestForm::empty())
    }

    /// Session for editing a fetched quest.
    pub fn from_wire(wire: QuestWire) -> Self {
        Self::from_form(wire_to_form(wire))
    }

    pub fn from_form(form: QuestForm) -> Self {
        let objective_keys = form.objectives.iter().map(|_| Uuid::new_v4()).collect();
        let target_keys = form
            .objectives
            .iter()
            .map(|o| o.targets.iter().map(|_| Uuid::new_v4()).collect())
            .collect();
        let mut session = Self {
            form,
            touched: BTreeSet::new(),
            drafts: BTreeMap::new(),
            objective_keys,
            target_keys,
            errors: FormErrors::new(),
            status: FormStatus::Pristine,
        };
        session.revalidate();
        session
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn form(&self) -> &QuestForm {
        &self.form
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_touched(&self, path: &FieldPath) -> bool {
        self.touched.contains(path)
    }

    pub fn draft(&self, path: &FieldPath) -> Option<&Draft> {
        self.drafts.get(path)
    }

    /// Whether error decoration should show for this field.
    pub fn show_error(&self, path: &FieldPath) -> bool {
        self.is_touched(path) && self.errors.contains(path)
    }

    /// Stable render key of the objective at `index`.
    pub fn objective_key(&self, index: usize) -> Option<Uuid> {
        self.objective_keys.get(index).copied()
    }

    /// Stable render key of a target row.
    pub fn target_key(&self, objective: usize, target: usize) -> Option<Uuid> {
        self.target_keys.get(objective)?.get(target).copied()
    }

    /// Every editable field of the current form.
    pub fn field_paths(&self) -> Vec<FieldPath> {
        let mut paths = vec![
            FieldPath::field("title"),
            FieldPath::field("quest_type"),
            FieldPath::field("description"),
            FieldPath::field("range"),
            FieldPath::field("range").key("start"),
            FieldPath::field("range").key("end"),
            FieldPath::field("tags"),
            FieldPath::field("objectives"),
        ];
        for (i, objective) in self.form.objectives.iter().enumerate() {
            let base = FieldPath::objective(i);
            for key in ["description", "display", "logic", "targets"] {
                paths.push(base.key(key));
            }
            for j in 0..objective.targets.len() {
                let target = FieldPath::target(i, j);
                for key in ["kind", "block", "count"] {
                    paths.push(target.key(key));
                }
            }
        }
        paths
    }

    // -------------------------------------------------------------------------
    // Edits
    // -------------------------------------------------------------------------

    /// Apply one edit and return the next snapshot.
    ///
    /// Edits are ignored while a submission is in flight or after it succeeded.
    /// Edits that point at a missing objective or target change nothing.
    pub fn apply(mut self, edit: QuestEdit) -> Self {
        if !self.status.accepts_edits() {
            tracing::debug!(?edit, status = ?self.status, "Ignoring edit");
            return self;
        }

        if let QuestEdit::Touch(path) = edit {
            self.touched.insert(path);
            return self;
        }

        if let Some(path) = edit.field_path() {
            self.drafts.remove(&path);
        }

        if self.mutate(edit) {
            self.status = FormStatus::Dirty;
            self.revalidate();
        }
        self
    }

    fn mutate(&mut self, edit: QuestEdit) -> bool {
        match edit {
            QuestEdit::SetTitle(title) => self.form.title = title,
            QuestEdit::SetDescription(description) => self.form.description = description,
            QuestEdit::SetQuestType(quest_type) => self.form.quest_type = Some(quest_type),
            QuestEdit::SetTagsText(raw) => {
                self.form.tags = split_tags(&raw);
                self.drafts
                    .insert(FieldPath::field("tags"), Draft { raw, message: None });
            }
            QuestEdit::SetRangeStart(start) => self.form.range.start = start,
            QuestEdit::SetRangeEnd(end) => self.form.range.end = end,

            QuestEdit::AddObjective => {
                self.form.objectives.push(Objective::empty());
                self.objective_keys.push(Uuid::new_v4());
                self.target_keys.push(Vec::new());
            }
            QuestEdit::RemoveObjective(index) => {
                if index >= self.form.objectives.len() {
                    return out_of_range("objective", index);
                }
                self.form.objectives.remove(index);
                self.objective_keys.remove(index);
                self.target_keys.remove(index);
                self.remap(&FieldPath::field("objectives"), |i| removed(i, index));
            }
            QuestEdit::MoveObjective { from, to } => {
                let len = self.form.objectives.len();
                if from >= len || to >= len {
                    return out_of_range("objective", from.max(to));
                }
                move_item(&mut self.form.objectives, from, to);
                move_item(&mut self.objective_keys, from, to);
                move_item(&mut self.target_keys, from, to);
                self.remap(&FieldPath::field("objectives"), |i| {
                    Some(moved(i, from, to))
                });
            }
            QuestEdit::SetObjectiveDescription { objective, value } => {
                let Some(o) = self.form.objectives.get_mut(objective) else {
                    return out_of_range("objective", objective);
                };
                o.description = value;
            }
            QuestEdit::SetObjectiveDisplay { objective, value } => {
                let Some(o) = self.form.objectives.get_mut(objective) else {
                    return out_of_range("objective", objective);
                };
                o.display = value;
            }
            QuestEdit::SetObjectiveLogic { objective, logic } => {
                let Some(o) = self.form.objectives.get_mut(objective) else {
                    return out_of_range("objective", objective);
                };
                o.logic = logic;
            }

            QuestEdit::AddTarget { objective } => {
                let Some(o) = self.form.objectives.get_mut(objective) else {
                    return out_of_range("objective", objective);
                };
                o.targets.push(Target::empty());
                if let Some(keys) = self.target_keys.get_mut(objective) {
                    keys.push(Uuid::new_v4());
                }
            }
            QuestEdit::RemoveTarget { objective, target } => {
                let Some(o) = self.form.objectives.get_mut(objective) else {
                    return out_of_range("objective", objective);
                };
                if target >= o.targets.len() {
                    return out_of_range("target", target);
                }
                o.targets.remove(target);
                if let Some(keys) = self.target_keys.get_mut(objective) {
                    keys.remove(target);
                }
                let targets = FieldPath::objective(objective).key("targets");
                self.remap(&targets, |i| removed(i, target));
            }
            QuestEdit::MoveTarget {
                objective,
                from,
                to,
            } => {
                let Some(o) = self.form.objectives.get_mut(objective) else {
                    return out_of_range("objective", objective);
                };
                let len = o.targets.len();
                if from >= len || to >= len {
                    return out_of_range("target", from.max(to));
                }
                move_item(&mut o.targets, from, to);
                if let Some(keys) = self.target_keys.get_mut(objective) {
                    move_item(keys, from, to);
                }
                let targets = FieldPath::objective(objective).key("targets");
                self.remap(&targets, |i| Some(moved(i, from, to)));
            }
            QuestEdit::SetTargetKind {
                objective,
                target,
                kind,
            } => {
                let Some(t) = self.target_mut(objective, target) else {
                    return out_of_range("target", target);
                };
                t.kind = kind;
            }
            QuestEdit::SetTargetBlock {
                objective,
                target,
                block,
            } => {
                let Some(t) = self.target_mut(objective, target) else {
                    return out_of_range("target", target);
                };
                t.block = block;
            }
            QuestEdit::SetTargetCount {
                objective,
                target,
                count,
            } => {
                let Some(t) = self.target_mut(objective, target) else {
                    return out_of_range("target", target);
                };
                t.count = count;
            }

            QuestEdit::Draft { path, raw, message } => {
                self.drafts.insert(
                    path,
                    Draft {
                        raw,
                        message: Some(message),
                    },
                );
            }
            QuestEdit::Touch(path) => {
                self.touched.insert(path);
                return false;
            }
        }
        true
    }

    fn target_mut(&mut self, objective: usize, target: usize) -> Option<&mut Target> {
        self.form
            .objectives
            .get_mut(objective)?
            .targets
            .get_mut(target)
    }

    /// Carry touched flags and drafts along with the rows they belong to.
    fn remap(&mut self, collection: &FieldPath, map: impl Fn(usize) -> Option<usize>) {
        self.touched = std::mem::take(&mut self.touched)
            .into_iter()
            .filter_map(|path| path.remap_index(collection, &map))
            .collect();
        self.drafts = std::mem::take(&mut self.drafts)
            .into_iter()
            .filter_map(|(path, draft)| Some((path.remap_index(collection, &map)?, draft)))
            .collect();
    }

    fn revalidate(&mut self) {
        let mut errors = FormErrors::new();
        for (path, messages) in validate_form(&self.form).iter() {
            if self.drafts.get(path).is_some_and(|d| d.message.is_some()) {
                continue;
            }
            for message in messages {
                errors.insert(path.clone(), message.clone());
            }
        }
        for (path, draft) in &self.drafts {
            if let Some(message) = &draft.message {
                errors.insert(path.clone(), message.clone());
            }
        }
        self.errors = errors;
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Validate and, if the form is clean, move to `Submitting`.
    pub fn begin_submit(mut self) -> SubmitAttempt {
        if !self.status.accepts_edits() {
            tracing::debug!(status = ?self.status, "Submit ignored");
            return SubmitAttempt::Blocked(self);
        }

        if !self.is_valid() {
            let mut touched = self.field_paths();
            touched.extend(self.errors.paths().cloned());
            self.touched.extend(touched);
            tracing::info!(errors = self.errors.len(), "Submit blocked by validation");
            return SubmitAttempt::Blocked(self);
        }

        let wire = form_to_wire(self.form.clone());
        self.status = FormStatus::Submitting;
        SubmitAttempt::Ready {
            session: self,
            wire,
        }
    }

    /// Record a saved quest. The session takes the server's copy and finishes.
    pub fn submit_succeeded(mut self, saved: QuestWire) -> Self {
        self.form = wire_to_form(saved);
        self.drafts.clear();
        self.sync_keys();
        self.revalidate();
        self.status = FormStatus::Submitted;
        self
    }

    /// Record a failed save. Everything entered is kept for a retry.
    pub fn submit_failed(mut self, message: impl Into<String>) -> Self {
        self.status = FormStatus::Error(message.into());
        self
    }

    /// Fold the result of a save request into the session.
    pub fn finish_submit(self, result: Result<QuestWire, ServiceError>) -> Self {
        match result {
            Ok(saved) => {
                tracing::info!(quest_id = ?saved.id, "Quest saved");
                self.submit_succeeded(saved)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Quest save failed");
                self.submit_failed(e.to_string())
            }
        }
    }

    fn sync_keys(&mut self) {
        let objectives = &self.form.objectives;
        self.objective_keys.resize_with(objectives.len(), Uuid::new_v4);
        self.target_keys.resize_with(objectives.len(), Vec::new);
        for (keys, objective) in self.target_keys.iter_mut().zip(objectives) {
            keys.resize_with(objective.targets.len(), Uuid::new_v4);
        }
    }
}

/// Validate, save through `quests`, and return the resulting session.
///
/// A form that fails validation is returned blocked without any request.
pub async fn submit_quest(session: QuestFormSession, quests: &QuestService) -> QuestFormSession {
    match session.begin_submit() {
        SubmitAttempt::Blocked(session) => session,
        SubmitAttempt::Ready { session, wire } => {
            let result = quests.save_quest(&wire).await;
            session.finish_submit(result)
        }
    }
}

fn out_of_range(what: &str, index: usize) -> bool {
    tracing::warn!(index, "Edit refers to a missing {}", what);
    false
}

fn removed(index: usize, gone: usize) -> Option<usize> {
    match index.cmp(&gone) {
        std::cmp::Ordering::Less => Some(index),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(index - 1),
    }
}

fn moved(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < to && index > from && index <= to {
        index - 1
    } else if to < from && index >= to && index < from {
        index + 1
    } else {
        index
    }
}

fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::api::Api;
    use crate::application::query::QueryClient;
    use crate::infrastructure::platform::mock::ManualTimeProvider;
    use crate::infrastructure::testing::fixtures::{api_request_failed, valid_quest_wire};
    use crate::ports::outbound::MockRawApiPort;
    use std::sync::Arc;

    fn quest_service(raw: MockRawApiPort) -> QuestService {
        let time = Arc::new(ManualTimeProvider::new(0));
        QuestService::new(Api::new(Arc::new(raw)), QueryClient::new(time))
    }

    fn title() -> FieldPath {
        FieldPath::field("title")
    }

    #[test]
    fn new_session_is_pristine_and_quiet() {
        let session = QuestFormSession::new();

        assert_eq!(session.status(), &FormStatus::Pristine);
        assert!(!session.is_valid());
        assert!(session.errors().contains(&title()));
        assert!(!session.show_error(&title()));
    }

    #[test]
    fn edit_marks_dirty_and_revalidates() {
        let session = QuestFormSession::new().apply(QuestEdit::SetTitle("Diamond Rush".into()));

        assert_eq!(session.status(), &FormStatus::Dirty);
        assert!(!session.errors().contains(&title()));
    }

    #[test]
    fn error_shows_only_once_touched() {
        let session = QuestFormSession::from_wire(valid_quest_wire())
            .apply(QuestEdit::SetTitle("   ".into()));
        assert!(session.errors().contains(&title()));
        assert!(!session.show_error(&title()));

        let session = session.apply(QuestEdit::Touch(title()));
        assert!(session.show_error(&title()));
    }

    #[tokio::test]
    async fn empty_title_blocks_submit_without_request() {
        // No expectations: any API call would panic.
        let quests = quest_service(MockRawApiPort::new());
        let mut wire = valid_quest_wire();
        wire.title = String::new();

        let session = submit_quest(QuestFormSession::from_wire(wire), &quests).await;

        assert_eq!(session.status(), &FormStatus::Pristine);
        assert_eq!(session.errors().get(&title()), ["This field is required"]);
        assert!(session.show_error(&title()));
    }

    #[tokio::test]
    async fn valid_submit_posts_and_finishes() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| path == "/quests" && body["start_time"] == "2024-01-01T00:00:00Z")
            .times(1)
            .returning(|_, body| {
                let mut saved = body.clone();
                saved["id"] = "q1".into();
                Ok(saved)
            });
        let quests = quest_service(raw);

        let session = submit_quest(QuestFormSession::from_wire(valid_quest_wire()), &quests).await;

        assert_eq!(session.status(), &FormStatus::Submitted);
        assert_eq!(session.form().id.as_deref(), Some("q1"));

        let after = session.clone().apply(QuestEdit::SetTitle("changed".into()));
        assert_eq!(after, session);
    }

    #[test]
    fn submitting_session_rejects_second_submit_and_edits() {
        let SubmitAttempt::Ready { session, .. } =
            QuestFormSession::from_wire(valid_quest_wire()).begin_submit()
        else {
            panic!("valid form should be ready");
        };
        assert!(session.status().is_submitting());
        assert!(!session.status().accepts_edits());

        let session = session.apply(QuestEdit::AddObjective);
        assert_eq!(session.form().objectives.len(), 2);
        assert!(matches!(session.begin_submit(), SubmitAttempt::Blocked(_)));
    }

    #[test]
    fn failed_submit_keeps_input_and_recovers() {
        let SubmitAttempt::Ready { session, .. } = QuestFormSession::from_wire(valid_quest_wire())
            .apply(QuestEdit::SetTitle("Emerald Rush".into()))
            .begin_submit()
        else {
            panic!("valid form should be ready");
        };

        let session = session.finish_submit(Err(api_request_failed("offline").into()));
        assert_eq!(
            session.status(),
            &FormStatus::Error("Request failed: offline".into())
        );
        assert_eq!(session.form().title, "Emerald Rush");

        let session = session.apply(QuestEdit::SetDescription("retry".into()));
        assert_eq!(session.status(), &FormStatus::Dirty);
        assert!(matches!(session.begin_submit(), SubmitAttempt::Ready { .. }));
    }

    #[test]
    fn removing_objective_keeps_siblings_and_their_targets() {
        let session = QuestFormSession::from_wire(valid_quest_wire()).apply(QuestEdit::AddObjective);
        let first = session.form().objectives[0].clone();
        let (first_key, last_key) = (session.objective_key(0), session.objective_key(2));
        let touched = FieldPath::objective(2).key("description");
        let session = session.apply(QuestEdit::Touch(touched));

        let session = session.apply(QuestEdit::RemoveObjective(1));

        let objectives = &session.form().objectives;
        assert_eq!(objectives.len(), 2);
        assert_eq!(objectives[0], first);
        assert_eq!(objectives[1], Objective::empty());
        assert_eq!(session.objective_key(0), first_key);
        assert_eq!(session.objective_key(1), last_key);
        assert!(session.is_touched(&FieldPath::objective(1).key("description")));
        assert!(!session.is_touched(&FieldPath::objective(2).key("description")));
    }

    #[test]
    fn added_objective_starts_empty() {
        let session = QuestFormSession::new().apply(QuestEdit::AddObjective);

        let objective = &session.form().objectives[0];
        assert_eq!(objective.logic, LogicMode::And);
        assert!(objective.targets.is_empty());
        assert_eq!(
            session.errors().get(&FieldPath::objective(0).key("targets")),
            ["Add at least one target"]
        );
    }

    #[test]
    fn moving_target_carries_keys_and_drafts() {
        let session = QuestFormSession::from_wire(valid_quest_wire());
        let key = session.target_key(0, 0);
        let count = FieldPath::target(0, 0).key("count");
        let session = session
            .apply(QuestEdit::Draft {
                path: count,
                raw: "lots".into(),
                message: "Must be a whole number".into(),
            })
            .apply(QuestEdit::MoveTarget {
                objective: 0,
                from: 0,
                to: 1,
            });

        let moved_count = FieldPath::target(0, 1).key("count");
        assert_eq!(session.target_key(0, 1), key);
        assert_eq!(session.form().objectives[0].targets[1].block, "minecraft:diamond_ore");
        assert_eq!(session.draft(&moved_count).map(|d| d.raw.as_str()), Some("lots"));
        assert_eq!(session.errors().get(&moved_count), ["Must be a whole number"]);
    }

    #[test]
    fn committing_a_value_clears_the_draft() {
        let count = FieldPath::target(0, 0).key("count");
        let session = QuestFormSession::from_wire(valid_quest_wire())
            .apply(QuestEdit::Draft {
                path: count.clone(),
                raw: "x".into(),
                message: "Must be a whole number".into(),
            })
            .apply(QuestEdit::SetTargetCount {
                objective: 0,
                target: 0,
                count: Some(5),
            });

        assert!(session.draft(&count).is_none());
        assert!(session.is_valid());
    }

    #[test]
    fn out_of_range_edit_changes_nothing() {
        let session = QuestFormSession::from_wire(valid_quest_wire());
        let after = session.clone().apply(QuestEdit::RemoveTarget {
            objective: 5,
            target: 0,
        });

        assert_eq!(after, session);
    }

    #[test]
    fn index_maps() {
        assert_eq!(removed(0, 1), Some(0));
        assert_eq!(removed(1, 1), None);
        assert_eq!(removed(2, 1), Some(1));

        let order: Vec<usize> = (0..4).map(|i| moved(i, 0, 2)).collect();
        assert_eq!(order, [2, 0, 1, 3]);
        let order: Vec<usize> = (0..4).map(|i| moved(i, 3, 1)).collect();
        assert_eq!(order, [0, 2, 3, 1]);
    }
}
