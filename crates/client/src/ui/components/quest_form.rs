//! Quest editor - admin form for creating and editing quests

use dioxus::prelude::*;

use crate::application::form::{
    DescriptionField, FormStatus, ObjectiveDescriptionField, ObjectiveDisplayField,
    ObjectiveLogicField, QuestEdit, QuestFormSession, QuestTypeField, RangeEndField,
    RangeStartField, SubmitAttempt, TagsField, TargetBlockField, TargetCountField,
    TargetKindField, TitleField,
};
use crate::ui::components::fields::{select_input, text_area, text_input, update_session};
use crate::ui::hooks::use_quest;
use crate::ui::services::use_quest_service;
use crate::ui::use_platform;
use blockhaven_domain::FieldPath;

const BUTTON_CLASS: &str =
    "px-3 py-1 bg-white/5 hover:bg-white/10 rounded-lg text-gray-300 text-sm transition-colors";

#[derive(Props, Clone, PartialEq)]
pub struct QuestEditorProps {
    /// Quest to edit; `None` starts a new one
    #[props(default)]
    pub quest_id: Option<String>,
    pub on_close: EventHandler<()>,
}

#[component]
pub fn QuestEditor(props: QuestEditorProps) -> Element {
    match props.quest_id.clone() {
        Some(id) => rsx! { ExistingQuestEditor { quest_id: id, on_close: props.on_close } },
        None => rsx! { QuestFormView { initial: QuestFormSession::new(), on_close: props.on_close } },
    }
}

#[component]
fn ExistingQuestEditor(quest_id: String, on_close: EventHandler<()>) -> Element {
    let quest = use_quest(quest_id.clone());
    let state = quest.read();

    if let Some(error) = &state.error {
        return rsx! {
            div { class: "p-3 bg-red-500/20 border border-red-500/30 rounded-lg text-red-400 text-sm",
                "Could not load quest: {error}"
            }
        };
    }

    match state.data.clone() {
        None => rsx! {
            div { class: "flex items-center justify-center py-12",
                span { class: "text-gray-400", "Loading..." }
            }
        },
        Some(None) => rsx! {
            div { class: "p-3 text-gray-400 text-sm", "Quest {quest_id} no longer exists." }
        },
        Some(Some(wire)) => rsx! {
            QuestFormView { initial: QuestFormSession::from_wire(wire), on_close }
        },
    }
}

#[component]
fn QuestFormView(initial: QuestFormSession, on_close: EventHandler<()>) -> Element {
    let session = use_signal(move || initial);
    let quests = use_quest_service();

    let on_submit = move |_: MouseEvent| {
        let attempt = session.peek().clone().begin_submit();
        match attempt {
            SubmitAttempt::Blocked(next) => update_session(session, |_| next),
            SubmitAttempt::Ready { session: next, wire } => {
                update_session(session, |_| next);
                let quests = quests.clone();
                spawn(async move {
                    let result = quests.save_quest(&wire).await;
                    update_session(session, |s| s.finish_submit(result));
                });
            }
        }
    };

    let quests_for_delete = use_quest_service();
    let on_delete = move |_: MouseEvent| {
        let Some(id) = session.peek().form().id.clone() else {
            return;
        };
        let quests = quests_for_delete.clone();
        spawn(async move {
            match quests.delete_quest(&id).await {
                Ok(()) => on_close.call(()),
                Err(e) => update_session(session, |s| s.submit_failed(e.to_string())),
            }
        });
    };

    let current = session.read();
    let status = current.status().clone();
    let objective_count = current.form().objectives.len();
    let objectives_error = current
        .errors()
        .get(&FieldPath::field("objectives"))
        .first()
        .cloned()
        .filter(|_| current.is_touched(&FieldPath::field("objectives")));
    let is_existing = current.form().id.is_some();
    let title = if is_existing {
        "Edit Quest"
    } else {
        "New Quest"
    };
    let submit_disabled = !current.status().accepts_edits();
    drop(current);

    rsx! {
        div {
            class: "quest-form flex flex-col h-full bg-dark-surface rounded-lg overflow-hidden",

            div {
                class: "p-4 border-b border-white/10 flex justify-between items-center",
                h2 { class: "text-lg font-bold text-white m-0", "{title}" }
                button { class: BUTTON_CLASS, onclick: move |_| on_close.call(()), "x" }
            }

            div {
                class: "flex-1 overflow-y-auto p-4 space-y-4",

                {status_banner(&status)}

                {text_input(TitleField, session, "Title *", "text")}
                {select_input(QuestTypeField, session, "Type *")}
                {text_area(DescriptionField, session, "Description")}

                div {
                    class: "grid grid-cols-2 gap-4",
                    {text_input(RangeStartField, session, "Starts (UTC) *", "datetime-local")}
                    {text_input(RangeEndField, session, "Ends (UTC) *", "datetime-local")}
                }

                {text_input(TagsField, session, "Tags (comma separated)", "text")}

                div {
                    class: "flex justify-between items-center",
                    h3 { class: "text-sm font-bold text-gray-300 m-0", "Objectives" }
                    button {
                        class: BUTTON_CLASS,
                        onclick: move |_| update_session(session, |s| s.apply(QuestEdit::AddObjective)),
                        "+ Add objective"
                    }
                }
                if let Some(message) = objectives_error {
                    p { class: "text-xs text-red-400", "{message}" }
                }
                for index in 0..objective_count {
                    ObjectiveCard {
                        key: "{objective_row_key(&session.read(), index)}",
                        session,
                        objective: index,
                        last: index + 1 == objective_count,
                    }
                }
            }

            div {
                class: "p-4 border-t border-white/10 flex justify-end gap-2",
                if is_existing {
                    button {
                        class: "px-3 py-1 bg-red-500/20 hover:bg-red-500/30 rounded-lg text-red-400 text-sm mr-auto",
                        disabled: submit_disabled,
                        onclick: on_delete,
                        "Delete"
                    }
                }
                button { class: BUTTON_CLASS, onclick: move |_| on_close.call(()), "Cancel" }
                button {
                    class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-500 disabled:opacity-50 rounded-lg text-white text-sm",
                    disabled: submit_disabled,
                    onclick: on_submit,
                    if status.is_submitting() { "Saving..." } else { "Save quest" }
                }
            }
        }
    }
}

fn objective_row_key(session: &QuestFormSession, index: usize) -> String {
    session
        .objective_key(index)
        .map(|k| k.to_string())
        .unwrap_or_else(|| format!("objective-{index}"))
}

fn status_banner(status: &FormStatus) -> Element {
    match status {
        FormStatus::Error(message) => rsx! {
            div {
                class: "p-3 bg-red-500/20 border border-red-500/30 rounded-lg text-red-400 text-sm",
                "Save failed: {message}. Your changes are kept; try again."
            }
        },
        FormStatus::Submitted => rsx! {
            div {
                class: "p-3 bg-green-500/20 border border-green-500/30 rounded-lg text-green-400 text-sm",
                "Quest saved."
            }
        },
        _ => rsx! {},
    }
}

#[component]
fn ObjectiveCard(session: Signal<QuestFormSession>, objective: usize, last: bool) -> Element {
    let current = session.read();
    let target_count = current
        .form()
        .objectives
        .get(objective)
        .map_or(0, |o| o.targets.len());
    let targets_path = FieldPath::objective(objective).key("targets");
    let targets_error = current
        .errors()
        .get(&targets_path)
        .first()
        .cloned()
        .filter(|_| current.is_touched(&targets_path));
    let target_keys: Vec<String> = (0..target_count)
        .map(|t| {
            current
                .target_key(objective, t)
                .map(|k| k.to_string())
                .unwrap_or_else(|| format!("target-{objective}-{t}"))
        })
        .collect();
    drop(current);

    rsx! {
        div {
            class: "p-3 bg-black/20 border border-white/10 rounded-lg space-y-3",

            div {
                class: "flex justify-between items-center",
                span { class: "text-xs text-gray-500", "Objective {objective + 1}" }
                div {
                    class: "flex gap-1",
                    button {
                        class: BUTTON_CLASS,
                        disabled: objective == 0,
                        onclick: move |_| update_session(session, |s| s.apply(QuestEdit::MoveObjective { from: objective, to: objective - 1 })),
                        "Up"
                    }
                    button {
                        class: BUTTON_CLASS,
                        disabled: last,
                        onclick: move |_| update_session(session, |s| s.apply(QuestEdit::MoveObjective { from: objective, to: objective + 1 })),
                        "Down"
                    }
                    button {
                        class: BUTTON_CLASS,
                        onclick: move |_| update_session(session, |s| s.apply(QuestEdit::RemoveObjective(objective))),
                        "Remove"
                    }
                }
            }

            {text_input(ObjectiveDescriptionField { objective }, session, "Description *", "text")}
            {text_input(ObjectiveDisplayField { objective }, session, "Display text", "text")}
            {select_input(ObjectiveLogicField { objective }, session, "Completion logic")}

            div {
                class: "flex justify-between items-center",
                span { class: "text-xs text-gray-400", "Targets" }
                button {
                    class: BUTTON_CLASS,
                    onclick: move |_| update_session(session, |s| s.apply(QuestEdit::AddTarget { objective })),
                    "+ Add target"
                }
            }
            if let Some(message) = targets_error {
                p { class: "text-xs text-red-400", "{message}" }
            }
            for (target, key) in target_keys.into_iter().enumerate() {
                TargetRow {
                    key: "{key}",
                    session,
                    objective,
                    target,
                    last: target + 1 == target_count,
                }
            }
        }
    }
}

#[component]
fn TargetRow(
    session: Signal<QuestFormSession>,
    objective: usize,
    target: usize,
    last: bool,
) -> Element {
    let platform = use_platform();
    // Picked once per mounted row; never written into the form.
    let hint = use_hook(move || TargetCountField::random_hint(platform.random().as_ref()));
    let count = TargetCountField::new(objective, target).with_hint(hint);

    rsx! {
        div {
            class: "grid grid-cols-4 gap-2 items-end",
            {select_input(TargetKindField { objective, target }, session, "Action")}
            {select_input(TargetBlockField { objective, target }, session, "Block")}
            {text_input(count, session, "Count *", "number")}
            div {
                class: "flex gap-1 pb-1",
                button {
                    class: BUTTON_CLASS,
                    disabled: target == 0,
                    onclick: move |_| update_session(session, |s| s.apply(QuestEdit::MoveTarget { objective, from: target, to: target - 1 })),
                    "Up"
                }
                button {
                    class: BUTTON_CLASS,
                    disabled: last,
                    onclick: move |_| update_session(session, |s| s.apply(QuestEdit::MoveTarget { objective, from: target, to: target + 1 })),
                    "Down"
                }
                button {
                    class: BUTTON_CLASS,
                    onclick: move |_| update_session(session, |s| s.apply(QuestEdit::RemoveTarget { objective, target })),
                    "Remove"
                }
            }
        }
    }
}
