//! Input controls driven by field bindings.
//!
//! Every control reads a [`FieldHandle`] from the session signal and writes
//! back through `handle_change` / `handle_blur`, replacing the snapshot.

use dioxus::prelude::*;

use crate::application::form::{ChoiceBinding, FieldBinding, FieldHandle, QuestFormSession};

const INPUT_CLASS: &str = "w-full px-3 py-2 bg-black/30 border border-white/10 rounded-lg text-white placeholder-gray-500 focus:outline-none focus:border-indigo-500/50";
const INPUT_ERROR_CLASS: &str = "w-full px-3 py-2 bg-black/30 border border-red-500/60 rounded-lg text-white placeholder-gray-500 focus:outline-none";

/// Replace the session snapshot with `f(snapshot)`.
pub fn update_session(
    mut session: Signal<QuestFormSession>,
    f: impl FnOnce(QuestFormSession) -> QuestFormSession,
) {
    session.with_mut(|current| *current = f(std::mem::take(current)));
}

fn input_class<V>(handle: &FieldHandle<V>) -> &'static str {
    if handle.show_error() {
        INPUT_ERROR_CLASS
    } else {
        INPUT_CLASS
    }
}

fn field_errors<V>(handle: &FieldHandle<V>) -> Element {
    if !handle.show_error() {
        return rsx! {};
    }
    rsx! {
        for message in handle.errors.iter() {
            p { class: "mt-1 text-xs text-red-400", "{message}" }
        }
    }
}

/// Single-line text input. `kind` is the HTML input type.
pub fn text_input<B>(
    binding: B,
    session: Signal<QuestFormSession>,
    label: &str,
    kind: &'static str,
) -> Element
where
    B: FieldBinding + Copy + 'static,
{
    let handle = binding.read(&session.read());
    let placeholder = handle.placeholder.clone().unwrap_or_default();

    rsx! {
        div {
            class: "form-group",
            label { class: "block text-sm font-medium text-gray-400 mb-1", "{label}" }
            input {
                class: input_class(&handle),
                r#type: kind,
                value: "{handle.raw}",
                placeholder: "{placeholder}",
                oninput: move |e| update_session(session, |s| binding.handle_change(s, &e.value())),
                onblur: move |_| update_session(session, |s| binding.handle_blur(s)),
            }
            {field_errors(&handle)}
        }
    }
}

pub fn text_area<B>(binding: B, session: Signal<QuestFormSession>, label: &str) -> Element
where
    B: FieldBinding + Copy + 'static,
{
    let handle = binding.read(&session.read());

    rsx! {
        div {
            class: "form-group",
            label { class: "block text-sm font-medium text-gray-400 mb-1", "{label}" }
            textarea {
                class: input_class(&handle),
                rows: "3",
                value: "{handle.raw}",
                oninput: move |e| update_session(session, |s| binding.handle_change(s, &e.value())),
                onblur: move |_| update_session(session, |s| binding.handle_blur(s)),
            }
            {field_errors(&handle)}
        }
    }
}

/// Drop-down limited to the binding's option set.
pub fn select_input<B>(binding: B, session: Signal<QuestFormSession>, label: &str) -> Element
where
    B: ChoiceBinding + Copy + 'static,
{
    let handle = binding.read(&session.read());
    let options = binding.options();

    rsx! {
        div {
            class: "form-group",
            label { class: "block text-sm font-medium text-gray-400 mb-1", "{label}" }
            select {
                class: input_class(&handle),
                value: "{handle.raw}",
                onchange: move |e| update_session(session, |s| binding.handle_change(s, &e.value())),
                onblur: move |_| update_session(session, |s| binding.handle_blur(s)),
                if handle.raw.is_empty() {
                    option { value: "", disabled: true, selected: true, "Choose..." }
                }
                for opt in options {
                    option {
                        value: "{opt.value}",
                        selected: opt.value == handle.raw,
                        "{opt.label}"
                    }
                }
            }
            {field_errors(&handle)}
        }
    }
}
