use dioxus::prelude::*;

use crate::ui::hooks::use_quests;

#[component]
pub fn QuestList(on_select: EventHandler<Option<String>>) -> Element {
    let quests = use_quests();
    let state = quests.read();

    rsx! {
        div {
            class: "flex flex-col gap-2",

            div {
                class: "flex justify-between items-center",
                h2 { class: "text-lg font-bold text-white m-0", "Quests" }
                button {
                    class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-500 rounded-lg text-white text-sm",
                    onclick: move |_| on_select.call(None),
                    "+ New quest"
                }
            }

            if let Some(error) = &state.error {
                if error.is_unauthorized() {
                    p { class: "text-sm text-yellow-400", "Sign in to manage quests." }
                } else {
                    p { class: "text-sm text-red-400", "Could not load quests: {error}" }
                }
            }

            if state.is_loading && !state.has_data() {
                p { class: "text-sm text-gray-500", "Loading..." }
            } else if let Some(quests) = &state.data {
                if quests.is_empty() {
                    p { class: "text-sm text-gray-500", "No quests yet." }
                }
                for quest in quests.iter().filter(|q| q.id.is_some()) {
                    QuestRow {
                        key: "{quest.id.clone().unwrap_or_default()}",
                        id: quest.id.clone().unwrap_or_default(),
                        title: quest.title.clone(),
                        quest_type: quest.quest_type.map(|t| t.to_string()).unwrap_or_default(),
                        on_select,
                    }
                }
            }
        }
    }
}

#[component]
fn QuestRow(
    id: String,
    title: String,
    quest_type: String,
    on_select: EventHandler<Option<String>>,
) -> Element {
    rsx! {
        button {
            class: "w-full text-left p-3 bg-dark-surface border border-white/10 hover:border-indigo-500/50 rounded-lg flex justify-between",
            onclick: move |_| on_select.call(Some(id.clone())),
            span { class: "text-white", "{title}" }
            span { class: "text-xs text-gray-500 uppercase", "{quest_type}" }
        }
    }
}
