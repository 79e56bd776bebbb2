//! Server dashboard panels.
//!
//! Each panel owns its polling hook, so unmounting the dashboard stops every
//! refetch loop.

use dioxus::prelude::*;

use crate::application::dto::Backup;
use crate::application::query::QueryState;
use crate::ui::hooks::{use_backups, use_players_online, use_playtime, use_server_status};

const PANEL_CLASS: &str = "p-4 bg-dark-surface border border-white/10 rounded-lg";

#[component]
pub fn ServerDashboard(map_url: String) -> Element {
    rsx! {
        div {
            class: "grid grid-cols-1 md:grid-cols-2 gap-4",
            StatusPanel {}
            PlayersPanel {}
            BackupsPanel {}
            PlaytimePanel {}
            div {
                class: PANEL_CLASS,
                h3 { class: "text-sm font-bold text-gray-300 m-0 mb-2", "Live map" }
                a {
                    class: "text-indigo-400 hover:text-indigo-300 text-sm",
                    href: "{map_url}",
                    target: "_blank",
                    "Open the world map"
                }
            }
        }
    }
}

/// Loading and error fallbacks shared by the panels. `None` means data is ready.
fn fallback<T>(state: &QueryState<T>) -> Option<Element> {
    if state.has_data() {
        return None;
    }
    if let Some(error) = &state.error {
        return Some(rsx! {
            p { class: "text-sm text-red-400", "Unavailable: {error}" }
        });
    }
    Some(rsx! {
        p { class: "text-sm text-gray-500", "Loading..." }
    })
}

#[component]
fn StatusPanel() -> Element {
    let status = use_server_status();
    let state = status.read();

    rsx! {
        div {
            class: PANEL_CLASS,
            h3 { class: "text-sm font-bold text-gray-300 m-0 mb-2", "Server" }
            if let Some(fallback) = fallback(&state) {
                {fallback}
            } else if let Some(status) = &state.data {
                div {
                    class: "space-y-1 text-sm",
                    if status.online {
                        p { class: "text-green-400", "Online" }
                    } else {
                        p { class: "text-red-400", "Offline" }
                    }
                    p { class: "text-gray-400", "Players: {status.occupancy()}" }
                    if !status.version.is_empty() {
                        p { class: "text-gray-400", "Version: {status.version}" }
                    }
                    if let Some(tps) = status.tps {
                        p { class: "text-gray-400", "TPS: {tps:.1}" }
                    }
                    if !status.motd.is_empty() {
                        p { class: "text-gray-500 italic", "{status.motd}" }
                    }
                }
            }
        }
    }
}

#[component]
fn PlayersPanel() -> Element {
    let players = use_players_online();
    let state = players.read();

    rsx! {
        div {
            class: PANEL_CLASS,
            h3 { class: "text-sm font-bold text-gray-300 m-0 mb-2", "Online now" }
            if let Some(fallback) = fallback(&state) {
                {fallback}
            } else if let Some(online) = &state.data {
                if online.players.is_empty() {
                    p { class: "text-sm text-gray-500", "Nobody is online." }
                }
                ul {
                    class: "space-y-1 text-sm text-gray-300",
                    for player in online.players.iter() {
                        li { key: "{player.uuid}", "{player.name}" }
                    }
                }
            }
        }
    }
}

#[component]
fn BackupsPanel() -> Element {
    let backups = use_backups();
    let state = backups.read();

    rsx! {
        div {
            class: PANEL_CLASS,
            h3 { class: "text-sm font-bold text-gray-300 m-0 mb-2", "Backups" }
            if let Some(fallback) = fallback(&state) {
                {fallback}
            } else if let Some(backups) = &state.data {
                ul {
                    class: "space-y-1 text-sm text-gray-300",
                    for backup in backups.iter() {
                        li {
                            key: "{backup.id}",
                            class: "flex justify-between",
                            span { "{backup.name}" }
                            span { class: "text-gray-500",
                                "{backup_when(backup)} · {backup.size_label()}"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn backup_when(backup: &Backup) -> String {
    backup.created_at.format("%Y-%m-%d %H:%M").to_string()
}

#[component]
fn PlaytimePanel() -> Element {
    let playtime = use_playtime();
    let state = playtime.read();

    rsx! {
        div {
            class: PANEL_CLASS,
            h3 { class: "text-sm font-bold text-gray-300 m-0 mb-2", "Play time" }
            if let Some(fallback) = fallback(&state) {
                {fallback}
            } else if let Some(entries) = &state.data {
                ul {
                    class: "space-y-1 text-sm text-gray-300",
                    for entry in entries.iter() {
                        li {
                            key: "{entry.uuid}",
                            class: "flex justify-between",
                            span { "{entry.name}" }
                            span { class: "text-gray-500", "{entry.hours_label()}" }
                        }
                    }
                }
            }
        }
    }
}
