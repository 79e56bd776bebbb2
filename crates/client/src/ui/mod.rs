use dioxus::prelude::*;
use uuid::Uuid;

use crate::application::auth::{AuthSession, AuthState};
use crate::state::Platform;

pub mod components;
pub mod hooks;
pub mod services;

pub use services::Services;

use components::{QuestEditor, QuestList, ServerDashboard};
use services::use_auth_session;

/// Hook to access the Platform from Dioxus context
pub fn use_platform() -> Platform {
    use_context::<Platform>()
}

/// Top-level page selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum View {
    #[default]
    Dashboard,
    Quests,
    /// `None` edits a new quest
    Editor(Option<String>),
}

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    let auth = use_auth_session();
    let map_url = use_context::<Services>().map_url;
    let auth_state = use_signal(move || complete_redirect_sign_in(&auth));
    let mut view = use_signal(View::default);

    rsx! {
        document::Stylesheet { href: asset!("/assets/main.css") }

        div {
            class: "min-h-screen bg-dark-bg text-white",

            header {
                class: "px-6 py-3 border-b border-white/10 flex items-center gap-4",
                h1 { class: "text-xl font-bold m-0 mr-4", "BlockHaven" }
                NavButton { label: "Dashboard", active: *view.read() == View::Dashboard, onclick: move |_| view.set(View::Dashboard) }
                NavButton { label: "Quests", active: *view.read() != View::Dashboard, onclick: move |_| view.set(View::Quests) }
                div { class: "flex-1" }
                AccountMenu { state: auth_state }
            }

            main {
                class: "p-6 max-w-5xl mx-auto",
                {match view.read().clone() {
                    View::Dashboard => rsx! { ServerDashboard { map_url: map_url.clone() } },
                    View::Quests => rsx! {
                        QuestList { on_select: move |id| view.set(View::Editor(id)) }
                    },
                    View::Editor(id) => rsx! {
                        QuestEditor {
                            key: "{id.clone().unwrap_or_default()}",
                            quest_id: id,
                            on_close: move |_| view.set(View::Quests),
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn NavButton(label: String, active: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let class = if active {
        "px-3 py-1 rounded-lg text-sm bg-indigo-600 text-white"
    } else {
        "px-3 py-1 rounded-lg text-sm text-gray-400 hover:text-white"
    };
    rsx! {
        button { class, onclick: move |e| onclick.call(e), "{label}" }
    }
}

#[component]
fn AccountMenu(mut state: Signal<AuthState>) -> Element {
    let auth = use_auth_session();
    // One state value per mount; it is stored as pending and checked on return.
    let sign_in = use_hook({
        let auth = auth.clone();
        move || match auth.sign_in_url(&Uuid::new_v4().to_string()) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                tracing::debug!("Sign-in link unavailable: {}", e);
                None
            }
        }
    });

    let current = state.read().clone();
    match current {
        AuthState::SignedIn { user, .. } => rsx! {
            span { class: "text-sm text-gray-400", "{user}" }
            button {
                class: "px-3 py-1 bg-white/5 hover:bg-white/10 rounded-lg text-gray-300 text-sm",
                onclick: move |_| {
                    auth.sign_out();
                    state.set(AuthState::SignedOut);
                },
                "Sign out"
            }
        },
        AuthState::SignedOut => match sign_in {
            Some(href) => rsx! {
                a {
                    class: "px-3 py-1 bg-indigo-600 hover:bg-indigo-500 rounded-lg text-white text-sm",
                    href: "{href}",
                    "Sign in"
                }
            },
            None => rsx! {},
        },
    }
}

/// Finish a provider redirect if the page was loaded from one.
#[cfg(target_arch = "wasm32")]
fn complete_redirect_sign_in(auth: &AuthSession) -> AuthState {
    let Some(window) = web_sys::window() else {
        return auth.state();
    };
    let Ok(href) = window.location().href() else {
        return auth.state();
    };
    if !href.contains("access_token=") && !href.contains("error=") {
        return auth.state();
    }

    let state = match auth.complete_sign_in(&href) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!("Sign-in failed: {}", e);
            auth.state()
        }
    };

    // Drop the token from the address bar.
    if let (Ok(history), Ok(path)) = (window.history(), window.location().pathname()) {
        let _ = history.replace_state_with_url(&web_sys::wasm_bindgen::JsValue::NULL, "", Some(&path));
    }
    state
}

#[cfg(not(target_arch = "wasm32"))]
fn complete_redirect_sign_in(auth: &AuthSession) -> AuthState {
    auth.state()
}
