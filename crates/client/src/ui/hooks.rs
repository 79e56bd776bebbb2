//! Data hooks: reactive views over the query cache.
//!
//! Each hook returns a signal holding a [`QueryState`]. Polling hooks run the
//! service's watch stream inside `use_future`, so the stream is dropped and
//! polling stops when the component unmounts.

use std::future::Future;

use blockhaven_domain::QuestWire;
use dioxus::prelude::*;
use futures_util::{Stream, StreamExt};

use crate::application::dto::{Backup, PlayersOnline, PlaytimeEntry, ServerStatus};
use crate::application::query::QueryState;
use crate::application::ServiceError;
use crate::ui::services::{use_quest_service, use_server_service};

/// Mirror a stream of query states into a signal for as long as the caller is mounted.
fn use_watch<T, S, F>(mut make_stream: F) -> Signal<QueryState<T>>
where
    T: 'static,
    S: Stream<Item = QueryState<T>> + 'static,
    F: FnMut() -> S + 'static,
{
    let mut state = use_signal(QueryState::<T>::loading);
    use_future(move || {
        let stream = make_stream();
        async move {
            futures_util::pin_mut!(stream);
            while let Some(next) = stream.next().await {
                state.set(next);
            }
        }
    });
    state
}

/// Run one fetch on mount and fold its result into a signal.
fn use_fetch<T, F, Fut>(mut fetch: F) -> Signal<QueryState<T>>
where
    T: 'static,
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = Result<T, ServiceError>> + 'static,
{
    let mut state = use_signal(QueryState::<T>::loading);
    use_future(move || {
        let request = fetch();
        async move {
            let result = request.await;
            state.with_mut(|current| *current = std::mem::take(current).resolve(result));
        }
    });
    state
}

pub fn use_server_status() -> Signal<QueryState<ServerStatus>> {
    let server = use_server_service();
    use_watch(move || server.watch_status())
}

pub fn use_players_online() -> Signal<QueryState<PlayersOnline>> {
    let server = use_server_service();
    use_watch(move || server.watch_players())
}

pub fn use_backups() -> Signal<QueryState<Vec<Backup>>> {
    let server = use_server_service();
    use_watch(move || server.watch_backups())
}

pub fn use_playtime() -> Signal<QueryState<Vec<PlaytimeEntry>>> {
    let server = use_server_service();
    use_watch(move || server.watch_playtime())
}

pub fn use_quests() -> Signal<QueryState<Vec<QuestWire>>> {
    let quests = use_quest_service();
    use_fetch(move || {
        let quests = quests.clone();
        async move { quests.list_quests().await }
    })
}

/// `data` is `Some(None)` when the server does not know `id`.
pub fn use_quest(id: String) -> Signal<QueryState<Option<QuestWire>>> {
    let quests = use_quest_service();
    use_fetch(move || {
        let quests = quests.clone();
        let id = id.clone();
        async move { quests.get_quest(&id).await }
    })
}
