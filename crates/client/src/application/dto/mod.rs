//! Payloads returned by the server monitoring endpoints, plus the quest
//! wire types the UI passes through unchanged.

pub mod server;

pub use server::{Backup, OnlinePlayer, PlayersOnline, PlaytimeEntry, ServerStatus};

// Quest payloads are domain types; re-exported so services and UI share one path.
pub use blockhaven_domain::{QuestForm, QuestWire};
