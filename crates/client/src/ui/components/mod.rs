//! Reusable UI components

pub mod fields;
pub mod quest_form;
pub mod quest_list;
pub mod server_dashboard;

pub use quest_form::QuestEditor;
pub use quest_list::QuestList;
pub use server_dashboard::ServerDashboard;
