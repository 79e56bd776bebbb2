//! Server dashboard payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `GET /server/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub online: bool,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub motd: String,
    #[serde(default)]
    pub players_online: u32,
    #[serde(default)]
    pub max_players: u32,
    /// Ticks per second, 20.0 when healthy
    #[serde(default)]
    pub tps: Option<f32>,
}

impl ServerStatus {
    /// "3 / 20" style occupancy label.
    pub fn occupancy(&self) -> String {
        format!("{} / {}", self.players_online, self.max_players)
    }
}

/// A player currently connected to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlinePlayer {
    pub uuid: Uuid,
    pub name: String,
}

/// `GET /server/players`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayersOnline {
    #[serde(default)]
    pub players: Vec<OnlinePlayer>,
}

/// One world backup archive. `GET /server/backups` returns a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

impl Backup {
    /// Size rounded to the nearest unit, e.g. `1.5 GB`.
    pub fn size_label(&self) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        let mut size = self.size_bytes as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            format!("{} {}", self.size_bytes, UNITS[0])
        } else {
            format!("{:.1} {}", size, UNITS[unit])
        }
    }
}

/// Accumulated play time of one player. `GET /server/playtime` returns a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaytimeEntry {
    pub uuid: Uuid,
    pub name: String,
    pub seconds: u64,
}

impl PlaytimeEntry {
    /// "12h 05m" style label.
    pub fn hours_label(&self) -> String {
        let minutes = self.seconds / 60;
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_tolerates_missing_fields() {
        let status: ServerStatus = serde_json::from_value(json!({"online": false})).unwrap();
        assert!(!status.online);
        assert_eq!(status.occupancy(), "0 / 0");
        assert_eq!(status.tps, None);
    }

    #[test]
    fn test_backup_size_label() {
        let backup = |size_bytes| Backup {
            id: "b1".to_string(),
            name: "nightly".to_string(),
            created_at: Utc::now(),
            size_bytes,
        };
        assert_eq!(backup(512).size_label(), "512 B");
        assert_eq!(backup(1536).size_label(), "1.5 KB");
        assert_eq!(backup(3 * 1024 * 1024 * 1024).size_label(), "3.0 GB");
    }

    #[test]
    fn test_playtime_label() {
        let entry = PlaytimeEntry {
            uuid: Uuid::nil(),
            name: "Steve".to_string(),
            seconds: 12 * 3600 + 5 * 60 + 59,
        };
        assert_eq!(entry.hours_label(), "12h 05m");
    }
}
