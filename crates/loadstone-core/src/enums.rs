//! Enumerated constants surfaced across the library boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The game variants whose load orders this library understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    Tes4,
    Tes5,
    Tes5se,
    Tes5vr,
    Fo3,
    Fonv,
    Fo4,
    Fo4vr,
}

impl GameType {
    /// All variants, in declaration order.
    pub const ALL: [GameType; 8] = [
        GameType::Tes4,
        GameType::Tes5,
        GameType::Tes5se,
        GameType::Tes5vr,
        GameType::Fo3,
        GameType::Fonv,
        GameType::Fo4,
        GameType::Fo4vr,
    ];

    /// Short lowercase identifier, as used by hosts and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Tes4 => "tes4",
            GameType::Tes5 => "tes5",
            GameType::Tes5se => "tes5se",
            GameType::Tes5vr => "tes5vr",
            GameType::Fo3 => "fo3",
            GameType::Fonv => "fonv",
            GameType::Fo4 => "fo4",
            GameType::Fo4vr => "fo4vr",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a plugin message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Say,
    Warn,
    Error,
}

/// Cleanliness of a plugin, as recorded in its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginCleanliness {
    Clean,
    Dirty,
    DoNotClean,
    Unknown,
}
