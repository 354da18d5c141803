//! Intermediate Representation (IR) types for FFI bindings.
//!
//! These types are designed for maximum FFI compatibility:
//! - Fieldless enums and string/primitive fields only
//! - No borrowed data, no platform path types
//! - Serializable to JSON
//!
//! **These types carry no semantics.** They are pure data representations
//! for marshalling between Rust and foreign languages.

use serde::{Deserialize, Serialize};

/// IR representation of GameType.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IRGameType {
    Tes4,
    Tes5,
    Tes5se,
    Tes5vr,
    Fo3,
    Fonv,
    Fo4,
    Fo4vr,
}

impl IRGameType {
    /// String representation for FFI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tes4 => "tes4",
            Self::Tes5 => "tes5",
            Self::Tes5se => "tes5se",
            Self::Tes5vr => "tes5vr",
            Self::Fo3 => "fo3",
            Self::Fonv => "fonv",
            Self::Fo4 => "fo4",
            Self::Fo4vr => "fo4vr",
        }
    }
}

/// IR representation of LogLevel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IRLogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl IRLogLevel {
    /// String representation for FFI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

/// IR representation of MessageType.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IRMessageType {
    Say,
    Warn,
    Error,
}

/// IR representation of PluginCleanliness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IRPluginCleanliness {
    Clean,
    Dirty,
    DoNotClean,
    Unknown,
}

/// IR representation of MasterlistInfo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRMasterlistInfo {
    pub revision_id: String,
    pub revision_date: String,
    pub is_modified: bool,
}

/// IR representation of SimpleMessage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRSimpleMessage {
    pub message_type: IRMessageType,
    pub language: String,
    pub text: String,
    pub condition: String,
}

/// IR representation of PluginTags.
///
/// Tag sets are carried as sorted vectors; foreign languages rebuild their
/// own set types from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRPluginTags {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub userlist_modified: bool,
}

/// IR representation of a version descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub revision: String,
}

impl IRVersion {
    /// The version as a `major.minor.patch` string.
    pub fn to_version_string(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ir_types_serialize_to_plain_json() {
        let tags = IRPluginTags {
            added: vec!["Delev".into()],
            removed: vec!["Relev".into()],
            userlist_modified: true,
        };
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(
            json,
            r#"{"added":["Delev"],"removed":["Relev"],"userlist_modified":true}"#
        );

        let message = IRSimpleMessage {
            message_type: IRMessageType::Warn,
            language: "en".into(),
            text: "Obsolete.".into(),
            condition: String::new(),
        };
        assert!(serde_json::to_string(&message).unwrap().contains(r#""warn""#));
    }

    #[test]
    fn version_string_formats_components() {
        let version = IRVersion {
            major: 1,
            minor: 2,
            patch: 3,
            revision: "abc1234".into(),
        };
        assert_eq!(version.to_version_string(), "1.2.3");
    }
}
