//! Conversions between loadstone-core types and IR types.
//!
//! Single source of truth for type mapping. All bindings should convert
//! core types → IR types → FFI types, never core → FFI directly. Enums
//! convert in both directions because hosts also pass them *in* (game type
//! selection); value types only ever travel core → host.
//!
//! **These conversions are pure data transformations with no semantic
//! logic.**

use loadstone_core::{
    GameType, LogLevel, MasterlistInfo, MessageType, PluginCleanliness, PluginTags,
    SimpleMessage,
};

use crate::types::*;

/// Trait for converting core types to IR types.
pub trait ToIR<T> {
    fn to_ir(&self) -> T;
}

// --- GameType ---

impl From<GameType> for IRGameType {
    fn from(gt: GameType) -> Self {
        match gt {
            GameType::Tes4 => IRGameType::Tes4,
            GameType::Tes5 => IRGameType::Tes5,
            GameType::Tes5se => IRGameType::Tes5se,
            GameType::Tes5vr => IRGameType::Tes5vr,
            GameType::Fo3 => IRGameType::Fo3,
            GameType::Fonv => IRGameType::Fonv,
            GameType::Fo4 => IRGameType::Fo4,
            GameType::Fo4vr => IRGameType::Fo4vr,
        }
    }
}

impl From<IRGameType> for GameType {
    fn from(gt: IRGameType) -> Self {
        match gt {
            IRGameType::Tes4 => GameType::Tes4,
            IRGameType::Tes5 => GameType::Tes5,
            IRGameType::Tes5se => GameType::Tes5se,
            IRGameType::Tes5vr => GameType::Tes5vr,
            IRGameType::Fo3 => GameType::Fo3,
            IRGameType::Fonv => GameType::Fonv,
            IRGameType::Fo4 => GameType::Fo4,
            IRGameType::Fo4vr => GameType::Fo4vr,
        }
    }
}

impl ToIR<IRGameType> for GameType {
    fn to_ir(&self) -> IRGameType {
        (*self).into()
    }
}

// --- LogLevel ---

impl From<LogLevel> for IRLogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => IRLogLevel::Trace,
            LogLevel::Debug => IRLogLevel::Debug,
            LogLevel::Info => IRLogLevel::Info,
            LogLevel::Warning => IRLogLevel::Warning,
            LogLevel::Error => IRLogLevel::Error,
            LogLevel::Fatal => IRLogLevel::Fatal,
        }
    }
}

impl From<IRLogLevel> for LogLevel {
    fn from(level: IRLogLevel) -> Self {
        match level {
            IRLogLevel::Trace => LogLevel::Trace,
            IRLogLevel::Debug => LogLevel::Debug,
            IRLogLevel::Info => LogLevel::Info,
            IRLogLevel::Warning => LogLevel::Warning,
            IRLogLevel::Error => LogLevel::Error,
            IRLogLevel::Fatal => LogLevel::Fatal,
        }
    }
}

impl ToIR<IRLogLevel> for LogLevel {
    fn to_ir(&self) -> IRLogLevel {
        (*self).into()
    }
}

// --- MessageType ---

impl From<MessageType> for IRMessageType {
    fn from(mt: MessageType) -> Self {
        match mt {
            MessageType::Say => IRMessageType::Say,
            MessageType::Warn => IRMessageType::Warn,
            MessageType::Error => IRMessageType::Error,
        }
    }
}

impl From<IRMessageType> for MessageType {
    fn from(mt: IRMessageType) -> Self {
        match mt {
            IRMessageType::Say => MessageType::Say,
            IRMessageType::Warn => MessageType::Warn,
            IRMessageType::Error => MessageType::Error,
        }
    }
}

impl ToIR<IRMessageType> for MessageType {
    fn to_ir(&self) -> IRMessageType {
        (*self).into()
    }
}

// --- PluginCleanliness ---

impl From<PluginCleanliness> for IRPluginCleanliness {
    fn from(pc: PluginCleanliness) -> Self {
        match pc {
            PluginCleanliness::Clean => IRPluginCleanliness::Clean,
            PluginCleanliness::Dirty => IRPluginCleanliness::Dirty,
            PluginCleanliness::DoNotClean => IRPluginCleanliness::DoNotClean,
            PluginCleanliness::Unknown => IRPluginCleanliness::Unknown,
        }
    }
}

impl ToIR<IRPluginCleanliness> for PluginCleanliness {
    fn to_ir(&self) -> IRPluginCleanliness {
        (*self).into()
    }
}

// --- MasterlistInfo ---

impl From<MasterlistInfo> for IRMasterlistInfo {
    fn from(info: MasterlistInfo) -> Self {
        IRMasterlistInfo {
            revision_id: info.revision_id,
            revision_date: info.revision_date,
            is_modified: info.is_modified,
        }
    }
}

impl ToIR<IRMasterlistInfo> for MasterlistInfo {
    fn to_ir(&self) -> IRMasterlistInfo {
        self.clone().into()
    }
}

// --- SimpleMessage ---

impl From<SimpleMessage> for IRSimpleMessage {
    fn from(message: SimpleMessage) -> Self {
        IRSimpleMessage {
            message_type: message.message_type.into(),
            language: message.language,
            text: message.text,
            condition: message.condition,
        }
    }
}

impl ToIR<IRSimpleMessage> for SimpleMessage {
    fn to_ir(&self) -> IRSimpleMessage {
        self.clone().into()
    }
}

// --- PluginTags ---

impl From<PluginTags> for IRPluginTags {
    fn from(tags: PluginTags) -> Self {
        IRPluginTags {
            added: tags.added.into_iter().collect(),
            removed: tags.removed.into_iter().collect(),
            userlist_modified: tags.userlist_modified,
        }
    }
}

impl ToIR<IRPluginTags> for PluginTags {
    fn to_ir(&self) -> IRPluginTags {
        self.clone().into()
    }
}

/// The core library's version as an IR descriptor.
pub fn library_version() -> IRVersion {
    IRVersion {
        major: loadstone_core::VERSION_MAJOR,
        minor: loadstone_core::VERSION_MINOR,
        patch: loadstone_core::VERSION_PATCH,
        revision: loadstone_core::VERSION_REVISION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_type_round_trips_through_ir() {
        for game_type in GameType::ALL {
            let ir: IRGameType = game_type.into();
            let back: GameType = ir.into();
            assert_eq!(back, game_type);
            assert_eq!(ir.as_str(), game_type.as_str());
        }
    }

    #[test]
    fn plugin_tags_become_sorted_vectors() {
        let mut tags = PluginTags::default();
        tags.added.insert("Relev".to_string());
        tags.added.insert("Delev".to_string());
        tags.removed.insert("Filter".to_string());

        let ir = tags.to_ir();
        assert_eq!(ir.added, ["Delev", "Relev"]);
        assert_eq!(ir.removed, ["Filter"]);
    }

    #[test]
    fn library_version_matches_core_constants() {
        let version = library_version();
        assert_eq!(version.to_version_string(), loadstone_core::version_string());
        assert_eq!(version.revision, loadstone_core::VERSION_REVISION);
    }
}
