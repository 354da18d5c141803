//! # loadstone-core
//!
//! Load-order metadata engine: the library behind the `loadstone` language
//! bindings.
//!
//! It answers, for a given game installation:
//! - What does the community masterlist (and the user's own userlist) say
//!   about each plugin?
//! - Which Bash Tags should be added or removed, and is a plugin known to be
//!   dirty or clean?
//! - Is the installed masterlist current, and what revision is it?
//!
//! ## Key guarantees
//!
//! 1. **Handles are shared**: [`Game`] and [`Database`] are cheap,
//!    reference-counted clones observing one underlying state, released when
//!    the last clone drops.
//! 2. **No partial state**: a failed operation leaves its handle valid and
//!    its previously loaded state intact.
//! 3. **Observable**: operations report through a process-wide logging
//!    callback and mirror to `tracing`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use loadstone_core::{create_game_handle, GameType};
//!
//! let game = create_game_handle(GameType::Tes5se, game_path, None)?;
//! game.load_current_load_order_state()?;
//!
//! let db = game.database();
//! db.load_lists(masterlist_path, Some(userlist_path))?;
//! let tags = db.plugin_tags("Unofficial Patch.esp", true)?;
//! ```

pub mod database;
pub mod enums;
pub mod error;
pub mod game;
pub mod logging;
pub mod metadata;
pub mod version;

// Re-export the main types at the crate root.
pub use database::{Database, MasterlistInfo, PluginTags};
pub use enums::{GameType, MessageType, PluginCleanliness};
pub use error::{Error, Result};
pub use game::{create_game_handle, Game};
pub use logging::{clear_logging_callback, set_logging_callback, LogLevel};
pub use metadata::{
    CleanInfo, DirtyInfo, Message, MessageContent, MetadataList, MultilingualText,
    PluginMetadata, SimpleMessage, Tag,
};
pub use version::{
    is_compatible, version_string, VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH, VERSION_REVISION,
};

/// End-to-end tests spanning game handles, the database, and logging.
#[cfg(test)]
mod workflow_tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    const MASTERLIST: &str = r#"
plugins:
  - name: Unofficial Patch.esp
    tags: [ Delev ]
    msg:
      - { type: say, content: 'Keep this updated.' }
"#;

    #[test]
    fn databases_from_one_game_share_state() {
        let dir = tempdir().unwrap();
        let masterlist = dir.path().join("masterlist.yaml");
        fs::write(&masterlist, MASTERLIST).unwrap();

        let game = create_game_handle(GameType::Tes5, dir.path(), None).unwrap();
        let first = game.database();
        let second = game.database();

        first.load_lists(&masterlist, None).unwrap();

        // A load through one handle is visible through the other.
        let tags = second.plugin_tags("Unofficial Patch.esp", false).unwrap();
        assert!(tags.added.contains("Delev"));
    }

    #[test]
    fn metadata_survives_minimisation_round_trip() {
        let dir = tempdir().unwrap();
        let masterlist = dir.path().join("masterlist.yaml");
        fs::write(&masterlist, MASTERLIST).unwrap();

        let game = create_game_handle(GameType::Fo4, dir.path(), None).unwrap();
        let db = game.database();
        db.load_lists(&masterlist, None).unwrap();

        let minimal = dir.path().join("minimal.yaml");
        db.write_minimal_list(&minimal, false).unwrap();
        db.load_lists(&minimal, None).unwrap();

        let tags = db.plugin_tags("Unofficial Patch.esp", false).unwrap();
        assert!(tags.added.contains("Delev"));
    }

    #[test]
    fn operations_report_through_the_logging_callback() {
        let _guard = crate::logging::test_guard();

        let dir = tempdir().unwrap();
        let marker = dir.path().display().to_string();

        let events: Arc<Mutex<Vec<(LogLevel, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        set_logging_callback(move |level, message| {
            sink.lock().unwrap().push((level, message.to_string()));
        });

        let _game = create_game_handle(GameType::Tes4, dir.path(), None).unwrap();
        clear_logging_callback();
        let _unheard = create_game_handle(GameType::Tes4, dir.path(), None).unwrap();

        let matching: Vec<_> = events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, m)| m.contains(&marker))
            .cloned()
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].0, LogLevel::Info);
        assert!(matching[0].1.contains("tes4"));
    }
}
