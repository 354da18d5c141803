//! Validation fixtures for language bindings.
//!
//! These are metadata lists and expected query outcomes that bindings can
//! use to verify their FFI marshalling is correct. All semantic behaviour
//! comes from `loadstone-core` - these fixtures just ensure the data
//! round-trips correctly through the binding layer.

/// Test masterlist for validation.
///
/// Use this list in binding tests to verify:
/// 1. Metadata list loading works through FFI
/// 2. Tag, message, and cleanliness queries marshal correctly
/// 3. Minimal-list output survives a reload
pub const TEST_MASTERLIST_YAML: &str = r#"
plugins:
  - name: Tagged.esp
    tags: [ Delev, -Relev ]
    msg:
      - { type: warn, content: 'Obsolete. Update to the latest version.' }
  - name: Dirty.esp
    dirty:
      - { crc: 0xDEADBEEF, util: CleanTool v2, itm: 4, udr: 1 }
  - name: Clean.esp
    clean:
      - { crc: 0xCAFEF00D, util: CleanTool v2 }
"#;

/// Test userlist for validation. Adds a tag to `Tagged.esp`.
pub const TEST_USERLIST_YAML: &str = r#"
plugins:
  - name: Tagged.esp
    tags: [ Filter ]
"#;

/// Plugin with tag metadata in [`TEST_MASTERLIST_YAML`].
pub const TAGGED_PLUGIN: &str = "Tagged.esp";

/// Plugin with dirty metadata in [`TEST_MASTERLIST_YAML`].
pub const DIRTY_PLUGIN: &str = "Dirty.esp";

/// Plugin with clean metadata in [`TEST_MASTERLIST_YAML`].
pub const CLEAN_PLUGIN: &str = "Clean.esp";

/// Plugin that appears in no list.
pub const UNLISTED_PLUGIN: &str = "Unlisted.esp";

/// Tags expected for [`TAGGED_PLUGIN`] without the userlist.
pub const EXPECTED_ADDED_TAGS: &[&str] = &["Delev"];

/// Tags expected for [`TAGGED_PLUGIN`] with the userlist applied.
pub const EXPECTED_ADDED_TAGS_WITH_USERLIST: &[&str] = &["Delev", "Filter"];

/// Tags expected for removal for [`TAGGED_PLUGIN`].
pub const EXPECTED_REMOVED_TAGS: &[&str] = &["Relev"];

/// Message text expected for [`TAGGED_PLUGIN`] in English.
pub const EXPECTED_MESSAGE_TEXT: &str = "Obsolete. Update to the latest version.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::ToIR;
    use crate::types::{IRPluginCleanliness, IRPluginTags};
    use loadstone_core::{create_game_handle, GameType};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn fixtures_produce_the_documented_outcomes() {
        let dir = tempdir().unwrap();
        let masterlist = dir.path().join("masterlist.yaml");
        fs::write(&masterlist, TEST_MASTERLIST_YAML).unwrap();
        let userlist = dir.path().join("userlist.yaml");
        fs::write(&userlist, TEST_USERLIST_YAML).unwrap();

        let game = create_game_handle(GameType::Tes5, dir.path(), None).unwrap();
        let db = game.database();

        db.load_lists(&masterlist, None).unwrap();
        let tags: IRPluginTags = db.plugin_tags(TAGGED_PLUGIN, false).unwrap().to_ir();
        assert_eq!(tags.added, EXPECTED_ADDED_TAGS);
        assert_eq!(tags.removed, EXPECTED_REMOVED_TAGS);
        assert!(!tags.userlist_modified);

        db.load_lists(&masterlist, Some(&userlist)).unwrap();
        let tags: IRPluginTags = db.plugin_tags(TAGGED_PLUGIN, false).unwrap().to_ir();
        assert_eq!(tags.added, EXPECTED_ADDED_TAGS_WITH_USERLIST);
        assert!(tags.userlist_modified);

        let cleanliness: IRPluginCleanliness =
            db.plugin_cleanliness(DIRTY_PLUGIN, false).unwrap().to_ir();
        assert_eq!(cleanliness, IRPluginCleanliness::Dirty);
        let cleanliness: IRPluginCleanliness =
            db.plugin_cleanliness(CLEAN_PLUGIN, false).unwrap().to_ir();
        assert_eq!(cleanliness, IRPluginCleanliness::Clean);
        let cleanliness: IRPluginCleanliness =
            db.plugin_cleanliness(UNLISTED_PLUGIN, false).unwrap().to_ir();
        assert_eq!(cleanliness, IRPluginCleanliness::Unknown);
    }

    #[test]
    fn fixture_message_resolves_in_english() {
        let dir = tempdir().unwrap();
        let masterlist = dir.path().join("masterlist.yaml");
        fs::write(&masterlist, TEST_MASTERLIST_YAML).unwrap();

        let game = create_game_handle(GameType::Fo4, dir.path(), None).unwrap();
        let db = game.database();
        db.load_lists(&masterlist, None).unwrap();

        let meta = db.plugin_metadata(TAGGED_PLUGIN, true, false).unwrap().unwrap();
        let messages = meta.simple_messages("en");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, EXPECTED_MESSAGE_TEXT);
    }
}
