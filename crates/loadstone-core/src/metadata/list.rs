//! Metadata list parsing and minimal serialisation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

use super::plugin::PluginMetadata;

/// A parsed masterlist or userlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataList {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginMetadata>,
}

impl MetadataList {
    /// Read and parse a metadata list file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(&raw, path)
    }

    /// Parse metadata list content. `origin` only labels parse errors.
    ///
    /// Empty and comment-only documents (a null document in YAML terms) are
    /// valid, empty lists.
    pub fn from_yaml(raw: &str, origin: &Path) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(MetadataList::default());
        }
        let parsed: Option<MetadataList> =
            serde_yaml::from_str(raw).map_err(|e| Error::parse_in(origin, e))?;
        Ok(parsed.unwrap_or_default())
    }

    /// Look up a plugin entry by (case-insensitive) filename.
    pub fn plugin(&self, name: &str) -> Option<&PluginMetadata> {
        self.plugins.iter().find(|p| p.name_matches(name))
    }

    /// Write the minimal form of this list: per plugin, only the name, tag
    /// suggestions, and dirty records. Entries left with neither are dropped.
    pub fn save_minimal(&self, path: &Path, overwrite: bool) -> Result<()> {
        if path.exists() && !overwrite {
            return Err(Error::io(
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "output file already exists"),
            ));
        }

        let minimal = MetadataList {
            plugins: self
                .plugins
                .iter()
                .filter(|p| !p.tags.is_empty() || !p.dirty_info.is_empty())
                .map(|p| PluginMetadata {
                    name: p.name.clone(),
                    tags: p.tags.clone(),
                    dirty_info: p.dirty_info.clone(),
                    ..PluginMetadata::default()
                })
                .collect(),
        };

        let raw = serde_yaml::to_string(&minimal)
            .map_err(|e| Error::Parse(format!("{}: {e}", path.display())))?;
        fs::write(path, raw).map_err(|e| Error::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const LIST: &str = r#"
plugins:
  - name: Foo.esp
    tags: [ Delev, -Relev ]
    msg:
      - { type: warn, content: 'Obsolete.' }
    dirty:
      - { crc: 0xDEADBEEF, util: CleanTool v2, itm: 4, udr: 1 }
  - name: Bar.esp
    clean:
      - { crc: 0xCAFEF00D, util: CleanTool v2 }
  - name: MessagesOnly.esp
    msg:
      - { type: say, content: 'Nothing to keep minimal.' }
"#;

    #[test]
    fn parses_plugin_entries() {
        let list = MetadataList::from_yaml(LIST, Path::new("test")).unwrap();
        assert_eq!(list.plugins.len(), 3);

        let foo = list.plugin("foo.esp").unwrap();
        assert_eq!(foo.tags.len(), 2);
        assert_eq!(foo.dirty_info[0].crc, 0xDEAD_BEEF);
        assert_eq!(foo.dirty_info[0].itm, 4);
        assert_eq!(foo.dirty_info[0].nav, 0);
    }

    #[test]
    fn empty_content_parses_to_empty_list() {
        let list = MetadataList::from_yaml("", Path::new("test")).unwrap();
        assert!(list.plugins.is_empty());
        let list = MetadataList::from_yaml("\n# comment only\n", Path::new("test")).unwrap();
        assert!(list.plugins.is_empty());
    }

    #[test]
    fn malformed_content_is_a_parse_error() {
        let err = MetadataList::from_yaml("plugins: {not: a list}", Path::new("bad.yaml"))
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = MetadataList::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn minimal_round_trip_keeps_tags_and_dirty_records() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("minimal.yaml");

        let list = MetadataList::from_yaml(LIST, Path::new("test")).unwrap();
        list.save_minimal(&out, false).unwrap();

        let reloaded = MetadataList::load(&out).unwrap();
        // The message-only and clean-only entries carry nothing minimal.
        assert_eq!(reloaded.plugins.len(), 1);
        let foo = reloaded.plugin("Foo.esp").unwrap();
        assert_eq!(foo.tags, list.plugin("Foo.esp").unwrap().tags);
        assert_eq!(foo.dirty_info, list.plugin("Foo.esp").unwrap().dirty_info);
        assert!(foo.messages.is_empty());
    }

    #[test]
    fn save_minimal_refuses_to_clobber_without_overwrite() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("minimal.yaml");
        let list = MetadataList::from_yaml(LIST, Path::new("test")).unwrap();

        list.save_minimal(&out, false).unwrap();
        let err = list.save_minimal(&out, false).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));

        // With overwrite it succeeds.
        list.save_minimal(&out, true).unwrap();
    }
}
