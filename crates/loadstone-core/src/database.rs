//! Masterlist/userlist database operations.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::enums::{GameType, PluginCleanliness};
use crate::error::{Error, Result};
use crate::game::LoadOrderState;
use crate::logging::{self, LogLevel};
use crate::metadata::{evaluate_condition, ConditionContext, MetadataList, PluginMetadata};

/// Snapshot of a masterlist's installed revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterlistInfo {
    pub revision_id: String,
    pub revision_date: String,
    pub is_modified: bool,
}

/// Tag delta for one plugin, aggregated over masterlist and userlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginTags {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub userlist_modified: bool,
}

/// Revision metadata recorded beside an installed masterlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RevisionRecord {
    revision_id: String,
    revision_date: String,
}

#[derive(Default)]
struct LoadedLists {
    masterlist: MetadataList,
    userlist: MetadataList,
}

/// Shared handle to the masterlist/userlist state of one game.
///
/// Obtained from [`crate::Game::database`]; clones observe the same state.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

struct DatabaseInner {
    game_type: GameType,
    data_path: PathBuf,
    load_order: Arc<RwLock<LoadOrderState>>,
    lists: RwLock<LoadedLists>,
}

impl Database {
    pub(crate) fn new(
        game_type: GameType,
        game_path: &Path,
        load_order: Arc<RwLock<LoadOrderState>>,
    ) -> Self {
        Database {
            inner: Arc::new(DatabaseInner {
                game_type,
                data_path: game_path.join("Data"),
                load_order,
                lists: RwLock::new(LoadedLists::default()),
            }),
        }
    }

    pub fn game_type(&self) -> GameType {
        self.inner.game_type
    }

    /// Parse and install the masterlist (and optionally a userlist).
    ///
    /// Both files are parsed before either replaces loaded state, so a parse
    /// failure leaves the previously loaded lists intact.
    pub fn load_lists(&self, masterlist_path: &Path, userlist_path: Option<&Path>) -> Result<()> {
        let masterlist = MetadataList::load(masterlist_path)?;
        let userlist = match userlist_path {
            Some(path) => MetadataList::load(path)?,
            None => MetadataList::default(),
        };

        logging::emit(
            LogLevel::Debug,
            &format!(
                "loaded metadata lists from {}: {} masterlist entries, {} userlist entries",
                masterlist_path.display(),
                masterlist.plugins.len(),
                userlist.plugins.len()
            ),
        );

        *self.inner.lists.write().unwrap() = LoadedLists {
            masterlist,
            userlist,
        };
        Ok(())
    }

    /// Fetch `<remote_url>/<remote_branch>/masterlist.yaml`, validate it, and
    /// install it at `masterlist_path`. Returns whether the installed content
    /// changed. Revision metadata is recorded in a sidecar file either way.
    ///
    /// Filesystem remotes always work; `http(s)://` remotes need the
    /// `online` feature.
    pub fn update_masterlist(
        &self,
        masterlist_path: &Path,
        remote_url: &str,
        remote_branch: &str,
    ) -> Result<bool> {
        if remote_url.trim().is_empty() || remote_branch.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "remote URL and branch must not be empty".into(),
            ));
        }

        let fetched = fetch_remote(remote_url, remote_branch)?;
        MetadataList::from_yaml(&fetched, Path::new(remote_url))?;

        let current = match fs::read_to_string(masterlist_path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(Error::io(masterlist_path, e)),
        };

        let changed = current.as_deref() != Some(fetched.as_str());
        if changed {
            fs::write(masterlist_path, &fetched).map_err(|e| Error::io(masterlist_path, e))?;
        }

        let record = RevisionRecord {
            revision_id: content_hash(&fetched),
            revision_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        };
        let sidecar = revision_sidecar_path(masterlist_path);
        let raw = serde_yaml::to_string(&record).map_err(|e| Error::parse_in(&sidecar, e))?;
        fs::write(&sidecar, raw).map_err(|e| Error::io(&sidecar, e))?;

        logging::emit(
            if changed { LogLevel::Info } else { LogLevel::Debug },
            &format!(
                "masterlist at {} is {} (remote {remote_url}, branch {remote_branch})",
                masterlist_path.display(),
                if changed { "updated" } else { "already up to date" }
            ),
        );
        Ok(changed)
    }

    /// Revision metadata for the masterlist installed at `masterlist_path`.
    ///
    /// Fails with `NotFound` when no revision metadata was ever recorded
    /// there. `is_modified` reports whether the file's content no longer
    /// matches the recorded revision.
    pub fn masterlist_revision(
        &self,
        masterlist_path: &Path,
        get_short_id: bool,
    ) -> Result<MasterlistInfo> {
        let sidecar = revision_sidecar_path(masterlist_path);
        let raw = match fs::read_to_string(&sidecar) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(format!(
                    "no revision metadata for {}",
                    masterlist_path.display()
                )))
            }
            Err(e) => return Err(Error::io(&sidecar, e)),
        };
        let record: RevisionRecord =
            serde_yaml::from_str(&raw).map_err(|e| Error::parse_in(&sidecar, e))?;

        let content =
            fs::read_to_string(masterlist_path).map_err(|e| Error::io(masterlist_path, e))?;
        let is_modified = content_hash(&content) != record.revision_id;

        let revision_id = if get_short_id {
            record.revision_id.chars().take(7).collect()
        } else {
            record.revision_id
        };

        Ok(MasterlistInfo {
            revision_id,
            revision_date: record.revision_date,
            is_modified,
        })
    }

    /// Merged metadata for one plugin, or `None` when no entry exists.
    pub fn plugin_metadata(
        &self,
        plugin: &str,
        include_user_metadata: bool,
        evaluate_conditions: bool,
    ) -> Result<Option<PluginMetadata>> {
        validate_plugin_name(plugin)?;

        let merged = {
            let lists = self.inner.lists.read().unwrap();
            let mut merged = lists.masterlist.plugin(plugin).cloned();
            if include_user_metadata {
                if let Some(user) = lists.userlist.plugin(plugin) {
                    match merged.as_mut() {
                        Some(meta) => meta.merge(user),
                        None => merged = Some(user.clone()),
                    }
                }
            }
            merged
        };

        match merged {
            Some(mut meta) => {
                if evaluate_conditions {
                    self.apply_conditions(&mut meta)?;
                }
                Ok(Some(meta))
            }
            None => Ok(None),
        }
    }

    /// Tag delta for one plugin. `userlist_modified` is true iff the
    /// userlist entry contributed tags.
    pub fn plugin_tags(&self, plugin: &str, evaluate_conditions: bool) -> Result<PluginTags> {
        validate_plugin_name(plugin)?;

        let (master_entry, user_entry) = {
            let lists = self.inner.lists.read().unwrap();
            (
                lists.masterlist.plugin(plugin).cloned(),
                lists.userlist.plugin(plugin).cloned(),
            )
        };

        let mut tags = PluginTags {
            userlist_modified: user_entry.as_ref().is_some_and(|u| !u.tags.is_empty()),
            ..PluginTags::default()
        };

        for tag in master_entry
            .iter()
            .chain(user_entry.iter())
            .flat_map(|meta| meta.tags.iter())
        {
            if evaluate_conditions && !self.condition_holds(tag.condition())? {
                continue;
            }
            if tag.is_addition() {
                tags.added.insert(tag.name().to_string());
            } else {
                tags.removed.insert(tag.name().to_string());
            }
        }
        Ok(tags)
    }

    /// Cleanliness of one plugin, from its merged metadata.
    ///
    /// Dirty records win; an explicit "do not clean" message beats clean
    /// records; no cleaning metadata at all is `Unknown`.
    pub fn plugin_cleanliness(
        &self,
        plugin: &str,
        evaluate_conditions: bool,
    ) -> Result<PluginCleanliness> {
        let Some(meta) = self.plugin_metadata(plugin, true, evaluate_conditions)? else {
            return Ok(PluginCleanliness::Unknown);
        };

        if !meta.dirty_info.is_empty() {
            return Ok(PluginCleanliness::Dirty);
        }
        let do_not_clean = meta
            .simple_messages("en")
            .iter()
            .any(|m| m.text.to_ascii_lowercase().contains("do not clean"));
        if do_not_clean {
            Ok(PluginCleanliness::DoNotClean)
        } else if !meta.clean_info.is_empty() {
            Ok(PluginCleanliness::Clean)
        } else {
            Ok(PluginCleanliness::Unknown)
        }
    }

    /// Write the loaded masterlist's minimal form to `output_file`.
    pub fn write_minimal_list(&self, output_file: &Path, overwrite: bool) -> Result<()> {
        {
            let lists = self.inner.lists.read().unwrap();
            lists.masterlist.save_minimal(output_file, overwrite)?;
        }
        logging::emit(
            LogLevel::Debug,
            &format!("wrote minimal list to {}", output_file.display()),
        );
        Ok(())
    }

    fn condition_holds(&self, condition: &str) -> Result<bool> {
        if condition.is_empty() {
            return Ok(true);
        }
        let active = self.inner.load_order.read().unwrap().active_plugins.clone();
        evaluate_condition(
            condition,
            &ConditionContext {
                data_path: &self.inner.data_path,
                active_plugins: &active,
            },
        )
    }

    fn apply_conditions(&self, meta: &mut PluginMetadata) -> Result<()> {
        let active = self.inner.load_order.read().unwrap().active_plugins.clone();
        let ctx = ConditionContext {
            data_path: &self.inner.data_path,
            active_plugins: &active,
        };

        for message in std::mem::take(&mut meta.messages) {
            if evaluate_condition(&message.condition, &ctx)? {
                meta.messages.push(message);
            }
        }
        for tag in std::mem::take(&mut meta.tags) {
            if evaluate_condition(tag.condition(), &ctx)? {
                meta.tags.push(tag);
            }
        }
        Ok(())
    }
}

fn validate_plugin_name(plugin: &str) -> Result<()> {
    if plugin.trim().is_empty() {
        return Err(Error::InvalidArgument("plugin name must not be empty".into()));
    }
    Ok(())
}

fn content_hash(content: &str) -> String {
    Sha256::digest(content.as_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn revision_sidecar_path(masterlist_path: &Path) -> PathBuf {
    let name = masterlist_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    masterlist_path.with_file_name(format!(".{name}.revision.yaml"))
}

fn fetch_remote(remote_url: &str, branch: &str) -> Result<String> {
    if remote_url.starts_with("http://") || remote_url.starts_with("https://") {
        fetch_http(remote_url, branch)
    } else {
        let path = Path::new(remote_url).join(branch).join("masterlist.yaml");
        fs::read_to_string(&path)
            .map_err(|e| Error::Network(format!("failed to read remote {}: {e}", path.display())))
    }
}

#[cfg(feature = "online")]
fn fetch_http(remote_url: &str, branch: &str) -> Result<String> {
    let url = format!("{}/{branch}/masterlist.yaml", remote_url.trim_end_matches('/'));
    let response = reqwest::blocking::get(&url).map_err(|e| Error::Network(format!("{url}: {e}")))?;
    let response = response
        .error_for_status()
        .map_err(|e| Error::Network(format!("{url}: {e}")))?;
    response
        .text()
        .map_err(|e| Error::Network(format!("{url}: {e}")))
}

#[cfg(not(feature = "online"))]
fn fetch_http(remote_url: &str, _branch: &str) -> Result<String> {
    Err(Error::Network(format!(
        "HTTP remote {remote_url} requires the `online` feature"
    )))
}
