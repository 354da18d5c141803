//! Game handles and load-order state.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::database::Database;
use crate::enums::GameType;
use crate::error::{Error, Result};
use crate::logging::{self, LogLevel};

/// Snapshot of the host's current load order, shared between a game handle
/// and its database.
#[derive(Debug, Default)]
pub(crate) struct LoadOrderState {
    pub(crate) active_plugins: Vec<String>,
}

/// Shared handle to a loaded game instance.
///
/// Cloning is cheap and clones observe the same underlying state; the state
/// is released when the last clone is dropped.
#[derive(Clone)]
pub struct Game {
    inner: Arc<GameInner>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game").finish_non_exhaustive()
    }
}

struct GameInner {
    game_type: GameType,
    game_path: PathBuf,
    game_local_path: Option<PathBuf>,
    load_order: Arc<RwLock<LoadOrderState>>,
    database: Database,
}

/// Construct a handle to the game installed at `game_path`.
///
/// `game_local_path` is the directory holding the game's local state
/// (load-order files); `None` means it lives under the game path.
pub fn create_game_handle(
    game_type: GameType,
    game_path: &Path,
    game_local_path: Option<&Path>,
) -> Result<Game> {
    if game_path.as_os_str().is_empty() {
        return Err(Error::InvalidArgument("game path must not be empty".into()));
    }
    if let Some(local) = game_local_path {
        if local.as_os_str().is_empty() {
            return Err(Error::InvalidArgument(
                "game local path must not be empty".into(),
            ));
        }
    }

    let metadata = fs::metadata(game_path).map_err(|e| Error::io(game_path, e))?;
    if !metadata.is_dir() {
        return Err(Error::InvalidArgument(format!(
            "game path {} is not a directory",
            game_path.display()
        )));
    }

    let load_order = Arc::new(RwLock::new(LoadOrderState::default()));
    let database = Database::new(game_type, game_path, Arc::clone(&load_order));

    logging::emit(
        LogLevel::Info,
        &format!(
            "created {game_type} game handle for {}",
            game_path.display()
        ),
    );

    Ok(Game {
        inner: Arc::new(GameInner {
            game_type,
            game_path: game_path.to_path_buf(),
            game_local_path: game_local_path.map(Path::to_path_buf),
            load_order,
            database,
        }),
    })
}

impl Game {
    pub fn game_type(&self) -> GameType {
        self.inner.game_type
    }

    pub fn game_path(&self) -> &Path {
        &self.inner.game_path
    }

    /// The database sharing this handle's state. Every call returns a handle
    /// onto the same underlying database.
    pub fn database(&self) -> Database {
        self.inner.database.clone()
    }

    /// Read the current load order from the game's `plugins.txt`.
    ///
    /// A missing file leaves the state empty; any other read failure is an
    /// I/O error. Lines are plugin filenames, `#` starts a comment, and a
    /// leading `*` (active marker in newer games) is stripped.
    pub fn load_current_load_order_state(&self) -> Result<()> {
        let dir = self
            .inner
            .game_local_path
            .as_deref()
            .unwrap_or(&self.inner.game_path);
        let path = dir.join("plugins.txt");

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                logging::emit(
                    LogLevel::Debug,
                    &format!("no load-order file at {}", path.display()),
                );
                String::new()
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        let active_plugins: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.trim_start_matches('*').to_string())
            .collect();

        logging::emit(
            LogLevel::Debug,
            &format!(
                "loaded load-order state: {} active plugins",
                active_plugins.len()
            ),
        );

        self.inner.load_order.write().unwrap().active_plugins = active_plugins;
        Ok(())
    }
}
