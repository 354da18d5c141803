//! Python bindings for loadstone using PyO3.
//!
//! This module exposes the game and database handles, metadata value types,
//! and the logging callback to Python as the `loadstone` module.
//!
//! ## Design
//!
//! **Bindings do not define semantics.** All load-order and metadata logic
//! lives in `loadstone-core`. These are thin PyO3 wrappers for FFI
//! marshalling, with two responsibilities of their own:
//!
//! - Every delegated call releases the GIL for its duration, so the library
//!   may block on I/O without stalling other Python threads.
//! - The logging callback shim re-acquires the GIL before touching Python
//!   state, because the library may log from threads it created itself, and
//!   the callback is cleared at interpreter exit so the library never calls
//!   into a torn-down runtime.

use pyo3::exceptions::{PyConnectionError, PyIOError, PyLookupError, PyValueError};
use pyo3::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use loadstone_bindings_core::{
    library_version, IRGameType, IRLogLevel, IRMasterlistInfo, IRMessageType,
    IRPluginCleanliness, IRPluginTags, IRSimpleMessage, ToIR,
};
use loadstone_core as core;

/// Version of this binding, independent of the wrapped library's.
const WRAPPER_VERSION: (u32, u32, u32) = (4, 0, 2);
const WRAPPER_REVISION: &str = "8ff3f1c";

fn to_py_err(err: core::Error) -> PyErr {
    let message = err.to_string();
    match err {
        core::Error::InvalidArgument(_) | core::Error::Parse(_) => {
            PyValueError::new_err(message)
        }
        core::Error::Io { .. } => PyIOError::new_err(message),
        core::Error::Network(_) => PyConnectionError::new_err(message),
        core::Error::NotFound(_) => PyLookupError::new_err(message),
    }
}

/// An empty host string means "no path supplied".
fn optional_path(path: &str) -> Option<PathBuf> {
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

// --- Enumerations ---
//
// Member names are lowercase on the Python side (`GameType.tes5se`), the
// identifiers hosts have always used for these constants.

/// Python-compatible enum for GameType.
#[pyclass(name = "GameType", eq)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PyGameType {
    tes4,
    tes5,
    tes5se,
    tes5vr,
    fo3,
    fonv,
    fo4,
    fo4vr,
}

impl From<PyGameType> for IRGameType {
    fn from(gt: PyGameType) -> Self {
        match gt {
            PyGameType::tes4 => IRGameType::Tes4,
            PyGameType::tes5 => IRGameType::Tes5,
            PyGameType::tes5se => IRGameType::Tes5se,
            PyGameType::tes5vr => IRGameType::Tes5vr,
            PyGameType::fo3 => IRGameType::Fo3,
            PyGameType::fonv => IRGameType::Fonv,
            PyGameType::fo4 => IRGameType::Fo4,
            PyGameType::fo4vr => IRGameType::Fo4vr,
        }
    }
}

/// Python-compatible enum for LogLevel.
#[pyclass(name = "LogLevel", eq)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PyLogLevel {
    trace,
    debug,
    info,
    warning,
    error,
    fatal,
}

impl From<IRLogLevel> for PyLogLevel {
    fn from(level: IRLogLevel) -> Self {
        match level {
            IRLogLevel::Trace => PyLogLevel::trace,
            IRLogLevel::Debug => PyLogLevel::debug,
            IRLogLevel::Info => PyLogLevel::info,
            IRLogLevel::Warning => PyLogLevel::warning,
            IRLogLevel::Error => PyLogLevel::error,
            IRLogLevel::Fatal => PyLogLevel::fatal,
        }
    }
}

/// Python-compatible enum for MessageType.
#[pyclass(name = "MessageType", eq)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PyMessageType {
    say,
    warn,
    error,
}

impl From<IRMessageType> for PyMessageType {
    fn from(mt: IRMessageType) -> Self {
        match mt {
            IRMessageType::Say => PyMessageType::say,
            IRMessageType::Warn => PyMessageType::warn,
            IRMessageType::Error => PyMessageType::error,
        }
    }
}

/// Python-compatible enum for PluginCleanliness.
#[pyclass(name = "PluginCleanliness", eq)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PyPluginCleanliness {
    clean,
    dirty,
    do_not_clean,
    unknown,
}

impl From<IRPluginCleanliness> for PyPluginCleanliness {
    fn from(pc: IRPluginCleanliness) -> Self {
        match pc {
            IRPluginCleanliness::Clean => PyPluginCleanliness::clean,
            IRPluginCleanliness::Dirty => PyPluginCleanliness::dirty,
            IRPluginCleanliness::DoNotClean => PyPluginCleanliness::do_not_clean,
            IRPluginCleanliness::Unknown => PyPluginCleanliness::unknown,
        }
    }
}

// --- Value classes ---

/// Snapshot of a masterlist's installed revision.
#[pyclass(name = "MasterlistInfo")]
#[derive(Clone)]
pub struct PyMasterlistInfo {
    #[pyo3(get, set)]
    pub revision_id: String,
    #[pyo3(get, set)]
    pub revision_date: String,
    #[pyo3(get, set)]
    pub is_modified: bool,
}

impl From<IRMasterlistInfo> for PyMasterlistInfo {
    fn from(info: IRMasterlistInfo) -> Self {
        PyMasterlistInfo {
            revision_id: info.revision_id,
            revision_date: info.revision_date,
            is_modified: info.is_modified,
        }
    }
}

#[pymethods]
impl PyMasterlistInfo {
    fn __repr__(&self) -> String {
        format!(
            "MasterlistInfo(revision_id='{}', revision_date='{}', is_modified={})",
            self.revision_id, self.revision_date, self.is_modified
        )
    }
}

/// A displayable diagnostic resolved to one language.
#[pyclass(name = "SimpleMessage")]
#[derive(Clone)]
pub struct PySimpleMessage {
    message_type: PyMessageType,
    #[pyo3(get, set)]
    pub language: String,
    #[pyo3(get, set)]
    pub text: String,
    #[pyo3(get, set)]
    pub condition: String,
}

impl From<IRSimpleMessage> for PySimpleMessage {
    fn from(message: IRSimpleMessage) -> Self {
        PySimpleMessage {
            message_type: message.message_type.into(),
            language: message.language,
            text: message.text,
            condition: message.condition,
        }
    }
}

#[pymethods]
impl PySimpleMessage {
    #[getter]
    fn r#type(&self) -> PyMessageType {
        self.message_type
    }

    #[setter]
    fn set_type(&mut self, value: PyMessageType) {
        self.message_type = value;
    }

    fn __repr__(&self) -> String {
        format!(
            "SimpleMessage(type={:?}, language='{}', text='{}')",
            self.message_type, self.language, self.text
        )
    }
}

/// Tag delta for one plugin.
#[pyclass(name = "PluginTags")]
#[derive(Clone)]
pub struct PyPluginTags {
    #[pyo3(get, set)]
    pub added: BTreeSet<String>,
    #[pyo3(get, set)]
    pub removed: BTreeSet<String>,
    #[pyo3(get, set)]
    pub userlist_modified: bool,
}

impl From<IRPluginTags> for PyPluginTags {
    fn from(tags: IRPluginTags) -> Self {
        PyPluginTags {
            added: tags.added.into_iter().collect(),
            removed: tags.removed.into_iter().collect(),
            userlist_modified: tags.userlist_modified,
        }
    }
}

#[pymethods]
impl PyPluginTags {
    fn __repr__(&self) -> String {
        format!(
            "PluginTags(added={}, removed={}, userlist_modified={})",
            self.added.len(),
            self.removed.len(),
            self.userlist_modified
        )
    }
}

/// Full metadata for one plugin. Constructed by the library on query.
#[pyclass(name = "PluginMetadata")]
#[derive(Clone)]
pub struct PyPluginMetadata {
    inner: core::PluginMetadata,
}

#[pymethods]
impl PyPluginMetadata {
    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    /// Messages resolved to `language`, in list order.
    fn get_simple_messages(&self, py: Python<'_>, language: String) -> Vec<PySimpleMessage> {
        py.allow_threads(|| self.inner.simple_messages(&language))
            .into_iter()
            .map(|m| PySimpleMessage::from(IRSimpleMessage::from(m)))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!("PluginMetadata(name='{}')", self.inner.name)
    }
}

// --- Version classes ---

/// Version of the wrapped library.
#[pyclass(name = "Version")]
pub struct PyVersion;

#[pymethods]
impl PyVersion {
    #[classattr]
    fn major() -> u32 {
        library_version().major
    }

    #[classattr]
    fn minor() -> u32 {
        library_version().minor
    }

    #[classattr]
    fn patch() -> u32 {
        library_version().patch
    }

    #[classattr]
    fn revision() -> String {
        library_version().revision
    }

    #[staticmethod]
    fn string() -> String {
        library_version().to_version_string()
    }
}

/// Version of this binding.
#[pyclass(name = "WrapperVersion")]
pub struct PyWrapperVersion;

#[pymethods]
impl PyWrapperVersion {
    #[classattr]
    fn major() -> u32 {
        WRAPPER_VERSION.0
    }

    #[classattr]
    fn minor() -> u32 {
        WRAPPER_VERSION.1
    }

    #[classattr]
    fn patch() -> u32 {
        WRAPPER_VERSION.2
    }

    #[classattr]
    fn revision() -> String {
        WRAPPER_REVISION.to_string()
    }

    #[staticmethod]
    fn string() -> String {
        let (major, minor, patch) = WRAPPER_VERSION;
        format!("{major}.{minor}.{patch}")
    }
}

// --- Interface classes ---

/// Handle to a loaded game instance.
#[pyclass(name = "GameInterface")]
pub struct PyGameInterface {
    inner: core::Game,
}

impl std::fmt::Debug for PyGameInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PyGameInterface").finish_non_exhaustive()
    }
}

#[pymethods]
impl PyGameInterface {
    /// Read the game's current load-order state from disk.
    fn load_current_load_order_state(&self, py: Python<'_>) -> PyResult<()> {
        py.allow_threads(|| self.inner.load_current_load_order_state())
            .map_err(to_py_err)
    }

    /// The database sharing this handle's state.
    fn get_database(&self, py: Python<'_>) -> PyDatabaseInterface {
        PyDatabaseInterface {
            inner: py.allow_threads(|| self.inner.database()),
        }
    }
}

/// Handle to the masterlist/userlist state of a game.
#[pyclass(name = "DatabaseInterface")]
pub struct PyDatabaseInterface {
    inner: core::Database,
}

#[pymethods]
impl PyDatabaseInterface {
    #[pyo3(signature = (masterlist_path, userlist_path = String::new()))]
    fn load_lists(
        &self,
        py: Python<'_>,
        masterlist_path: String,
        userlist_path: String,
    ) -> PyResult<()> {
        py.allow_threads(|| {
            let userlist = optional_path(&userlist_path);
            self.inner
                .load_lists(Path::new(&masterlist_path), userlist.as_deref())
        })
        .map_err(to_py_err)
    }

    fn update_masterlist(
        &self,
        py: Python<'_>,
        masterlist_path: String,
        remote_url: String,
        remote_branch: String,
    ) -> PyResult<bool> {
        py.allow_threads(|| {
            self.inner
                .update_masterlist(Path::new(&masterlist_path), &remote_url, &remote_branch)
        })
        .map_err(to_py_err)
    }

    fn get_masterlist_revision(
        &self,
        py: Python<'_>,
        masterlist_path: String,
        get_short_id: bool,
    ) -> PyResult<PyMasterlistInfo> {
        py.allow_threads(|| {
            self.inner
                .masterlist_revision(Path::new(&masterlist_path), get_short_id)
        })
        .map(|info| PyMasterlistInfo::from(info.to_ir()))
        .map_err(to_py_err)
    }

    #[pyo3(signature = (plugin, include_user_metadata = true, evaluate_conditions = false))]
    fn get_plugin_metadata(
        &self,
        py: Python<'_>,
        plugin: String,
        include_user_metadata: bool,
        evaluate_conditions: bool,
    ) -> PyResult<Option<PyPluginMetadata>> {
        py.allow_threads(|| {
            self.inner
                .plugin_metadata(&plugin, include_user_metadata, evaluate_conditions)
        })
        .map(|meta| meta.map(|inner| PyPluginMetadata { inner }))
        .map_err(to_py_err)
    }

    #[pyo3(signature = (plugin, evaluate_conditions = false))]
    fn get_plugin_tags(
        &self,
        py: Python<'_>,
        plugin: String,
        evaluate_conditions: bool,
    ) -> PyResult<PyPluginTags> {
        py.allow_threads(|| self.inner.plugin_tags(&plugin, evaluate_conditions))
            .map(|tags| PyPluginTags::from(tags.to_ir()))
            .map_err(to_py_err)
    }

    #[pyo3(signature = (plugin, evaluate_conditions = false))]
    fn get_plugin_cleanliness(
        &self,
        py: Python<'_>,
        plugin: String,
        evaluate_conditions: bool,
    ) -> PyResult<PyPluginCleanliness> {
        py.allow_threads(|| self.inner.plugin_cleanliness(&plugin, evaluate_conditions))
            .map(|pc| PyPluginCleanliness::from(pc.to_ir()))
            .map_err(to_py_err)
    }

    fn write_minimal_list(
        &self,
        py: Python<'_>,
        output_file: String,
        overwrite: bool,
    ) -> PyResult<()> {
        py.allow_threads(|| {
            self.inner
                .write_minimal_list(Path::new(&output_file), overwrite)
        })
        .map_err(to_py_err)
    }
}

// --- Module functions ---

/// Construct a handle to the game installed at `game_path`.
///
/// Paths are interpreted as UTF-8 regardless of platform path encoding.
#[pyfunction]
#[pyo3(signature = (game, game_path, game_local_path = String::new()))]
fn create_game_handle(
    py: Python<'_>,
    game: PyGameType,
    game_path: String,
    game_local_path: String,
) -> PyResult<PyGameInterface> {
    py.allow_threads(|| {
        let game_type: core::GameType = IRGameType::from(game).into();
        let local = optional_path(&game_local_path);
        core::create_game_handle(game_type, Path::new(&game_path), local.as_deref())
    })
    .map(|inner| PyGameInterface { inner })
    .map_err(to_py_err)
}

/// Whether a host built against the given library version can use this one.
#[pyfunction]
fn is_compatible(py: Python<'_>, major: u32, minor: u32, patch: u32) -> bool {
    py.allow_threads(|| core::is_compatible(major, minor, patch))
}

/// Register `callback(level, message)` to receive library log events, or
/// pass `None` to clear it.
///
/// The library may log from threads of its own; this shim re-acquires the
/// GIL before invoking Python code. A callback that raises is reported as
/// unraisable and does not interrupt the native caller.
#[pyfunction]
#[pyo3(signature = (callback))]
fn set_logging_callback(callback: Option<PyObject>) {
    match callback {
        Some(callback) => core::set_logging_callback(move |level, message| {
            Python::with_gil(|py| {
                let level = PyLogLevel::from(IRLogLevel::from(level));
                if let Err(err) = callback.call1(py, (level, message)) {
                    err.write_unraisable_bound(py, None);
                }
            });
        }),
        None => core::clear_logging_callback(),
    }
}

/// Clear the registered logging callback.
///
/// Registered with `atexit` on import so the callback is always cleared
/// before interpreter teardown.
#[pyfunction]
fn clear_logging_callback() {
    core::clear_logging_callback();
}

/// A Python module that wraps the loadstone load-order library.
#[pymodule]
fn loadstone(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGameType>()?;
    m.add_class::<PyLogLevel>()?;
    m.add_class::<PyMessageType>()?;
    m.add_class::<PyPluginCleanliness>()?;
    m.add_class::<PyMasterlistInfo>()?;
    m.add_class::<PySimpleMessage>()?;
    m.add_class::<PyPluginTags>()?;
    m.add_class::<PyPluginMetadata>()?;
    m.add_class::<PyVersion>()?;
    m.add_class::<PyWrapperVersion>()?;
    m.add_class::<PyGameInterface>()?;
    m.add_class::<PyDatabaseInterface>()?;
    m.add_function(wrap_pyfunction!(create_game_handle, m)?)?;
    m.add_function(wrap_pyfunction!(is_compatible, m)?)?;
    m.add_function(wrap_pyfunction!(set_logging_callback, m)?)?;
    m.add_function(wrap_pyfunction!(clear_logging_callback, m)?)?;

    // The library stores the callback process-wide. Clear it when the
    // interpreter exits, or a late log event would call into a torn-down
    // runtime.
    let atexit = m.py().import_bound("atexit")?;
    atexit.call_method1("register", (m.getattr("clear_logging_callback")?,))?;

    Ok(())
}
