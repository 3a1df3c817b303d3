use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Configuration;
use crate::env::{self, EnvOverrides};
use crate::error::MandrelError;
use crate::eval;
use crate::file::{self, Discovered};
use crate::global;
use crate::ops::{self, Report};
use crate::state::{BootstrapState, Session};
use crate::types::{
    BootstrapAction, DEFAULT_BOOTSTRAP_NAME, DEFAULT_ENV_PREFIX, Overrides, Phase, WalkMode,
};

/// Entry point for building a bootstrap cycle.
pub struct Mandrel;

impl Mandrel {
    pub fn builder() -> MandrelBuilder {
        MandrelBuilder::new()
    }
}

/// Builder for one bootstrap cycle.
///
/// Every setting has a default, so `Mandrel::builder().load()` is the
/// zero-configuration path: read `MANDREL_ROOT` / `MANDREL_BOOTSTRAP_NAME`,
/// walk up from the CWD for `Mandrel.toml`, evaluate it.
#[derive(Debug, Clone)]
pub struct MandrelBuilder {
    file_name: Option<String>,
    env_prefix: Option<String>,
    env_enabled: bool,
    env_vars: Option<Vec<(String, String)>>,
    start_dir: Option<PathBuf>,
    overrides: Overrides,
    strict: bool,
}

impl Default for MandrelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MandrelBuilder {
    fn new() -> Self {
        Self {
            file_name: None,
            env_prefix: None,
            env_enabled: true,
            env_vars: None,
            start_dir: None,
            overrides: Overrides::default(),
            strict: true,
        }
    }

    /// Bootstrap file name to search for (default: `"Mandrel.toml"`).
    /// `{PREFIX}_BOOTSTRAP_NAME` still takes precedence.
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Environment variable prefix (default: `"MANDREL"`).
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Ignore the environment: no overrides, no config layer.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Use these variables instead of `std::env::vars()`.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Start the upward walk here instead of the current working directory.
    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Force the root, ahead of `{PREFIX}_ROOT`.
    pub fn root_override(mut self, root: impl Into<PathBuf>) -> Self {
        self.overrides.root = Some(root.into());
        self
    }

    /// Force the bootstrap file name, ahead of `{PREFIX}_BOOTSTRAP_NAME`.
    pub fn bootstrap_name(mut self, name: &str) -> Self {
        self.overrides.bootstrap_name = Some(name.to_string());
        self
    }

    /// Apply every `Some` field of `overrides`; `None` fields leave the builder as is.
    pub fn overrides(mut self, overrides: Overrides) -> Self {
        if let Some(root) = overrides.root {
            self.overrides.root = Some(root);
        }
        if let Some(name) = overrides.bootstrap_name {
            self.overrides.bootstrap_name = Some(name);
        }
        self
    }

    /// Enable or disable strict mode (default: `true`).
    /// In strict mode, unknown keys in the bootstrap file are errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn effective_env_prefix(&self) -> &str {
        self.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX)
    }

    fn effective_env_vars(&self) -> Vec<(String, String)> {
        if !self.env_enabled {
            return Vec::new();
        }
        match &self.env_vars {
            Some(vars) => vars.clone(),
            None => std::env::vars().collect(),
        }
    }

    /// Builder overrides first, then the environment, then defaults.
    fn effective_overrides(&self, from_env: EnvOverrides) -> (Option<PathBuf>, String) {
        let root = self.overrides.root.clone().or(from_env.root);
        let name = self
            .overrides
            .bootstrap_name
            .clone()
            .or(from_env.bootstrap_name)
            .or_else(|| self.file_name.clone())
            .unwrap_or_else(|| DEFAULT_BOOTSTRAP_NAME.to_string());
        (root, name)
    }

    fn effective_start_dir(&self) -> Result<PathBuf, MandrelError> {
        let start = match &self.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(MandrelError::CurrentDir)?,
        };
        // `Path::parent` is lexical; `..` must be gone before the walk.
        std::fs::canonicalize(&start).map_err(|e| MandrelError::IoError {
            path: start,
            source: e,
        })
    }

    /// Run a full bootstrap cycle and return the session.
    ///
    /// Does not touch the process-wide slot; see [`initialize`](Self::initialize).
    pub fn load(&self) -> Result<Session, MandrelError> {
        self.run_cycle().inspect_err(|e| {
            tracing::debug!(phase = ?Phase::Failed, error = %e, "bootstrap phase");
        })
    }

    fn run_cycle(&self) -> Result<Session, MandrelError> {
        enter(Phase::ResolvingRoot);
        let prefix = self.effective_env_prefix();
        let vars = self.effective_env_vars();
        let from_env = env::read_overrides(prefix, vars.clone());
        tracing::debug!(
            prefix,
            root_forced = from_env.root_forced(),
            name_forced = from_env.name_forced(),
            "read environment overrides"
        );
        let (root, file_name) = self.effective_overrides(from_env);

        enter(Phase::SearchingFile);
        let (state, found) = match root {
            Some(root) => locate_in_forced_root(root, &file_name)?,
            None => locate_upward(&self.effective_start_dir()?, &file_name)?,
        };

        let config = Configuration::with_env_layer(env::env_to_table(prefix, vars));
        let mut session = Session::new(state, config);

        if let Some(found) = found {
            enter(Phase::Evaluating);
            eval::evaluate(&found.file, session.scope(), self.strict)?;
        }

        enter(Phase::Ready);
        tracing::info!(
            root = %session.root_path().display(),
            bootstrap_file = %session.bootstrap().bootstrap_file().display(),
            loaded = session.bootstrap().bootstrap_file_loaded(),
            search_paths = session.search_paths().len(),
            "bootstrap complete"
        );
        Ok(session)
    }

    /// Run a cycle and install the result as the process-wide session.
    ///
    /// On failure the previously installed session, if any, stays in place.
    pub fn initialize(&self) -> Result<Arc<Session>, MandrelError> {
        global::install(self.load())
    }

    /// Handle a `BootstrapAction` and print the result to stdout.
    pub fn handle_and_print(&self, action: &BootstrapAction) -> Result<(), MandrelError> {
        let report = self.handle(action)?;
        println!("{report}");
        Ok(())
    }

    /// Run a cycle and build the report `action` asks for.
    pub fn handle(&self, action: &BootstrapAction) -> Result<Report, MandrelError> {
        let session = self.load()?;
        ops::report(&session, action)
    }
}

fn enter(phase: Phase) {
    tracing::debug!(?phase, "bootstrap phase");
}

/// Root forced: check `{root}/{file_name}` only. A miss keeps the defaults.
fn locate_in_forced_root(
    root: PathBuf,
    file_name: &str,
) -> Result<(BootstrapState, Option<Discovered>), MandrelError> {
    let found = file::find_bootstrap(&root, file_name, WalkMode::SingleDirectory)?;
    if found.is_none() {
        tracing::debug!(
            root = %root.display(),
            file_name,
            "no bootstrap file in forced root, using defaults"
        );
    }
    let bootstrap_file = root.join(file_name);
    Ok((BootstrapState::new(root, bootstrap_file), found))
}

/// Root not forced: walk up from `start`. A miss is fatal.
fn locate_upward(
    start: &Path,
    file_name: &str,
) -> Result<(BootstrapState, Option<Discovered>), MandrelError> {
    let found = file::find_bootstrap(start, file_name, WalkMode::Upward)?.ok_or_else(|| {
        MandrelError::MissingBootstrap {
            file_name: file_name.to_string(),
            start: start.to_path_buf(),
        }
    })?;
    tracing::debug!(path = %found.file.display(), "found bootstrap file");
    let state = BootstrapState::new(found.dir.clone(), found.file.clone());
    Ok((state, Some(found)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let builder = Mandrel::builder().env_vars(vars(&[]));
        assert_eq!(builder.effective_env_prefix(), "MANDREL");
        let (root, name) = builder.effective_overrides(EnvOverrides::default());
        assert_eq!(root, None);
        assert_eq!(name, "Mandrel.toml");
        assert!(builder.strict);
    }

    #[test]
    fn file_name_replaces_default() {
        let builder = Mandrel::builder().file_name("Project.toml");
        let (_, name) = builder.effective_overrides(EnvOverrides::default());
        assert_eq!(name, "Project.toml");
    }

    #[test]
    fn env_name_beats_builder_file_name() {
        let builder = Mandrel::builder().file_name("Project.toml");
        let from_env = EnvOverrides {
            root: None,
            bootstrap_name: Some("bootstrapper.toml".into()),
        };
        let (_, name) = builder.effective_overrides(from_env);
        assert_eq!(name, "bootstrapper.toml");
    }

    #[test]
    fn explicit_overrides_beat_env() {
        let builder = Mandrel::builder()
            .root_override("/cli/root")
            .bootstrap_name("cli.toml");
        let from_env = EnvOverrides {
            root: Some("/env/root".into()),
            bootstrap_name: Some("env.toml".into()),
        };
        let (root, name) = builder.effective_overrides(from_env);
        assert_eq!(root, Some(PathBuf::from("/cli/root")));
        assert_eq!(name, "cli.toml");
    }

    #[test]
    fn overrides_struct_skips_none() {
        let builder = Mandrel::builder()
            .root_override("/kept")
            .overrides(Overrides {
                root: None,
                bootstrap_name: Some("x.toml".into()),
            });
        assert_eq!(builder.overrides.root, Some(PathBuf::from("/kept")));
        assert_eq!(builder.overrides.bootstrap_name.as_deref(), Some("x.toml"));
    }

    #[test]
    fn no_env_ignores_supplied_vars() {
        let builder = Mandrel::builder()
            .env_vars(vars(&[("MANDREL_ROOT", "/blah")]))
            .no_env();
        assert!(builder.effective_env_vars().is_empty());
    }

    #[test]
    fn start_dir_parent_components_resolved() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let builder = Mandrel::builder().start_dir(dir.path().join("sub").join(".."));
        let start = builder.effective_start_dir().unwrap();
        assert!(start.is_absolute());
        assert_eq!(start, fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn missing_start_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let builder = Mandrel::builder().start_dir(dir.path().join("gone"));
        match builder.effective_start_dir() {
            Err(MandrelError::IoError { path, .. }) => assert_eq!(path, dir.path().join("gone")),
            other => panic!("Expected IoError, got: {other:?}"),
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_load_logs_failed_phase() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Mandrel.toml"), "[bootstrap]
bogus = 1
").unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            Mandrel::builder()
                .env_vars(vars(&[]))
                .start_dir(dir.path())
                .load()
        });
        assert!(result.is_err());

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Evaluating"), "logs: {logs}");
        assert!(logs.contains("Failed"), "logs: {logs}");
    }

    #[test]
    fn load_finds_file_and_evaluates() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Mandrel.toml"),
            "[bootstrap]\nsearch_paths = [\"/blah/myconf\"]\n",
        )
        .unwrap();

        let session = Mandrel::builder()
            .env_vars(vars(&[]))
            .start_dir(dir.path())
            .load()
            .unwrap();
        assert_eq!(session.root_path(), dir.path());
        assert_eq!(
            session.search_paths().as_slice(),
            &[dir.path().to_path_buf(), PathBuf::from("/blah/myconf")]
        );
    }

    #[test]
    fn load_env_config_layer_uses_prefix() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Mandrel.toml"), "[config]\nport = 1\n").unwrap();

        let session = Mandrel::builder()
            .env_prefix("MYAPP")
            .env_vars(vars(&[("MYAPP__PORT", "2"), ("MANDREL__PORT", "3")]))
            .start_dir(dir.path())
            .load()
            .unwrap();
        assert_eq!(session.config().get("port"), Some(toml::Value::Integer(2)));
    }

    #[test]
    fn handle_paths_report() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Mandrel.toml"),
            "[bootstrap]\nsearch_paths = [\"/etc/app\"]\n",
        )
        .unwrap();

        let report = Mandrel::builder()
            .env_vars(vars(&[]))
            .start_dir(dir.path())
            .handle(&BootstrapAction::Paths)
            .unwrap();
        let text = report.to_string();
        assert!(text.contains("/etc/app"));
        assert!(text.starts_with(&dir.path().display().to_string()));
    }
}
