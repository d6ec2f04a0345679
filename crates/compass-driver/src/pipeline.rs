//! Orchestrateur : options fusionnées → chemins résolus → invocation
//! `compass` → résultat.
//!
//! Tout ce qui peut échouer sans lancer de processus échoue ici, en
//! `Err(Error)`. Le reste arrive dans [`Compiled`].

use std::thread::JoinHandle;

use camino::{Utf8Path, Utf8PathBuf};

use crate::args::build_args;
use crate::config::{Options, Resolved};
use crate::error::{Error, Result};
use crate::paths::resolve_output;
use crate::runner::{Compiled, Invocation};

/// Exécutable lancé par défaut.
pub const DEFAULT_EXECUTABLE: &str = "compass";

/// Orchestrateur : options → [`Invocation`] → [`Compiled`].
///
/// Les erreurs de configuration sont renvoyées avant tout lancement ; une
/// fois le processus parti, tout passe par [`Compiled`].
#[derive(Debug, Clone)]
pub struct Compass {
    defaults: Options,
}

impl Default for Compass {
    fn default() -> Self { Self::new() }
}

impl Compass {
    pub fn new() -> Self {
        Self { defaults: Options::defaults() }
    }

    /// Remplace les valeurs par défaut (fusionnées avec celles de chaque appel).
    pub fn with_defaults(defaults: Options) -> Self {
        Self { defaults: Options::merge(&Options::defaults(), &defaults) }
    }

    pub fn defaults(&self) -> &Options { &self.defaults }

    /// Prépare l'invocation en résolvant les chemins relatifs depuis le
    /// dossier courant du processus.
    pub fn prepare(&self, input: &Utf8Path, overrides: &Options) -> Result<Invocation> {
        let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|p| Error::NonUtf8Path(p.display().to_string()))?;
        self.prepare_in(input, overrides, &cwd)
    }

    /// Comme [`Compass::prepare`], avec un dossier courant explicite.
    pub fn prepare_in(&self, input: &Utf8Path, overrides: &Options, cwd: &Utf8Path) -> Result<Invocation> {
        let resolved = Options::merge(&self.defaults, overrides).resolve(cwd)?;
        let output = resolve_output(&resolved.absolute_input(input), &resolved.sass_root, &resolved.css_root)?;
        let (program, mut args) = program_and_prefix(&resolved);
        args.extend(build_args(input, &resolved));

        let inv = Invocation { program, args, cwd: resolved.project, output };
        tracing::debug!(cmd = %inv.display(), output = %inv.output, "invocation prête");
        Ok(inv)
    }

    /// Compile en bloquant le thread appelant.
    pub fn compile(&self, input: &Utf8Path, overrides: &Options) -> Result<Compiled> {
        Ok(self.prepare(input, overrides)?.run())
    }

    /// Compile sur un thread dédié ; `done(code, stdout, stderr, output)` est
    /// appelé exactement une fois.
    pub fn compile_with<F>(&self, input: &Utf8Path, overrides: &Options, done: F) -> Result<JoinHandle<()>>
    where
        F: FnOnce(i32, String, String, Utf8PathBuf) + Send + 'static,
    {
        Ok(self.prepare(input, overrides)?.spawn(done))
    }

    /// Compile de façon asynchrone (runtime tokio requis).
    pub async fn compile_async(&self, input: &Utf8Path, overrides: &Options) -> Result<Compiled> {
        let inv = self.prepare(input, overrides)?;
        Ok(inv.run_async().await)
    }
}

/// Programme à lancer et arguments placés avant ceux de Compass
/// (`bundle exec compass ...`).
fn program_and_prefix(r: &Resolved) -> (String, Vec<String>) {
    let exe = r
        .options
        .executable
        .as_ref()
        .map_or(DEFAULT_EXECUTABLE, |p| p.as_str())
        .to_string();
    if Options::on(r.options.bundle_exec) {
        ("bundle".to_string(), vec!["exec".to_string(), exe])
    } else {
        (exe, Vec::new())
    }
}
