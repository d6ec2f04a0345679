//! Lancement du processus `compass` et collecte de ses sorties.
//!
//! Un processus par invocation, stdout/stderr bufferisés jusqu'à la sortie,
//! résultat livré une seule fois. Pas de timeout, pas d'annulation, pas de
//! relance : un compilateur bloqué bloque la complétion.

use std::io;
use std::process::{ExitStatus, Output, Stdio};
use std::thread::JoinHandle;

use camino::Utf8PathBuf;

/// Code synthétique : exécutable introuvable.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Code synthétique : exécutable non lançable (permissions).
pub const EXIT_NOT_EXECUTABLE: i32 = 126;
/// Code synthétique : autre échec de lancement.
pub const EXIT_LAUNCH_FAILED: i32 = 1;

/// Requête figée : programme, arguments, dossier courant, sortie prédite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Utf8PathBuf,
    pub output: Utf8PathBuf,
}

/// Résultat d'une invocation. `output` est la prédiction, qu'elle ait réussi
/// ou non : consulter `code`/`stderr` pour juger du succès.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
    pub output: Utf8PathBuf,
}

impl Compiled {
    pub fn success(&self) -> bool { self.code == 0 }
}

impl Invocation {
    /// Ligne de commande lisible (logs, dry-run).
    pub fn display(&self) -> String {
        let mut s = self.program.clone();
        for a in &self.args {
            s.push(' ');
            if a.is_empty() || a.contains(char::is_whitespace) {
                s.push('\'');
                s.push_str(a);
                s.push('\'');
            } else {
                s.push_str(a);
            }
        }
        s
    }

    fn command(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.cwd).stdin(Stdio::null());
        cmd
    }

    /// Exécution bloquante.
    pub fn run(&self) -> Compiled {
        tracing::debug!(cmd = %self.display(), cwd = %self.cwd, "lancement");
        if let Some(c) = self.missing_cwd() {
            return c;
        }
        let res = self.command().output();
        self.finish(res)
    }

    /// Exécution sur un thread dédié ; `done(code, stdout, stderr, output)`
    /// est appelé exactement une fois, depuis ce thread.
    pub fn spawn<F>(self, done: F) -> JoinHandle<()>
    where
        F: FnOnce(i32, String, String, Utf8PathBuf) + Send + 'static,
    {
        std::thread::spawn(move || {
            let Compiled { code, stdout, stderr, output } = self.run();
            done(code, stdout, stderr, output);
        })
    }

    /// Exécution asynchrone (runtime tokio requis).
    pub async fn run_async(&self) -> Compiled {
        tracing::debug!(cmd = %self.display(), cwd = %self.cwd, "lancement (async)");
        if let Some(c) = self.missing_cwd() {
            return c;
        }
        let res = tokio::process::Command::from(self.command()).output().await;
        self.finish(res)
    }

    /// Un dossier courant absent ferait échouer le lancement avec `NotFound`,
    /// confondu avec un exécutable introuvable.
    fn missing_cwd(&self) -> Option<Compiled> {
        if self.cwd.is_dir() {
            return None;
        }
        tracing::debug!(cwd = %self.cwd, "dossier de travail introuvable");
        Some(Compiled {
            code: EXIT_LAUNCH_FAILED,
            stdout: String::new(),
            stderr: format!("impossible de lancer `{}`: dossier de travail `{}` introuvable", self.program, self.cwd),
            output: self.output.clone(),
        })
    }

    fn finish(&self, res: io::Result<Output>) -> Compiled {
        let compiled = match res {
            Ok(out) => Compiled {
                code: exit_code(out.status),
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                output: self.output.clone(),
            },
            Err(e) => Compiled {
                code: launch_failure_code(&e),
                stdout: String::new(),
                stderr: format!("impossible de lancer `{}`: {e}", self.program),
                output: self.output.clone(),
            },
        };
        tracing::debug!(code = compiled.code, output = %compiled.output, "terminé");
        compiled
    }
}

fn launch_failure_code(e: &io::Error) -> i32 {
    match e.kind() {
        io::ErrorKind::NotFound => EXIT_NOT_FOUND,
        io::ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
        _ => EXIT_LAUNCH_FAILED,
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(c) = status.code() {
        return c;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    EXIT_LAUNCH_FAILED
}
