//! compass-driver — pilote du compilateur de feuilles de style Compass.
//! - Traduit des `Options` typées en ligne de commande `compass ... compile <fichier>`
//! - Lance un processus par fichier, bufferise stdout/stderr
//! - Prédit le chemin CSS produit (dossier sass → dossier css, extension `.css`)
//! - Livre `(code, stdout, stderr, chemin)` une seule fois : retour bloquant,
//!   callback sur thread, ou future tokio.
//!
//! Ne journalise rien lui-même : les évènements `tracing` émis sont à
//! l'appelant d'en faire quelque chose.

pub mod args;
pub mod config;
pub mod config_rb;
pub mod error;
pub mod paths;
pub mod pipeline;
pub mod runner;

pub use args::build_args;
pub use config::{OneOrMany, Options, OutputStyle, Resolved};
pub use error::{Error, Result};
pub use paths::resolve_output;
pub use pipeline::{Compass, DEFAULT_EXECUTABLE};
pub use runner::{Compiled, Invocation, EXIT_LAUNCH_FAILED, EXIT_NOT_EXECUTABLE, EXIT_NOT_FOUND};
