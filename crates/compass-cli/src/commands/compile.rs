use std::io::Write;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Args as ClapArgs;
use color_eyre::eyre::{Result, WrapErr};
use compass_driver::{Compass, Compiled, EXIT_LAUNCH_FAILED};
use tokio::task::JoinHandle;

use super::options::OptionArgs;
use crate::manifest;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Feuilles de style à compiler (.scss / .sass)
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    #[command(flatten)]
    pub opts: OptionArgs,
}

pub fn exec(args: Args) -> Result<ExitCode> {
    let rt = tokio::runtime::Runtime::new().wrap_err("démarrage du runtime tokio")?;
    rt.block_on(run(args))
}

async fn run(args: Args) -> Result<ExitCode> {
    let compass = Compass::with_defaults(manifest::load(args.opts.options.as_deref())?);
    let overrides = args.opts.to_overrides();

    // Toutes les erreurs de configuration sortent avant le premier lancement.
    let invocations = args
        .files
        .iter()
        .map(|f| compass.prepare(f, &overrides).wrap_err_with(|| format!("configuration invalide pour {f}")))
        .collect::<Result<Vec<_>>>()?;

    let tasks: Vec<_> = invocations
        .into_iter()
        .map(|inv| tokio::spawn(async move { inv.run_async().await }))
        .collect();

    let first_failure = drain(tasks, report).await?;
    Ok(ExitCode::from(exit_code(first_failure)))
}

/// Attend chaque tâche dans l'ordre et rapporte son résultat. Une tâche
/// interrompue (panique, annulation) compte comme un échec de lancement sans
/// empêcher le rapport des suivantes. Renvoie le premier code d'échec.
async fn drain<F>(tasks: Vec<JoinHandle<Compiled>>, mut report: F) -> Result<Option<i32>>
where
    F: FnMut(&Compiled) -> Result<()>,
{
    let mut first_failure = None;
    for task in tasks {
        let code = match task.await {
            Ok(compiled) => {
                report(&compiled)?;
                compiled.code
            }
            Err(e) => {
                tracing::error!(error = %e, "tâche de compilation interrompue");
                eprintln!("tâche de compilation interrompue: {e}");
                EXIT_LAUNCH_FAILED
            }
        };
        if code != 0 && first_failure.is_none() {
            first_failure = Some(code);
        }
    }
    Ok(first_failure)
}

/// Code de sortie du processus : jamais 0 en cas d'échec.
fn exit_code(first_failure: Option<i32>) -> u8 {
    first_failure.map_or(0, |code| u8::try_from(code).unwrap_or(1).max(1))
}

/// Relaie les flux de Compass tels quels, puis le chemin produit.
fn report(c: &Compiled) -> Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(c.stdout.as_bytes())?;
    eprint!("{}", c.stderr);
    if c.success() {
        tracing::info!(output = %c.output, "compilé");
        writeln!(out, "{}", c.output)?;
    } else {
        tracing::warn!(code = c.code, output = %c.output, "échec de compass");
    }
    Ok(())
}
