use clap::{Args as ClapArgs, CommandFactory};
use clap_complete::{generate, shells::{Bash, Elvish, Fish, PowerShell, Zsh}};
use std::io;
use std::path::PathBuf;

const BIN: &str = "compass-run";

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Shell cible: bash|zsh|fish|powershell|elvish
    #[arg(long, value_parser = ["bash", "zsh", "fish", "powershell", "elvish"])]
    pub shell: String,
    /// Dossier de sortie (stdout si omis)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

pub fn exec(args: Args) -> color_eyre::Result<()> {
    let mut cmd = crate::Cli::command();

    let mut writer: Box<dyn io::Write> = if let Some(dir) = args.out_dir {
        std::fs::create_dir_all(&dir)?;
        Box::new(std::fs::File::create(dir.join(BIN))?)
    } else {
        Box::new(io::stdout())
    };

    match args.shell.as_str() {
        "bash"       => generate(Bash,       &mut cmd, BIN, &mut writer),
        "zsh"        => generate(Zsh,        &mut cmd, BIN, &mut writer),
        "fish"       => generate(Fish,       &mut cmd, BIN, &mut writer),
        "powershell" => generate(PowerShell, &mut cmd, BIN, &mut writer),
        "elvish"     => generate(Elvish,     &mut cmd, BIN, &mut writer),
        other => color_eyre::eyre::bail!("shell non supporté: {other}"),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_bash_completion_file() {
        let dir = tempfile::tempdir().unwrap();
        exec(Args { shell: "bash".into(), out_dir: Some(dir.path().to_path_buf()) }).unwrap();
        let script = std::fs::read_to_string(dir.path().join(BIN)).unwrap();
        assert!(script.contains("compass-run"));
    }
}
