use camino::Utf8PathBuf;
use clap::Args as ClapArgs;
use color_eyre::eyre::Result;
use compass_driver::Compass;

use super::options::OptionArgs;
use crate::manifest;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Feuille de style (.scss / .sass)
    pub file: Utf8PathBuf,

    #[command(flatten)]
    pub opts: OptionArgs,
}

pub fn exec(args: Args) -> Result<()> {
    let compass = Compass::with_defaults(manifest::load(args.opts.options.as_deref())?);
    let inv = compass.prepare(&args.file, &args.opts.to_overrides())?;
    println!("cwd    : {}", inv.cwd);
    println!("cmd    : {}", inv.display());
    println!("sortie : {}", inv.output);
    Ok(())
}
