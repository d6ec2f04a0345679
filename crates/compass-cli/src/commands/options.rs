use camino::Utf8PathBuf;
use clap::Args as ClapArgs;
use compass_driver::{OneOrMany, Options, OutputStyle};

/// Options Compass communes aux sous-commandes. Elles priment sur le fichier
/// `compass.toml`, lui-même prioritaire sur les valeurs par défaut.
#[derive(ClapArgs, Debug, Default)]
pub struct OptionArgs {
    /// Fichier d'options TOML (défaut: ./compass.toml s'il existe)
    #[arg(long, value_name = "TOML")]
    pub options: Option<Utf8PathBuf>,

    /// Racine du projet (défaut: dossier courant)
    #[arg(long)]
    pub project: Option<Utf8PathBuf>,
    /// Dossier CSS de sortie
    #[arg(long)]
    pub css: Option<Utf8PathBuf>,
    /// Dossier des sources Sass
    #[arg(long)]
    pub sass: Option<Utf8PathBuf>,
    #[arg(long)]
    pub image: Option<Utf8PathBuf>,
    #[arg(long)]
    pub javascript: Option<Utf8PathBuf>,
    #[arg(long)]
    pub font: Option<Utf8PathBuf>,
    #[arg(long)]
    pub generated_images_path: Option<Utf8PathBuf>,

    /// nested|expanded|compact|compressed
    #[arg(short, long)]
    pub style: Option<OutputStyle>,
    /// Racine d'import (répétable, l'ordre compte)
    #[arg(short = 'I', long)]
    pub import_path: Vec<Utf8PathBuf>,
    /// Extension Compass à charger (répétable)
    #[arg(short, long)]
    pub require: Vec<String>,
    #[arg(long)]
    pub load_all: Option<Utf8PathBuf>,
    /// config.rb : fait foi pour les dossiers
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<Utf8PathBuf>,
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Passe --quiet à Compass
    #[arg(short, long)]
    pub quiet: bool,
    #[arg(long)]
    pub sourcemap: bool,
    #[arg(long)]
    pub boring: bool,
    #[arg(long)]
    pub relative_assets: bool,
    #[arg(long)]
    pub no_line_comments: bool,
    #[arg(long)]
    pub debug_info: bool,
    #[arg(long)]
    pub time: bool,
    #[arg(long)]
    pub force: bool,
    /// Lance via `bundle exec compass`
    #[arg(long)]
    pub bundle_exec: bool,

    /// Binaire compass à utiliser
    #[arg(long, env = "COMPASS_BIN")]
    pub compass_bin: Option<Utf8PathBuf>,
}

impl OptionArgs {
    /// Overrides : seuls les drapeaux effectivement passés sont renseignés,
    /// pour ne pas écraser le fichier d'options avec des `false`.
    pub fn to_overrides(&self) -> Options {
        Options {
            project: self.project.clone(),
            css: self.css.clone(),
            sass: self.sass.clone(),
            image: self.image.clone(),
            javascript: self.javascript.clone(),
            font: self.font.clone(),
            generated_images_path: self.generated_images_path.clone(),
            style: self.style,
            import_path: one_or_many(&self.import_path),
            require: one_or_many(&self.require),
            load_all: self.load_all.clone(),
            config_file: self.config_file.clone(),
            environment: self.environment.clone(),
            logging: self.quiet.then_some(false),
            sourcemap: set(self.sourcemap),
            boring: set(self.boring),
            relative: set(self.relative_assets),
            comments: self.no_line_comments.then_some(false),
            debug: set(self.debug_info),
            time: set(self.time),
            force: set(self.force),
            bundle_exec: set(self.bundle_exec),
            executable: self.compass_bin.clone(),
        }
    }
}

fn set(flag: bool) -> Option<bool> { flag.then_some(true) }

fn one_or_many<T: Clone>(v: &[T]) -> Option<OneOrMany<T>> {
    match v {
        [] => None,
        [one] => Some(OneOrMany::One(one.clone())),
        many => Some(OneOrMany::Many(many.to_vec())),
    }
}
