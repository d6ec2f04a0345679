use camino::Utf8PathBuf;
use thiserror::Error;

/// Erreurs de configuration, détectées avant tout lancement de processus.
///
/// Les échecs de lancement et de compilation ne passent jamais par ce type :
/// ils arrivent dans [`crate::Compiled`] (code de sortie + stderr).
#[derive(Debug, Error)]
pub enum Error {
    #[error("style de sortie inconnu `{0}` (attendu: nested, expanded, compact, compressed)")]
    InvalidStyle(String),

    #[error("l'option `{0}` ne peut pas être vide")]
    EmptyDir(&'static str),

    #[error("`{input}` n'est pas sous le dossier sass `{sass}`")]
    OutsideSassDir { input: Utf8PathBuf, sass: Utf8PathBuf },

    #[error("`{0}` n'est pas une feuille de style (.scss ou .sass attendu)")]
    NotStylesheet(Utf8PathBuf),

    #[error("lecture du fichier de config `{path}` impossible: {source}")]
    ConfigFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dossier courant indéterminable: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("racine de projet non absolue `{0}` (dossier courant relatif ?)")]
    RelativeProject(Utf8PathBuf),

    #[error("chemin non UTF-8: {0}")]
    NonUtf8Path(String),
}

pub type Result<T> = std::result::Result<T, Error>;
