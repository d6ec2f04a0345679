//! Lecture minimale d'un `config.rb` Compass : seules les affectations
//! `sass_dir = "..."` et `css_dir = '...'` nous intéressent (prédiction du
//! chemin de sortie). Tout le reste est laissé à Compass.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RbDirs {
    pub sass_dir: Option<Utf8PathBuf>,
    pub css_dir: Option<Utf8PathBuf>,
}

pub fn read(path: &Utf8Path) -> Result<RbDirs> {
    let src = std::fs::read_to_string(path)
        .map_err(|source| Error::ConfigFile { path: path.to_path_buf(), source })?;
    let dirs = parse(&src);
    tracing::trace!(config = %path, ?dirs, "dossiers lus dans le config.rb");
    Ok(dirs)
}

pub fn parse(src: &str) -> RbDirs {
    let mut dirs = RbDirs::default();
    for line in src.lines() {
        let Some((key, value)) = assignment(line) else { continue };
        match key {
            "sass_dir" => dirs.sass_dir = Some(value.into()),
            "css_dir" => dirs.css_dir = Some(value.into()),
            _ => {}
        }
    }
    dirs
}

/// `clé = "littéral"` → `(clé, littéral)`. Les valeurs non littérales
/// (expressions Ruby) sont ignorées.
fn assignment(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let rest = rest.trim_start();
    let quote = rest.chars().next().filter(|q| *q == '"' || *q == '\'')?;
    let body = &rest[1..];
    let end = body.find(quote)?;
    // après la chaîne : rien, ou un commentaire
    let tail = body[end + 1..].trim();
    if !(tail.is_empty() || tail.starts_with('#')) {
        return None;
    }
    Some((key, &body[..end]))
}
