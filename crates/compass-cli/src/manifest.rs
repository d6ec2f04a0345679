//! Fichier d'options `compass.toml` : mêmes clés que `compass_driver::Options`
//! (clés inconnues ignorées).
//!
//! Un `project` absent ou relatif est résolu depuis le dossier du fichier.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::eyre::{Result, WrapErr};
use compass_driver::Options;

pub const DEFAULT_FILE: &str = "compass.toml";

/// `explicit` si fourni, sinon `./compass.toml` s'il existe, sinon rien.
pub fn load(explicit: Option<&Utf8Path>) -> Result<Options> {
    match explicit {
        Some(path) => read(path),
        None if Utf8Path::new(DEFAULT_FILE).is_file() => read(Utf8Path::new(DEFAULT_FILE)),
        None => Ok(Options::default()),
    }
}

pub fn read(path: &Utf8Path) -> Result<Options> {
    let s = fs::read_to_string(path).wrap_err_with(|| format!("lecture {path}"))?;
    let mut opts: Options = toml::from_str(&s).wrap_err_with(|| format!("TOML invalide: {path}"))?;

    let base = path.parent().map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf);
    let base = if base.as_str().is_empty() { Utf8PathBuf::from(".") } else { base };
    opts.project = Some(match opts.project.take() {
        Some(p) => base.join(p),
        None => base,
    });
    tracing::info!(file = %path, "options chargées");
    Ok(opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_driver::{OneOrMany, OutputStyle};
    use indoc::indoc;

    fn write(dir: &tempfile::TempDir, body: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(DEFAULT_FILE)).unwrap();
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reads_keys_and_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, indoc! {r#"
            style = "compressed"
            sass = "./src/sass"
            import_path = ["bower_components", "vendor"]
            require = "susy"
            logging = false
            some_future_key = 42
        "#});
        let o = read(&path).unwrap();
        assert_eq!(o.style, Some(OutputStyle::Compressed));
        assert_eq!(o.sass.as_deref(), Some(Utf8Path::new("./src/sass")));
        assert_eq!(o.import_path.as_ref().map(|x| x.as_slice().len()), Some(2));
        assert_eq!(o.require, Some(OneOrMany::One("susy".to_string())));
        assert_eq!(o.logging, Some(false));
    }

    #[test]
    fn project_defaults_to_file_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "css = \"public\"\n");
        let o = read(&path).unwrap();
        assert_eq!(o.project.as_deref(), path.parent());
    }

    #[test]
    fn relative_project_is_joined() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "project = \"site\"\n");
        let o = read(&path).unwrap();
        assert_eq!(o.project, path.parent().map(|p| p.join("site")));
    }

    #[test]
    fn bad_style_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "style = \"minified\"\n");
        let err = read(&path).unwrap_err();
        assert!(format!("{err:?}").contains("minified"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load(Some(Utf8Path::new("/nonexistent/compass.toml"))).is_err());
    }
}
