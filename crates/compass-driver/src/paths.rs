//! Prédiction du chemin CSS produit par Compass.
//!
//! Transformation purement textuelle, indépendante du succès de la
//! compilation : la racine sass est remplacée par la racine css (par
//! segments de chemin, jamais par sous-chaîne) puis `.scss`/`.sass` → `.css`.

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::clean;
use crate::error::{Error, Result};

const STYLESHEET_EXTS: [&str; 2] = ["scss", "sass"];

/// `input`, `sass_root` et `css_root` doivent partager la même base (tous
/// absolus, ou tous relatifs à la racine du projet).
pub fn resolve_output(input: &Utf8Path, sass_root: &Utf8Path, css_root: &Utf8Path) -> Result<Utf8PathBuf> {
    if !input.extension().is_some_and(|e| STYLESHEET_EXTS.contains(&e)) {
        return Err(Error::NotStylesheet(input.to_path_buf()));
    }
    let input_c = clean(input);
    let sass_c = clean(sass_root);
    let rest = input_c
        .strip_prefix(&sass_c)
        .map_err(|_| Error::OutsideSassDir { input: input.to_path_buf(), sass: sass_root.to_path_buf() })?;

    let mut out = clean(css_root).join(rest);
    out.set_extension("css");
    Ok(out)
}
