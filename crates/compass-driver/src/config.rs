//! config.rs — Options de compilation Compass.
//!
//! - Structure explicite, tous les champs optionnels (`Options`)
//! - Defaults purs (`Options::defaults()`), pas d'état global
//! - Fusion defaults ← overrides (`Options::merge`, `apply_overrides`)
//! - Résolution vers les chemins effectifs (`Options::resolve` → `Resolved`)
//!
//! Désérialisable (TOML/JSON via serde). Politique pour les clés inconnues :
//! elles sont **ignorées**, pour rester compatible avec des fichiers écrits
//! pour une version plus récente.

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::config_rb;
use crate::error::{Error, Result};

/* ─────────────────────────── Types publics ─────────────────────────── */

/// Mode de formatage du CSS produit (`--output-style`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputStyle { Nested, Expanded, Compact, Compressed }

impl OutputStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nested => "nested",
            Self::Expanded => "expanded",
            Self::Compact => "compact",
            Self::Compressed => "compressed",
        }
    }
}

impl FromStr for OutputStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "nested" => Ok(Self::Nested),
            "expanded" => Ok(Self::Expanded),
            "compact" => Ok(Self::Compact),
            "compressed" => Ok(Self::Compressed),
            _ => Err(Error::InvalidStyle(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputStyle {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Valeur simple ou liste ordonnée (`import_path`, `require`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Vue normalisée : une valeur simple devient une liste d'un élément.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(x) => std::slice::from_ref(x),
            Self::Many(v) => v.as_slice(),
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(x: T) -> Self { Self::One(x) }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(v: Vec<T>) -> Self { Self::Many(v) }
}

/// Options d'une invocation. `None` = « non fourni » (la fusion garde la
/// valeur par défaut).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /* Dossiers */
    /// Racine du projet (`--app-dir`, dossier courant du processus). Défaut : cwd.
    pub project: Option<Utf8PathBuf>,
    /// Dossier CSS de sortie, relatif à `project` sauf s'il est absolu.
    pub css: Option<Utf8PathBuf>,
    /// Dossier des sources Sass, relatif à `project` sauf s'il est absolu.
    pub sass: Option<Utf8PathBuf>,
    pub image: Option<Utf8PathBuf>,
    pub javascript: Option<Utf8PathBuf>,
    pub font: Option<Utf8PathBuf>,
    pub generated_images_path: Option<Utf8PathBuf>,

    /* Compilation */
    pub style: Option<OutputStyle>,
    /// Racines d'import supplémentaires, l'ordre fixe la priorité de recherche.
    pub import_path: Option<OneOrMany<Utf8PathBuf>>,
    /// Extensions Compass à charger, dans l'ordre.
    pub require: Option<OneOrMany<String>>,
    pub load_all: Option<Utf8PathBuf>,
    /// `config.rb` alternatif. S'il est présent il fait foi pour les dossiers :
    /// `project`, `css`, `sass`, `image` (et les autres dossiers d'assets)
    /// ne sont plus passés en ligne de commande.
    pub config_file: Option<Utf8PathBuf>,
    pub environment: Option<String>,

    /* Interrupteurs */
    /// `false` → `--quiet`.
    pub logging: Option<bool>,
    pub sourcemap: Option<bool>,
    pub boring: Option<bool>,
    pub relative: Option<bool>,
    /// `Some(false)` → `--no-line-comments`.
    pub comments: Option<bool>,
    pub debug: Option<bool>,
    pub time: Option<bool>,
    pub force: Option<bool>,

    /* Exécutable */
    /// Passe par `bundle exec compass`.
    pub bundle_exec: Option<bool>,
    /// Binaire à lancer à la place de `compass`.
    pub executable: Option<Utf8PathBuf>,
}

/// Options fusionnées et chemins rendus exploitables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// Racine absolue du projet (dossier courant du processus enfant).
    pub project: Utf8PathBuf,
    /// Forme passée à `--sass-dir` (relative au projet si possible).
    pub sass_dir: Utf8PathBuf,
    /// Forme passée à `--css-dir`.
    pub css_dir: Utf8PathBuf,
    /// Racine absolue des sources, utilisée pour prédire la sortie.
    pub sass_root: Utf8PathBuf,
    /// Racine absolue du CSS, utilisée pour prédire la sortie.
    pub css_root: Utf8PathBuf,
    pub options: Options,
}

/* ─────────────────────── Defaults & fusion ─────────────────────── */

impl Options {
    /// Valeurs par défaut (pures : pas de lecture d'ENV ni de cwd ici).
    pub fn defaults() -> Self {
        Self {
            css: Some("css".into()),
            sass: Some("sass".into()),
            logging: Some(true),
            ..Self::default()
        }
    }

    /// `defaults` ← `overrides` : chaque valeur fournie dans `overrides` gagne.
    pub fn merge(defaults: &Self, overrides: &Self) -> Self {
        let mut out = defaults.clone();
        out.apply_overrides(overrides);
        out
    }

    /// Applique des overrides “dernier mot”.
    pub fn apply_overrides(&mut self, o: &Self) {
        if let Some(x) = &o.project               { self.project = Some(x.clone()); }
        if let Some(x) = &o.css                   { self.css = Some(x.clone()); }
        if let Some(x) = &o.sass                  { self.sass = Some(x.clone()); }
        if let Some(x) = &o.image                 { self.image = Some(x.clone()); }
        if let Some(x) = &o.javascript            { self.javascript = Some(x.clone()); }
        if let Some(x) = &o.font                  { self.font = Some(x.clone()); }
        if let Some(x) = &o.generated_images_path { self.generated_images_path = Some(x.clone()); }

        if let Some(x) = o.style                  { self.style = Some(x); }
        if let Some(x) = &o.import_path           { self.import_path = Some(x.clone()); }
        if let Some(x) = &o.require               { self.require = Some(x.clone()); }
        if let Some(x) = &o.load_all              { self.load_all = Some(x.clone()); }
        if let Some(x) = &o.config_file           { self.config_file = Some(x.clone()); }
        if let Some(x) = &o.environment           { self.environment = Some(x.clone()); }

        if let Some(x) = o.logging                { self.logging = Some(x); }
        if let Some(x) = o.sourcemap              { self.sourcemap = Some(x); }
        if let Some(x) = o.boring                 { self.boring = Some(x); }
        if let Some(x) = o.relative               { self.relative = Some(x); }
        if let Some(x) = o.comments               { self.comments = Some(x); }
        if let Some(x) = o.debug                  { self.debug = Some(x); }
        if let Some(x) = o.time                   { self.time = Some(x); }
        if let Some(x) = o.force                  { self.force = Some(x); }

        if let Some(x) = o.bundle_exec            { self.bundle_exec = Some(x); }
        if let Some(x) = &o.executable            { self.executable = Some(x.clone()); }
    }

    /// Interrupteur booléen : absent = `false`.
    pub(crate) fn on(flag: Option<bool>) -> bool { flag.unwrap_or(false) }

    /* ─────────────────────────── Résolution ─────────────────────────── */

    /// Résout les chemins par rapport à `cwd` (utilisé quand `project` est
    /// absent ou relatif). La racine obtenue doit être absolue.
    ///
    /// `sass`/`css` absolus et situés sous `project` deviennent relatifs au
    /// projet ; hors du projet ils sont transmis tels quels (absolus).
    /// Avec `config_file`, les racines servant à prédire la sortie viennent de
    /// `sass_dir`/`css_dir` du fichier, à défaut des options.
    pub fn resolve(&self, cwd: &Utf8Path) -> Result<Resolved> {
        let project = match &self.project {
            Some(p) => clean(&cwd.join(p)),
            None => clean(cwd),
        };
        if !project.is_absolute() {
            // `clean(".")` est vide : on affiche `.`
            let shown = if project.as_str().is_empty() { Utf8PathBuf::from(".") } else { project };
            return Err(Error::RelativeProject(shown));
        }
        let sass = non_empty(self.sass.as_deref(), "sass")?.unwrap_or(Utf8Path::new("sass"));
        let css = non_empty(self.css.as_deref(), "css")?.unwrap_or(Utf8Path::new("css"));
        let sass_dir = normalize_dir(sass, &project);
        let css_dir = normalize_dir(css, &project);

        let (sass_src, css_src) = match &self.config_file {
            Some(file) => {
                let dirs = config_rb::read(&project.join(file))?;
                (
                    dirs.sass_dir.unwrap_or_else(|| sass_dir.clone()),
                    dirs.css_dir.unwrap_or_else(|| css_dir.clone()),
                )
            }
            None => (sass_dir.clone(), css_dir.clone()),
        };

        Ok(Resolved {
            sass_root: clean(&project.join(sass_src)),
            css_root: clean(&project.join(css_src)),
            project,
            sass_dir,
            css_dir,
            options: self.clone(),
        })
    }
}

impl Resolved {
    /// Chemin d'entrée tel que le voit le processus enfant (cwd = projet).
    pub fn absolute_input(&self, input: &Utf8Path) -> Utf8PathBuf {
        clean(&self.project.join(input))
    }
}

/* ─────────────────────────── Chemins ─────────────────────────── */

fn non_empty<'a>(dir: Option<&'a Utf8Path>, key: &'static str) -> Result<Option<&'a Utf8Path>> {
    match dir {
        Some(d) if d.as_str().trim().is_empty() => Err(Error::EmptyDir(key)),
        other => Ok(other),
    }
}

/// Forme d'un dossier pour la ligne de commande : sans `./` de tête ni `/`
/// final ; absolu sous `project` → relatif ; absolu ailleurs → inchangé.
pub fn normalize_dir(dir: &Utf8Path, project: &Utf8Path) -> Utf8PathBuf {
    let cleaned = clean(dir);
    let out = if cleaned.is_absolute() {
        match cleaned.strip_prefix(project) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => cleaned,
        }
    } else {
        cleaned
    };
    if out.as_str().is_empty() { Utf8PathBuf::from(".") } else { out }
}

/// Normalisation lexicale : supprime les `.`, replie les `..` quand c'est
/// possible. Ne touche pas au système de fichiers.
pub fn clean(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for c in path.components() {
        match c {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                let last_is_normal = matches!(out.components().next_back(), Some(Utf8Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.is_absolute() {
                    out.push("..");
                }
            }
            other => out.push(other.as_str()),
        }
    }
    out
}

/* ───────────────────────────── Tests ───────────────────────────── */
