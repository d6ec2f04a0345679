//! Options résolues → arguments de `compass`.
//!
//! Ordre stable : dossiers, style, environnement, `-I`, `--require`,
//! `--load-all`, interrupteurs, `--quiet`, puis `compile <fichier>`.

use camino::Utf8Path;

use crate::config::{Options, Resolved};

/// Construit la liste d'arguments (sans le programme). Fonction pure.
///
/// Avec `config_file`, aucun dossier n'est passé (`--app-dir`, `--css-dir`,
/// `--sass-dir`, `--images-dir`, ...) même si les options correspondantes
/// sont renseignées : le fichier de config fait foi. Les interrupteurs
/// (`--quiet`, `--sourcemap`, ...) restent transmis.
pub fn build_args(input: &Utf8Path, r: &Resolved) -> Vec<String> {
    let o = &r.options;
    let mut args = Vec::new();

    if let Some(cfg) = &o.config_file {
        push(&mut args, "--config", cfg.as_str());
    } else {
        push(&mut args, "--app-dir", r.project.as_str());
        push(&mut args, "--sass-dir", r.sass_dir.as_str());
        push(&mut args, "--css-dir", r.css_dir.as_str());
        let assets = [
            ("--images-dir", &o.image),
            ("--javascripts-dir", &o.javascript),
            ("--fonts-dir", &o.font),
            ("--generated-images-path", &o.generated_images_path),
        ];
        for (flag, dir) in assets {
            if let Some(d) = dir {
                push(&mut args, flag, d.as_str());
            }
        }
    }

    if let Some(style) = o.style {
        push(&mut args, "--output-style", style.as_str());
    }
    if let Some(env) = &o.environment {
        push(&mut args, "--environment", env);
    }
    for p in o.import_path.iter().flat_map(|x| x.as_slice()) {
        push(&mut args, "-I", p.as_str());
    }
    for name in o.require.iter().flat_map(|x| x.as_slice()) {
        push(&mut args, "--require", name);
    }
    if let Some(dir) = &o.load_all {
        push(&mut args, "--load-all", dir.as_str());
    }

    let switches = [
        (o.comments == Some(false), "--no-line-comments"),
        (Options::on(o.relative), "--relative-assets"),
        (Options::on(o.debug), "--debug-info"),
        (Options::on(o.time), "--time"),
        (Options::on(o.boring), "--boring"),
        (Options::on(o.sourcemap), "--sourcemap"),
        (Options::on(o.force), "--force"),
        (o.logging == Some(false), "--quiet"),
    ];
    args.extend(switches.iter().filter(|(on, _)| *on).map(|(_, f)| (*f).to_string()));

    args.push("compile".into());
    args.push(input.as_str().to_string());
    args
}

fn push(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(value.to_string());
}
