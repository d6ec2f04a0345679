//! Bout-en-bout avec un faux `compass` (script shell) : on vérifie l'argv
//! reçu, le dossier courant, les flux et le chemin prédit.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;

use camino::{Utf8Path, Utf8PathBuf};
use compass_driver::{Compass, Options, OutputStyle, EXIT_NOT_FOUND};
use indoc::indoc;
use pretty_assertions::assert_eq;

struct Project {
    _dir: tempfile::TempDir,
    root: Utf8PathBuf,
    bin: Utf8PathBuf,
}

/// Projet jetable + faux compilateur qui écrit `pwd` puis chaque argument
/// sur stdout, « warn » sur stderr, et sort avec `$FAKE_CODE` (0 par défaut).
fn project() -> Project {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().canonicalize().unwrap()).unwrap();
    fs::create_dir_all(root.join("sass/base")).unwrap();
    fs::write(root.join("sass/compile.scss"), "a { b: c }\n").unwrap();
    fs::write(root.join("sass/base/compile.scss"), "a { b: c }\n").unwrap();

    let bin = root.join("fake-compass");
    fs::write(
        &bin,
        indoc! {r#"
            #!/bin/sh
            pwd
            for a in "$@"; do echo "$a"; done
            echo warn >&2
            exit "${FAKE_CODE:-0}"
        "#},
    )
    .unwrap();
    fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
    Project { _dir: dir, root, bin }
}

fn opts(p: &Project) -> Options {
    Options {
        project: Some(p.root.clone()),
        executable: Some(p.bin.clone()),
        ..Options::default()
    }
}

#[test]
fn compile_compressed_reports_four_values() {
    let p = project();
    let o = Options { style: Some(OutputStyle::Compressed), logging: Some(false), ..opts(&p) };
    let c = Compass::new().compile(Utf8Path::new("sass/compile.scss"), &o).unwrap();

    assert_eq!(c.code, 0);
    assert_eq!(c.stderr, "warn\n");
    assert_eq!(c.output, p.root.join("css/compile.css"));
    let lines: Vec<&str> = c.stdout.lines().collect();
    assert_eq!(lines[0], p.root.as_str());
    assert_eq!(
        &lines[1..],
        [
            "--app-dir", p.root.as_str(),
            "--sass-dir", "sass",
            "--css-dir", "css",
            "--output-style", "compressed",
            "--quiet",
            "compile", "sass/compile.scss",
        ]
    );
}

#[test]
fn nested_source_keeps_subdirectory() {
    let p = project();
    let c = Compass::new().compile(Utf8Path::new("sass/base/compile.scss"), &opts(&p)).unwrap();
    assert_eq!(c.output, p.root.join("css/base/compile.css"));
}

#[test]
fn config_file_drives_output_path() {
    let p = project();
    fs::write(
        p.root.join("config.rb"),
        indoc! {r#"
            css_dir = "public/stylesheets"
            sass_dir = "sass"
        "#},
    )
    .unwrap();
    let o = Options {
        config_file: Some(p.root.join("config.rb")),
        css: Some("ignored".into()),
        environment: Some("development".into()),
        ..opts(&p)
    };
    let c = Compass::new().compile(Utf8Path::new("sass/base/compile.scss"), &o).unwrap();
    assert_eq!(c.output, p.root.join("public/stylesheets/base/compile.css"));
    assert!(!c.stdout.lines().any(|l| l == "--css-dir" || l == "--app-dir" || l == "--sass-dir"));
    assert!(c.stdout.contains("--config\n"));
    assert!(c.stdout.contains("--environment\ndevelopment\n"));
}

#[test]
fn compiler_failure_is_passed_through() {
    let p = project();
    let script = p.root.join("failing-compass");
    fs::write(&script, "#!/bin/sh\necho 'Syntax error' >&2\nexit 1\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    let o = Options { executable: Some(script), ..opts(&p) };
    let c = Compass::new().compile(Utf8Path::new("sass/compile.scss"), &o).unwrap();
    assert_eq!(c.code, 1);
    assert_eq!(c.stderr, "Syntax error\n");
    // prédiction même en cas d'échec
    assert_eq!(c.output, p.root.join("css/compile.css"));
}

#[test]
fn launch_failure_goes_through_callback() {
    let p = project();
    let o = Options { executable: Some("compass-qui-n-existe-pas".into()), ..opts(&p) };
    let (tx, rx) = std::sync::mpsc::channel();
    let h = Compass::new()
        .compile_with(Utf8Path::new("sass/compile.scss"), &o, move |code, stdout, stderr, path| {
            tx.send((code, stdout, stderr, path)).unwrap();
        })
        .unwrap();
    h.join().unwrap();
    let (code, stdout, stderr, path) = rx.recv().unwrap();
    assert_eq!(code, EXIT_NOT_FOUND);
    assert!(stdout.is_empty());
    assert!(stderr.contains("compass-qui-n-existe-pas"));
    assert_eq!(path, p.root.join("css/compile.css"));
}

#[test]
fn not_executable_is_126() {
    let p = project();
    let script = p.root.join("not-exec");
    fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();
    let o = Options { executable: Some(script), ..opts(&p) };
    let c = Compass::new().compile(Utf8Path::new("sass/compile.scss"), &o).unwrap();
    assert_eq!(c.code, compass_driver::EXIT_NOT_EXECUTABLE);
    assert!(!c.stderr.is_empty());
}

#[test]
fn invalid_configuration_fails_before_spawn() {
    let p = project();
    let err = Compass::new().compile(Utf8Path::new("other/compile.scss"), &opts(&p)).unwrap_err();
    assert!(matches!(err, compass_driver::Error::OutsideSassDir { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_invocations_are_independent() {
    let p = project();
    let c = Compass::new();
    let o = opts(&p);
    let (a, b) = tokio::join!(
        c.compile_async(Utf8Path::new("sass/compile.scss"), &o),
        c.compile_async(Utf8Path::new("sass/base/compile.scss"), &o),
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert!(a.success() && b.success());
    assert!(a.stdout.ends_with("sass/compile.scss\n"));
    assert!(b.stdout.ends_with("sass/base/compile.scss\n"));
    assert_eq!(b.output, p.root.join("css/base/compile.css"));
}
