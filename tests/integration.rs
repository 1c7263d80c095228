use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn snip_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("snip");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let files_dir = root.join("files");
    fs::create_dir_all(&files_dir).unwrap();
    fs::write(
        files_dir.join("join.sql"),
        "-- Join users\n-- users with their orders\nSELECT * FROM users u JOIN orders o ON o.user_id = u.id;\n",
    )
    .unwrap();
    fs::write(
        files_dir.join("quick.py"),
        "# Quick Sort\ndef qs(xs):\n    return xs\n",
    )
    .unwrap();
    fs::write(
        files_dir.join("merge.py"),
        "# Merge Sort\n# stable\ndef ms(xs):\n    return xs\n",
    )
    .unwrap();
    fs::write(files_dir.join("untitled.py"), "plain text\nmore text\n").unwrap();

    let config_content = format!(
        r#"[store]
root = "{}/snippets"

[index]
path = "{}/data/snippets.db"
"#,
        root.display(),
        root.display()
    );

    let config_path = root.join("snip.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_snip(config_path: &Path, args: &[&str]) -> (String, String, Option<i32>) {
    let binary = snip_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run snip binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code())
}

fn file_arg(config_path: &Path, name: &str) -> String {
    config_path
        .parent()
        .unwrap()
        .join("files")
        .join(name)
        .to_string_lossy()
        .to_string()
}

#[test]
fn test_init_creates_folder_and_database() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, code) = run_snip(&config_path, &["init"]);
    assert_eq!(code, Some(0), "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Initialized database and snippet folder"));
    assert!(tmp.path().join("snippets").is_dir());
    assert!(tmp.path().join("data/snippets.db").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, code1) = run_snip(&config_path, &["init"]);
    assert_eq!(code1, Some(0), "First init failed");

    let (_, _, code2) = run_snip(&config_path, &["init"]);
    assert_eq!(code2, Some(0), "Second init failed (not idempotent)");
}

#[test]
fn test_add_prints_destination() {
    let (tmp, config_path) = setup_test_env();
    let file = file_arg(&config_path, "join.sql");

    let (stdout, stderr, code) =
        run_snip(&config_path, &["add", "--language", "SQL", "--file", &file]);
    assert_eq!(code, Some(0), "add failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("Snippet saved to "));
    assert!(stdout.trim_end().ends_with("Join_users.txt"));

    let saved = fs::read_to_string(tmp.path().join("snippets/SQL/Join_users.txt")).unwrap();
    assert!(saved.starts_with("-- Join users\n"));

    // Pool closed on exit: the WAL is checkpointed and removed.
    assert!(!tmp.path().join("data/snippets.db-wal").exists());
}

#[test]
fn test_add_without_init_initializes() {
    let (tmp, config_path) = setup_test_env();
    let file = file_arg(&config_path, "quick.py");

    let (_, _, code) = run_snip(&config_path, &["add", "--language", "Python", "--file", &file]);
    assert_eq!(code, Some(0));
    assert!(tmp.path().join("data/snippets.db").exists());
}

#[test]
fn test_add_from_stdin() {
    let (tmp, config_path) = setup_test_env();

    let mut child = Command::new(snip_binary())
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(["add", "--language", "Lua", "--file", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"# Greeting\nprint('hi')\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(tmp.path().join("snippets/Lua/Greeting.txt").exists());
}

#[test]
fn test_search_ordered_with_descriptions() {
    let (_tmp, config_path) = setup_test_env();
    for name in ["quick.py", "merge.py"] {
        let file = file_arg(&config_path, name);
        let (_, _, code) =
            run_snip(&config_path, &["add", "--language", "Python", "--file", &file]);
        assert_eq!(code, Some(0));
    }

    let (stdout, _, code) = run_snip(
        &config_path,
        &["search", "--language", "Python", "--query", "Sort"],
    );
    assert_eq!(code, Some(0));
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected output: {}", stdout);
    assert!(lines[0].starts_with("Merge Sort - stable -> "));
    assert!(lines[1].starts_with("Quick Sort -> "));
}

#[test]
fn test_search_is_scoped_to_language() {
    let (_tmp, config_path) = setup_test_env();
    let file = file_arg(&config_path, "quick.py");
    run_snip(&config_path, &["add", "--language", "Python", "--file", &file]);

    let (stdout, _, code) = run_snip(
        &config_path,
        &["search", "--language", "Ruby", "--query", "Sort"],
    );
    assert_eq!(code, Some(0));
    assert!(stdout.contains("No results."));
}

#[test]
fn test_search_json() {
    let (_tmp, config_path) = setup_test_env();
    let file = file_arg(&config_path, "join.sql");
    run_snip(&config_path, &["add", "--language", "SQL", "--file", &file]);

    let (stdout, _, code) = run_snip(&config_path, &["search", "--language", "SQL", "--json"]);
    assert_eq!(code, Some(0));
    let hits: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["title"], "Join users");
    assert_eq!(hits[0]["description"], "users with their orders");
}

#[test]
fn test_missing_title_is_validation_error() {
    let (tmp, config_path) = setup_test_env();
    let file = file_arg(&config_path, "untitled.py");

    let (_, stderr, code) =
        run_snip(&config_path, &["add", "--language", "Python", "--file", &file]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("missing title"));
    assert!(!tmp.path().join("snippets/Python").exists());

    let (stdout, _, _) = run_snip(&config_path, &["languages"]);
    assert!(stdout.trim().is_empty());
}

#[test]
fn test_missing_source_file_is_not_found() {
    let (_tmp, config_path) = setup_test_env();
    let file = file_arg(&config_path, "does-not-exist.py");

    let (_, _, code) = run_snip(&config_path, &["add", "--language", "Python", "--file", &file]);
    assert_eq!(code, Some(3));
}

#[test]
fn test_languages_sorted() {
    let (_tmp, config_path) = setup_test_env();
    let sql = file_arg(&config_path, "join.sql");
    let py = file_arg(&config_path, "quick.py");
    run_snip(&config_path, &["add", "--language", "SQL", "--file", &sql]);
    run_snip(&config_path, &["add", "--language", "Python", "--file", &py]);

    let (stdout, _, code) = run_snip(&config_path, &["languages"]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["Python", "SQL"]);
}

#[test]
fn test_show_prints_body() {
    let (_tmp, config_path) = setup_test_env();
    let file = file_arg(&config_path, "join.sql");
    run_snip(&config_path, &["add", "--language", "SQL", "--file", &file]);

    let (stdout, _, code) = run_snip(&config_path, &["show", "1"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("title:       Join users"));
    assert!(stdout.contains("SELECT * FROM users u JOIN orders o"));

    let (_, _, code) = run_snip(&config_path, &["show", "99"]);
    assert_eq!(code, Some(3));
}

#[test]
fn test_missing_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, code) = run_snip(&tmp.path().join("nope.toml"), &["init"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("Failed to read config file"));
}
