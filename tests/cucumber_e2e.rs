use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use bookmark_manager::domain::model::Store;
use bookmark_manager::infrastructure::serde_json_adapter::load_store;
use cucumber::{given, then, when, World as _};
use tempfile::TempDir;

#[derive(Debug, Default, cucumber::World)]
struct TestWorld {
    dir: Option<TempDir>,
    store_path: Option<PathBuf>,
    last_cmd: Option<Output>,
}

impl TestWorld {
    fn store_path(&self) -> &Path {
        self.store_path.as_deref().expect("store path")
    }

    fn seed(&mut self, contents: &str) {
        let dir = self.dir.as_ref().expect("temp dir");
        let path = dir.path().join("main.json");
        fs::write(&path, contents).expect("write fixture");
        self.store_path = Some(path);
    }

    fn run(&mut self, flags: &[&str], stdin: &str) {
        let mut args: Vec<String> = flags.iter().map(|f| f.to_string()).collect();
        args.push("--file".to_string());
        args.push(self.store_path().to_string_lossy().into_owned());
        self.last_cmd = Some(run_cmd(args, stdin));
    }

    fn stored(&self) -> Store {
        load_store(&fs::read(self.store_path()).expect("read store")).expect("parse store")
    }
}

fn exe() -> &'static str {
    env!("CARGO_BIN_EXE_bookmark-manager")
}

fn run_cmd(args: Vec<String>, stdin: &str) -> Output {
    let mut child = Command::new(exe())
        .args(args)
        .env_remove("BOOKMARK_MANAGER_FILE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run bookmark-manager binary");

    // The binary may exit before reading everything (e.g. on a failed lookup).
    let _ = child.stdin.take().expect("stdin").write_all(stdin.as_bytes());

    child.wait_with_output().expect("wait for bookmark-manager")
}

fn stdout_string(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr_string(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[given("a temp bookmarks workspace")]
fn a_temp_bookmarks_workspace(world: &mut TestWorld) {
    world.dir = Some(tempfile::tempdir().expect("tempdir"));
}

#[given("an empty bookmarks file")]
fn an_empty_bookmarks_file(world: &mut TestWorld) {
    world.seed("");
}

#[given("a bookmarks file with duplicate names")]
fn a_bookmarks_file_with_duplicate_names(world: &mut TestWorld) {
    world.seed(include_str!("resources/duplicates.json"));
}

#[given("a malformed bookmarks file")]
fn a_malformed_bookmarks_file(world: &mut TestWorld) {
    world.seed("[{\"type\": \"dev\", \"bookmarks\": [");
}

#[given("a bookmarks file with a bookmark missing its url")]
fn a_bookmarks_file_missing_url(world: &mut TestWorld) {
    world.seed(r#"[{"type": "dev", "bookmarks": [{"name": "x", "description": ""}]}]"#);
}

#[when(expr = "I add {string} with url {string} to category {string}")]
fn i_add_a_bookmark(world: &mut TestWorld, name: String, url: String, category: String) {
    world.run(&["--add"], &format!("{category}\n{name}\n{url}\nadded by e2e\n"));
}

#[when(expr = "I add {string} with url {string} to category {string} emitting events")]
fn i_add_a_bookmark_emitting_events(
    world: &mut TestWorld,
    name: String,
    url: String,
    category: String,
) {
    world.run(
        &["--add", "--emit-events"],
        &format!("{category}\n{name}\n{url}\nadded by e2e\n"),
    );
}

#[when(expr = "I delete {string} choosing candidate {string}")]
fn i_delete_choosing_candidate(world: &mut TestWorld, name: String, choice: String) {
    world.run(&["--delete"], &format!("{name}\n{choice}\n"));
}

#[when(expr = "I run bookmark-manager with {string}")]
fn i_run_with_flag(world: &mut TestWorld, flag: String) {
    world.run(&[flag.as_str()], "");
}

#[then("the command succeeds")]
fn the_command_succeeds(world: &mut TestWorld) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    assert!(
        out.status.success(),
        "command failed (status={:?})\nstderr:\n{}\nstdout:\n{}",
        out.status.code(),
        stderr_string(out),
        stdout_string(out)
    );
}

#[then("the command fails")]
fn the_command_fails(world: &mut TestWorld) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    assert!(
        !out.status.success(),
        "expected failure but succeeded; stdout: {}",
        stdout_string(out)
    );
}

#[then(expr = "stdout mentions {string}")]
fn stdout_mentions(world: &mut TestWorld, needle: String) {
    let stdout = stdout_string(world.last_cmd.as_ref().expect("last cmd"));
    assert!(
        stdout.contains(&needle),
        "stdout did not contain {needle:?}. stdout was:\n{stdout}"
    );
}

#[then(expr = "stderr mentions {string}")]
fn stderr_mentions(world: &mut TestWorld, needle: String) {
    let stderr = stderr_string(world.last_cmd.as_ref().expect("last cmd"));
    assert!(
        stderr.contains(&needle),
        "stderr did not contain {needle:?}. stderr was:\n{stderr}"
    );
}

#[then(expr = "stdout has an event of type {string}")]
fn stdout_has_event(world: &mut TestWorld, kind: String) {
    let stdout = stdout_string(world.last_cmd.as_ref().expect("last cmd"));
    let found = stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .any(|v| v.get("type").and_then(|t| t.as_str()) == Some(kind.as_str()));
    assert!(found, "no {kind} event in stdout:\n{stdout}");
}

#[then(expr = "the file has {int} categories and {int} bookmarks")]
fn the_file_has(world: &mut TestWorld, categories: usize, bookmarks: usize) {
    let store = world.stored();
    assert_eq!(store.categories.len(), categories);
    assert_eq!(store.bookmark_count(), bookmarks);
}

#[then(expr = "the file contains url {string}")]
fn the_file_contains_url(world: &mut TestWorld, url: String) {
    let store = world.stored();
    assert!(
        store
            .categories
            .iter()
            .flat_map(|c| c.bookmarks.iter())
            .any(|b| b.url == url),
        "{url} not stored"
    );
}

#[then(expr = "the file does not contain url {string}")]
fn the_file_does_not_contain_url(world: &mut TestWorld, url: String) {
    let store = world.stored();
    assert!(
        store
            .categories
            .iter()
            .flat_map(|c| c.bookmarks.iter())
            .all(|b| b.url != url),
        "{url} still stored"
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    TestWorld::cucumber()
        .max_concurrent_scenarios(Some(1))
        .fail_on_skipped()
        .run_and_exit("tests/features")
        .await;
}
