//! CLI integration tests
//!
//! Run the built binary against a temporary database and check its output.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestCli {
    dir: TempDir,
    db_path: PathBuf,
}

impl TestCli {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("journal.db");
        Self { dir, db_path }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_learnlog-cli"))
            .current_dir(self.dir.path())
            .env("LEARNLOG_LOG_PROFILE", "test")
            .args(args)
            .args(["--db", self.db_path.to_str().unwrap()])
            .output()
            .expect("Failed to execute CLI")
    }

    fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "{:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn err(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(!output.status.success(), "{:?} unexpectedly succeeded", args);
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    fn register(&self, email: &str) {
        self.ok(&[
            "user",
            "register",
            "--email",
            email,
            "--password",
            "secret-pw",
        ]);
    }
}

const ALICE: [&str; 4] = ["--email", "alice@x.com", "--password", "secret-pw"];
const BOB: [&str; 4] = ["--email", "bob@x.com", "--password", "secret-pw"];

fn with(args: &[&'static str], creds: [&'static str; 4]) -> Vec<&'static str> {
    args.iter().copied().chain(creds).collect()
}

#[test]
fn test_register_then_login() {
    // Given: A registered user
    let cli = TestCli::new();
    let out = cli.ok(&[
        "user",
        "register",
        "--email",
        "alice@x.com",
        "--password",
        "secret-pw",
        "--confirm",
        "secret-pw",
    ]);
    assert!(out.contains("Registered alice@x.com"));

    // When/Then: Logging in succeeds and a wrong password fails
    assert!(cli
        .ok(&with(&["user", "login"], ALICE))
        .contains("Authenticated as alice@x.com"));
    let err = cli.err(&[
        "user",
        "login",
        "--email",
        "alice@x.com",
        "--password",
        "wrong-pw",
    ]);
    assert!(err.contains("[ERR_INVALID_CREDENTIALS]"), "stderr: {}", err);
}

#[test]
fn test_duplicate_registration_reports_code() {
    let cli = TestCli::new();
    cli.register("alice@x.com");

    let err = cli.err(&[
        "user",
        "register",
        "--email",
        "alice@x.com",
        "--password",
        "another-pw",
    ]);

    assert!(err.contains("Error: [ERR_DUPLICATE_USER]"), "stderr: {}", err);
}

#[test]
fn test_entry_lifecycle() {
    // Given: A user with two entries
    let cli = TestCli::new();
    cli.register("alice@x.com");
    let added = cli.ok(&with(
        &[
            "entry",
            "add",
            "--title",
            "Ownership",
            "--date",
            "2024-01-01",
            "--minutes",
            "45",
            "--learned",
            "Moves and borrows",
            "--tags",
            "Rust,memory",
        ],
        ALICE,
    ));
    assert!(added.contains("Created entry 1 (ownership)"), "{}", added);
    assert!(added.contains("Tags: rust, memory"), "{}", added);
    cli.ok(&with(
        &[
            "entry",
            "add",
            "--title",
            "Traits",
            "--date",
            "2024-01-03",
            "--minutes",
            "30",
            "--learned",
            "Dispatch",
        ],
        ALICE,
    ));

    // Then: Listing shows the newest first
    let listed = cli.ok(&with(&["entry", "list"], ALICE));
    let lines: Vec<&str> = listed.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Traits"));
    assert!(lines[1].contains("Ownership"));

    // And: Editing one field keeps the others
    let edited = cli.ok(&with(&["entry", "edit", "1", "--minutes", "90"], ALICE));
    assert!(edited.contains("90min"), "{}", edited);
    let shown = cli.ok(&["entry", "show", "1"]);
    assert!(shown.contains("Ownership [ownership]"));
    assert!(shown.contains("Moves and borrows"));
    assert!(shown.contains("Tags: memory, rust"));

    // And: Deleting removes it
    cli.ok(&with(&["entry", "delete", "1"], ALICE));
    let err = cli.err(&["entry", "show", "1"]);
    assert!(err.contains("[ERR_NOT_FOUND]"), "stderr: {}", err);
}

#[test]
fn test_entries_are_private_to_owner() {
    let cli = TestCli::new();
    cli.register("alice@x.com");
    cli.register("bob@x.com");
    cli.ok(&with(
        &[
            "entry",
            "add",
            "--title",
            "Alice only",
            "--date",
            "2024-01-01",
            "--minutes",
            "10",
            "--learned",
            "x",
        ],
        ALICE,
    ));

    assert!(cli
        .ok(&with(&["entry", "list"], BOB))
        .contains("No entries yet"));
    let err = cli.err(&with(&["entry", "edit", "1", "--title", "Mine now"], BOB));
    assert!(err.contains("[ERR_FORBIDDEN]"), "stderr: {}", err);
    let err = cli.err(&with(&["entry", "delete", "1"], BOB));
    assert!(err.contains("[ERR_FORBIDDEN]"), "stderr: {}", err);
    assert!(cli
        .ok(&["entry", "show", "1"])
        .contains("Alice only [alice-only]"));
}

#[test]
fn test_anonymous_and_invalid_input() {
    let cli = TestCli::new();
    cli.register("alice@x.com");

    let err = cli.err(&["entry", "list"]);
    assert!(err.contains("[ERR_FORBIDDEN]"), "stderr: {}", err);

    let err = cli.err(&with(
        &[
            "entry",
            "add",
            "--title",
            "Zero",
            "--date",
            "2024-01-01",
            "--minutes",
            "0",
            "--learned",
            "x",
        ],
        ALICE,
    ));
    assert!(err.contains("[ERR_VALIDATION]"), "stderr: {}", err);
}

#[test]
fn test_add_with_blank_tag_saves_nothing() {
    // Given: A registered user
    let cli = TestCli::new();
    cli.register("alice@x.com");

    // When: Adding an entry whose tag list contains a blank name
    let err = cli.err(&with(
        &[
            "entry",
            "add",
            "--title",
            "T",
            "--date",
            "2024-01-01",
            "--minutes",
            "5",
            "--learned",
            "x",
            "--tags",
            "rust,",
        ],
        ALICE,
    ));

    // Then: The command fails and neither the entry nor any tag was stored
    assert!(err.contains("[ERR_VALIDATION]"), "stderr: {}", err);
    assert!(cli
        .ok(&with(&["entry", "list"], ALICE))
        .contains("No entries yet"));
    assert!(cli.ok(&["tag", "list"]).trim().is_empty());
}

#[test]
fn test_tag_browsing_across_owners() {
    let cli = TestCli::new();
    cli.register("alice@x.com");
    cli.register("bob@x.com");
    for (creds, title, date) in [
        (ALICE, "Generators", "2024-01-01"),
        (BOB, "Decorators", "2024-02-01"),
    ] {
        cli.ok(&with(
            &[
                "entry",
                "add",
                "--title",
                title,
                "--date",
                date,
                "--minutes",
                "20",
                "--learned",
                "x",
            ],
            creds,
        ));
    }
    cli.ok(&with(&["tag", "attach", "1", "python"], ALICE));
    cli.ok(&with(&["tag", "attach", "2", "Python"], BOB));

    let err = cli.err(&with(&["tag", "attach", "1", "stolen"], BOB));
    assert!(err.contains("[ERR_FORBIDDEN]"), "stderr: {}", err);

    let tagged = cli.ok(&["tag", "entries", "python"]);
    let lines: Vec<&str> = tagged.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Decorators"));
    assert!(lines[1].contains("Generators"));
    assert_eq!(cli.ok(&["tag", "list"]).trim(), "python");

    assert!(cli
        .ok(&with(&["tag", "detach", "1", "python"], ALICE))
        .contains("Removed tag python"));
    assert_eq!(cli.ok(&["tag", "entries", "python"]).lines().count(), 1);

    let err = cli.err(&["tag", "entries", "unknown"]);
    assert!(err.contains("[ERR_NOT_FOUND]"), "stderr: {}", err);
}

#[test]
fn test_create_duplicate_tag() {
    let cli = TestCli::new();
    cli.ok(&["tag", "create", "rust"]);
    let err = cli.err(&["tag", "create", "Rust"]);
    assert!(err.contains("[ERR_DUPLICATE_TAG]"), "stderr: {}", err);
}
