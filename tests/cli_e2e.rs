//! End-to-end CLI tests for chatlens.
//!
//! These tests run the actual binary against exports written to a temporary
//! directory and check both the console output and the files produced.
//!
//! # Test Categories
//!
//! - **Basic functionality**: Every header layout parses via the CLI
//! - **Output formats**: CSV, JSON, JSONL generation
//! - **Filters**: Date, sender and last-days filtering
//! - **Date order**: Ambiguous slash dates under each hint
//! - **Error handling**: Proper error messages for bad input
//! - **Edge cases**: Unicode, CSV escaping, paths with spaces
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const US_EXPORT: &str = "\
1/15/24, 10:30 AM - Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them.
1/15/24, 10:30 AM - Alice: Hello everyone
1/15/24, 10:31 AM - Bob: Hi Alice! haha
1/15/24, 10:32 AM - Alice: How are you?
I mean really
1/16/24, 8:05 PM - Bob: <Media omitted>
1/17/24, 9:00 AM - Charlie: good morning 😀😀
";

/// Creates a temporary directory with one export per layout.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    fs::write(dir.path().join("us.txt"), US_EXPORT).unwrap();

    let ios = "\
[15.01.24, 10:30:45] Alice: Hello from iOS
[15.01.24, 10:31:02] Bob: Got it
";
    fs::write(dir.path().join("ios.txt"), ios).unwrap();

    let no_comma = "\
01/15/2024 14:00 - Alice: No comma here
01/15/2024 14:05 - Bob: Nor here
";
    fs::write(dir.path().join("no_comma.txt"), no_comma).unwrap();

    let iso = "\
2024-01-15, 14:00 - Alice: ISO dates
2024-01-15, 14:05 - Bob: Sure
";
    fs::write(dir.path().join("iso.txt"), iso).unwrap();

    let dotted = "\
15.01.2024, 14:00 - Alice: Dotted dates
15.01.2024, 14:05 - Bob: Indeed
";
    fs::write(dir.path().join("dotted.txt"), dotted).unwrap();

    let ambiguous = "\
03/04/2024, 09:00 - Alice: Which month is this
25/12/2024, 18:00 - Bob: Merry Christmas
";
    fs::write(dir.path().join("ambiguous.txt"), ambiguous).unwrap();

    let unicode = "\
1/15/24, 10:30 - Иван: Привет мир! 🌍
1/15/24, 10:31 - דנה: בוקר טוב חחח
1/15/24, 10:32 - 村上: 你好世界
";
    fs::write(dir.path().join("unicode.txt"), unicode).unwrap();

    let special = "1/15/24, 10:30 - Alice: Has; semicolons and \"quotes\"\n";
    fs::write(dir.path().join("special.txt"), special).unwrap();

    fs::write(
        dir.path().join("empty.txt"),
        "just some notes\nnothing that looks like a chat\n",
    )
    .unwrap();

    fs::write(dir.path().join("us.zip"), zip_of("WhatsApp Chat with Alice.txt", US_EXPORT)).unwrap();

    dir
}

fn zip_of(name: &str, text: &str) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buf);
        writer
            .start_file("IMG-20240115-WA0001.jpg", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(&[0xFF, 0xD8, 0xFF]).unwrap();
        writer
            .start_file(name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(text.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    buf.into_inner()
}

fn chatlens_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatlens"));
    let mut cmd = Command::from_std(cmd);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn run_to_csv(fixtures: &TempDir, input: &str, extra: &[&str]) -> String {
    let input = fixtures.path().join(input);
    let output = output_path(fixtures, "out.csv");

    chatlens_cmd()
        .args([input.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .args(extra)
        .assert()
        .success();

    fs::read_to_string(&output).unwrap()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_us_export_basic() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");
        let output = output_path(&fixtures, "out.csv");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "-o", output.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 5 messages"))
            .stdout(predicate::str::contains("Done"));

        assert!(output.exists());
        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Timestamp;Sender;Body"));
        assert!(content.contains("2024-01-15 10:30:00;Alice;Hello everyone"));
        assert!(content.contains("2024-01-16 20:05:00;Bob;<Media omitted>"));
        // Leading encryption notice has no sender and is dropped
        assert!(!content.contains("end-to-end encrypted"));
    }

    #[test]
    fn test_multiline_body_kept_together() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "us.txt", &[]);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(content.as_bytes());
        let bodies: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[2].to_string())
            .collect();

        assert_eq!(bodies.len(), 5);
        assert_eq!(bodies[2], "How are you?\nI mean really");
    }

    #[test]
    fn test_every_layout() {
        let fixtures = setup_fixtures();
        for (file, first) in [
            ("ios.txt", "2024-01-15 10:30:45;Alice;Hello from iOS"),
            ("no_comma.txt", "2024-01-15 14:00:00;Alice;No comma here"),
            ("iso.txt", "2024-01-15 14:00:00;Alice;ISO dates"),
            ("dotted.txt", "2024-01-15 14:00:00;Alice;Dotted dates"),
        ] {
            let content = run_to_csv(&fixtures, file, &[]);
            assert!(content.contains(first), "{file}: {content}");
            assert_eq!(content.lines().count(), 3, "{file}");
        }
    }

    #[test]
    fn test_zip_archive_input() {
        let fixtures = setup_fixtures();
        let from_zip = run_to_csv(&fixtures, "us.zip", &[]);
        let from_txt = run_to_csv(&fixtures, "us.txt", &[]);
        assert_eq!(from_zip, from_txt);
    }

    #[test]
    fn test_streaming_matches_in_memory() {
        let fixtures = setup_fixtures();
        let streamed = run_to_csv(&fixtures, "us.txt", &["--streaming"]);
        let loaded = run_to_csv(&fixtures, "us.txt", &[]);
        assert_eq!(streamed, loaded);
    }

    #[test]
    fn test_streaming_banner() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");
        let output = output_path(&fixtures, "out.csv");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "--streaming",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Streaming"));
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_output_csv_default() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");

        chatlens_cmd()
            .current_dir(fixtures.path())
            .arg(input.to_str().unwrap())
            .assert()
            .success();

        assert!(fixtures.path().join("chat_records.csv").exists());
    }

    #[test]
    fn test_default_output_filename_changes_with_format() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");

        chatlens_cmd()
            .current_dir(fixtures.path())
            .args([input.to_str().unwrap(), "-f", "jsonl"])
            .assert()
            .success();

        assert!(fixtures.path().join("chat_records.jsonl").exists());
        assert!(!fixtures.path().join("chat_records.csv").exists());
    }

    #[test]
    fn test_output_json() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");
        let output = output_path(&fixtures, "out.json");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "-f",
                "json",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("JSON"));

        let content = fs::read_to_string(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 5);
        assert_eq!(array[0]["sender"], "Alice");
        assert_eq!(array[0]["timestamp"], "2024-01-15T10:30:00");
        assert!(array[0].get("hour").is_none());
    }

    #[test]
    fn test_output_jsonl() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");
        let output = output_path(&fixtures, "out.jsonl");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "--format",
                "ndjson",
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("sender").is_some());
        }
    }

    #[test]
    fn test_derived_columns() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "us.txt", &["--derived"]);

        let header = content.lines().next().unwrap();
        assert_eq!(header, "Timestamp;Sender;Body;Date;Hour;Weekday;Length;Media");
        // 2024-01-15 was a Monday
        assert!(content.contains("2024-01-15 10:30:00;Alice;Hello everyone;2024-01-15;10;Monday;14;"));
        assert!(content.contains(";Tuesday;15;<Media omitted>"));
    }

    #[test]
    fn test_derived_json_fields() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");
        let output = output_path(&fixtures, "out.json");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "-f",
                "json",
                "--derived",
            ])
            .assert()
            .success();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let media = &parsed[3];
        assert_eq!(media["hour"], 20);
        assert_eq!(media["weekday"], "Tuesday");
        assert_eq!(media["media"], "<Media omitted>");
        assert!(parsed[0].get("media").is_none());
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filters {
    use super::*;

    #[test]
    fn test_filter_by_sender() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "us.txt", &["--from", "Bob"]);

        assert!(content.contains(";Bob;"));
        assert!(!content.contains("Hello everyone"));
        assert!(!content.contains("Charlie"));
    }

    #[test]
    fn test_filter_by_sender_case_insensitive() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "us.txt", &["--from", "cHaRlIe"]);
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Charlie"));
    }

    #[test]
    fn test_filter_after_date() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "us.txt", &["--after", "2024-01-16"]);

        assert!(!content.contains("Hello everyone"));
        assert!(content.contains("<Media omitted>"));
        assert!(content.contains("Charlie"));
    }

    #[test]
    fn test_filter_before_date_is_inclusive() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "us.txt", &["--before", "2024-01-16"]);

        assert!(content.contains("Hello everyone"));
        assert!(content.contains("<Media omitted>"));
        assert!(!content.contains("Charlie"));
    }

    #[test]
    fn test_filter_last_days() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "us.txt", &["--last-days", "1"]);

        // Counted back from the newest message, 2024-01-17 09:00
        assert!(!content.contains("Hello everyone"));
        assert!(content.contains("<Media omitted>"));
        assert!(content.contains("Charlie"));
    }

    #[test]
    fn test_filter_last_days_huge_window() {
        let fixtures = setup_fixtures();
        let max = u32::MAX.to_string();
        let content = run_to_csv(&fixtures, "us.txt", &["--last-days", &max]);

        assert!(content.contains("Hello everyone"));
        assert!(content.contains("Charlie"));
    }

    #[test]
    fn test_filter_combined_sender_and_date() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(
            &fixtures,
            "us.txt",
            &["--from", "alice", "--after", "2024-01-15", "--before", "2024-01-15"],
        );
        assert_eq!(content.lines().count(), 4);
        assert!(!content.contains(";Bob;"));
    }

    #[test]
    fn test_filter_shows_in_output() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");
        let output = output_path(&fixtures, "out.csv");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "--from",
                "Bob",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Filtering"))
            .stdout(predicate::str::contains("2 messages after filtering"));
    }
}

// ============================================================================
// Date Order Tests
// ============================================================================

mod date_order {
    use super::*;

    #[test]
    fn test_auto_prefers_month_first() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "ambiguous.txt", &[]);

        assert!(content.contains("2024-03-04 09:00:00;Alice"));
        // 25 cannot be a month, so day-first applies
        assert!(content.contains("2024-12-25 18:00:00;Bob"));
    }

    #[test]
    fn test_day_first() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "ambiguous.txt", &["--date-order", "day-first"]);

        assert!(content.contains("2024-04-03 09:00:00;Alice"));
        assert!(content.contains("2024-12-25 18:00:00;Bob"));
    }

    #[test]
    fn test_month_first_turns_impossible_header_into_continuation() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "ambiguous.txt", &["--date-order", "month-first"]);

        assert_eq!(content.lines().count(), 3);
        assert!(!content.contains(";Bob;"));
        assert!(content.contains("Merry Christmas"));
    }

    #[test]
    fn test_invalid_date_order() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("ambiguous.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "--date-order", "sideways"])
            .assert()
            .failure();
    }
}

// ============================================================================
// Statistics Tests
// ============================================================================

mod statistics {
    use super::*;

    #[test]
    fn test_stats_flag() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");
        let output = output_path(&fixtures, "out.csv");

        chatlens_cmd()
            .args([
                input.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "--stats",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Summary"))
            .stdout(predicate::str::contains("Participants:  3"))
            .stdout(predicate::str::contains("Active days:   3"))
            .stdout(predicate::str::contains("Most messages"))
            .stdout(predicate::str::contains("1. Alice (2)"))
            .stdout(predicate::str::contains("Most media"))
            .stdout(predicate::str::contains("Good morning"))
            .stdout(predicate::str::contains("Top emoji"))
            .stdout(predicate::str::contains("😀  2"));
    }

    #[test]
    fn test_no_stats_by_default() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");
        let output = output_path(&fixtures, "out.csv");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "-o", output.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Summary").not());
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_nonexistent_file() {
        chatlens_cmd()
            .args(["nonexistent_file.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_empty_result_shows_excerpt() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("empty.txt");
        let output = output_path(&fixtures, "out.csv");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "-o", output.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No messages found"))
            .stderr(predicate::str::contains("just some notes"));

        assert!(!output.exists());
    }

    #[test]
    fn test_empty_result_streaming() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("empty.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "--streaming"])
            .current_dir(fixtures.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("just some notes"));
    }

    #[test]
    fn test_zip_without_text() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("media_only.zip");
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("photo.jpg", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"not a chat").unwrap();
            writer.finish().unwrap();
        }
        fs::write(&input, buf.into_inner()).unwrap();

        chatlens_cmd()
            .args([input.to_str().unwrap()])
            .current_dir(fixtures.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("No .txt file"));
    }

    #[test]
    fn test_invalid_date_format() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "--after", "not-a-date"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid date"));
    }

    #[test]
    fn test_missing_input_argument() {
        chatlens_cmd().assert().failure();
    }

    #[test]
    fn test_invalid_format_option() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("us.txt");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "-f", "invalid_format"])
            .assert()
            .failure();
    }
}

// ============================================================================
// Edge Cases
// ============================================================================

mod edge_cases {
    use super::*;

    #[test]
    fn test_unicode_content() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "unicode.txt", &[]);

        assert!(content.contains("Иван"));
        assert!(content.contains("Привет мир! 🌍"));
        assert!(content.contains("בוקר טוב חחח"));
        assert!(content.contains("你好世界"));
    }

    #[test]
    fn test_unicode_sender_filter() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "unicode.txt", &["--from", "иван"]);
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Иван"));
    }

    #[test]
    fn test_special_characters_csv_escaping() {
        let fixtures = setup_fixtures();
        let content = run_to_csv(&fixtures, "special.txt", &[]);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(content.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[2], "Has; semicolons and \"quotes\"");
    }

    #[test]
    fn test_path_with_spaces() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("WhatsApp Chat with Alice.txt");
        fs::write(&input, US_EXPORT).unwrap();
        let output = output_path(&fixtures, "my records.csv");

        chatlens_cmd()
            .args([input.to_str().unwrap(), "-o", output.to_str().unwrap()])
            .assert()
            .success();

        assert!(output.exists());
    }

    #[test]
    fn test_bom_prefixed_file() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("bom.txt");
        fs::write(&input, format!("\u{feff}{}", US_EXPORT)).unwrap();

        let with_bom = run_to_csv(&fixtures, "bom.txt", &[]);
        let without = run_to_csv(&fixtures, "us.txt", &[]);
        assert_eq!(with_bom, without);
    }
}

// ============================================================================
// Help and Version Tests
// ============================================================================

mod help_and_version {
    use super::*;

    #[test]
    fn test_help_flag() {
        chatlens_cmd()
            .args(["--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("chatlens"))
            .stdout(predicate::str::contains("--date-order"))
            .stdout(predicate::str::contains("--stats"))
            .stdout(predicate::str::contains("EXAMPLES"));
    }

    #[test]
    fn test_help_flag_short() {
        chatlens_cmd()
            .args(["-h"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }

    #[test]
    fn test_version_flag() {
        chatlens_cmd()
            .args(["--version"])
            .assert()
            .success()
            .stdout(predicate::str::contains("chatlens"))
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
