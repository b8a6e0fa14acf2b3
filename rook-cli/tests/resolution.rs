//! Configuration-file fallback behavior through the dispatcher.

use std::io::{Cursor, Write as _};

use rook::ConsoleResult;
use rook_cli::bootstrap;
use tempfile::NamedTempFile;

fn rook(argv: &[&str]) -> (ConsoleResult, String, String) {
    let registry = bootstrap().unwrap();
    let argv: Vec<String> = argv.iter().map(|s| (*s).to_owned()).collect();
    let mut input = Cursor::new(Vec::new());
    let mut output = Vec::new();
    let mut error = Vec::new();
    let result = rook::dispatch(&registry, &argv, &mut input, &mut output, &mut error);
    (
        result,
        String::from_utf8(output).unwrap(),
        String::from_utf8(error).unwrap(),
    )
}

fn config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const PAYLOAD: &str = "f54a5851e9372b87810a8e60cdd2e7cfd80b6e31";

#[test]
fn config_value_applies_when_option_is_unset() {
    let file = config("version=111\n");
    let (result, output, _) = rook(&[
        "base58check-encode",
        PAYLOAD,
        "--config",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(result, ConsoleResult::Okay);
    // Version 111 (0x6f) yields a testnet-style address, not the
    // version-0 form.
    assert_ne!(output, "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs\n");
    assert!(output.starts_with('m') || output.starts_with('n'));
}

#[test]
fn cli_value_wins_over_config() {
    let file = config("version=111\n");
    let (result, output, _) = rook(&[
        "base58check-encode",
        PAYLOAD,
        "--version",
        "0",
        "--config",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(result, ConsoleResult::Okay);
    assert_eq!(output, "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs\n");
}

#[test]
fn compiled_default_applies_without_config_entry() {
    let file = config("# no relevant keys\nformat=json\n");
    let (result, output, _) = rook(&[
        "base58check-encode",
        PAYLOAD,
        "--config",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(result, ConsoleResult::Okay);
    assert_eq!(output, "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs\n");
}

#[test]
fn config_can_set_output_format() {
    let file = config("format=json\n");
    let (result, output, _) = rook(&[
        "base58check-decode",
        "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs",
        "--config",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(result, ConsoleResult::Okay);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["wrapper"]["payload"], PAYLOAD);
}

#[test]
fn malformed_config_line_is_a_failure() {
    let file = config("version\n");
    let (result, _, error) = rook(&[
        "base58check-encode",
        PAYLOAD,
        "--config",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(result, ConsoleResult::Failure);
    assert!(error.contains("config line 1"));
}

#[test]
fn mistyped_config_value_names_line_and_option() {
    let file = config("\n\nversion=lots\n");
    let (result, _, error) = rook(&[
        "base58check-encode",
        PAYLOAD,
        "--config",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(result, ConsoleResult::Failure);
    assert!(error.contains("config line 3"));
    assert!(error.contains("version"));
}

#[test]
fn unreadable_config_file_is_a_failure() {
    let (result, _, error) = rook(&[
        "base58check-encode",
        PAYLOAD,
        "--config",
        "/nonexistent/rook.cfg",
    ]);
    assert_eq!(result, ConsoleResult::Failure);
    assert!(error.contains("/nonexistent/rook.cfg"));
}

#[test]
fn repeated_option_collects_config_lines() {
    let file = config(
        "input=97e06e49dfdd26c5a904670971ccf4c7fe7d9da53cb379bf9b442fc9427080b3:0\n\
         output=13Ft7SkreJY9D823NPm4t6D1cBqLYTJtAe:90000\n",
    );
    let (result, output, _) = rook(&[
        "tx-encode",
        "--config",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(result, ConsoleResult::Okay);
    assert_eq!(
        output,
        "0100000001b3807042c92f449bbf79b33ca59d7dfec7f4cc71096704a9c526dddf496ee0970000000000ffffffff01905f0100000000001976a91418c0bd8d1818f1bf99cb1df2269c645318ef7b7388ac00000000\n"
    );
}
