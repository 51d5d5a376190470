#![cfg(feature = "cli")]
//! Integration tests for `pxdb completions`.

use clap::CommandFactory;
use pxdb::cli::app::Cli;

fn generate_completions(shell: clap_complete::Shell) -> String {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "pxdb", &mut buf);
    String::from_utf8(buf).expect("completions should be valid UTF-8")
}

#[test]
fn bash_completions_contain_subcommands() {
    let output = generate_completions(clap_complete::Shell::Bash);
    assert!(output.contains("pxdb"));
    for sub in ["info", "rows", "blocks", "dump", "find", "last-seen", "completions"] {
        assert!(output.contains(sub), "missing subcommand {}", sub);
    }
}

#[test]
fn bash_completions_contain_global_flags() {
    let output = generate_completions(clap_complete::Shell::Bash);
    assert!(output.contains("--config"));
    assert!(output.contains("--log-level"));
    assert!(output.contains("--fix-hour"));
}

#[test]
fn zsh_completions_are_valid() {
    let output = generate_completions(clap_complete::Shell::Zsh);
    assert!(!output.is_empty());
    assert!(output.contains("pxdb"));
}

#[test]
fn fish_completions_are_valid() {
    let output = generate_completions(clap_complete::Shell::Fish);
    assert!(output.contains("pxdb"));
    assert!(output.contains("last-seen"));
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
