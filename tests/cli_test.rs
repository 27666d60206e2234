//! Tests for the invocation driver with stub verse libraries

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clap::Parser;
use tempfile::TempDir;

use bible::application::ApplicationError;
use bible::cli::args::HELP;
use bible::cli::commands::{execute_command, version_banner};
use bible::cli::output::{OutputFormatter, NOT_FOUND, SEPARATOR};
use bible::cli::{Cli, CliResult};
use bible::config::Settings;
use bible::domain::{InvocationOptions, ResultColor, Verse, LINE_ENDING};
use bible::exitcode;
use bible::infrastructure::traits::{Library, ProviderResult, VerseProvider};
use bible::infrastructure::InfraError;
use bible::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

enum Outcome {
    Verses(Vec<Verse>),
    Fail(&'static str),
}

impl Outcome {
    fn resolve(&self) -> ProviderResult<Vec<Verse>> {
        match self {
            Outcome::Verses(v) => Ok(v.clone()),
            Outcome::Fail(message) => Err(InfraError::Data {
                source_name: "stub".into(),
                message: message.to_string(),
            }),
        }
    }
}

struct StubProvider {
    get: Outcome,
    search: Outcome,
}

impl VerseProvider for StubProvider {
    fn get(&self, _reference: &str) -> ProviderResult<Vec<Verse>> {
        self.get.resolve()
    }

    fn search(&self, _pattern: &str) -> ProviderResult<Vec<Verse>> {
        self.search.resolve()
    }
}

struct StubLibrary {
    provider: Arc<StubProvider>,
    fail: bool,
    inits: AtomicUsize,
}

impl StubLibrary {
    fn new(get: Outcome, search: Outcome) -> Arc<Self> {
        Arc::new(Self {
            provider: Arc::new(StubProvider { get, search }),
            fail: false,
            inits: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            provider: Arc::new(StubProvider {
                get: Outcome::Verses(vec![]),
                search: Outcome::Verses(vec![]),
            }),
            fail: true,
            inits: AtomicUsize::new(0),
        })
    }

    fn inits(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }
}

impl Library for StubLibrary {
    fn init(
        &self,
        _settings: &Settings,
        language: &str,
    ) -> ProviderResult<Arc<dyn VerseProvider>> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(InfraError::LanguageNotConfigured(language.to_string()));
        }
        Ok(self.provider.clone())
    }
}

fn john_3_16() -> Verse {
    Verse::new("John", 3, 16, "For God so loved...")
}

/// Temp dir holding an (empty) configuration file; stub libraries ignore its content.
fn config_file() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".bible-config");
    std::fs::write(&path, "{}").unwrap();
    (dir, path)
}

fn run(args: &[&str], library: Arc<StubLibrary>) -> (String, CliResult<()>) {
    let (_dir, config) = config_file();
    let config = config.to_string_lossy().to_string();
    let argv = ["bible", "--config", config.as_str()]
        .into_iter()
        .chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).expect("valid arguments");

    let mut out = Vec::new();
    let result = execute_command(&cli, library, &mut out);
    (String::from_utf8(out).expect("utf8 output"), result)
}

#[test]
fn given_help_flag_when_executing_then_prints_help_without_init() {
    let library = StubLibrary::new(Outcome::Verses(vec![]), Outcome::Verses(vec![]));

    let (out, result) = run(&["--help"], library.clone());

    assert!(result.is_ok());
    assert_eq!(out, format!("{HELP}\n"));
    assert_eq!(library.inits(), 0);
}

#[test]
fn given_version_flag_when_executing_then_prints_banner_without_init() {
    let library = StubLibrary::new(Outcome::Verses(vec![]), Outcome::Verses(vec![]));

    let (out, result) = run(&["--v", "--lang", "english", "--ref", "John 3:16"], library.clone());

    assert!(result.is_ok());
    assert_eq!(out, format!("Bible.js v{}\n", env!("CARGO_PKG_VERSION")));
    assert_eq!(version_banner(), format!("Bible.js v{}", env!("CARGO_PKG_VERSION")));
    assert_eq!(library.inits(), 0);
}

#[test]
fn given_missing_language_when_executing_then_prints_help() {
    let library = StubLibrary::new(Outcome::Verses(vec![john_3_16()]), Outcome::Verses(vec![]));

    let (out, _) = run(&["--ref", "John 3:16"], library.clone());

    assert_eq!(out, format!("{HELP}\n"));
    assert_eq!(library.inits(), 0);
}

#[test]
fn given_malformed_color_when_executing_then_reports_and_stops_before_init() {
    let library = StubLibrary::new(Outcome::Verses(vec![john_3_16()]), Outcome::Verses(vec![]));

    let (out, result) = run(
        &["--lang", "english", "--ref", "John 3:16", "--rc", "255,0"],
        library.clone(),
    );

    assert!(result.is_ok(), "invalid color does not fail the process");
    assert!(out.starts_with("Invalid result color."));
    assert!(!out.contains("You are reading"));
    assert_eq!(library.inits(), 0);
}

#[test]
fn given_reference_when_executing_then_echo_separator_and_box() {
    let library = StubLibrary::new(Outcome::Verses(vec![john_3_16()]), Outcome::Verses(vec![]));

    let (out, result) = run(&["--language", "english", "--reference", "John 3:16"], library.clone());

    assert!(result.is_ok());
    assert_eq!(library.inits(), 1);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "You are reading John 3:16");
    assert_eq!(lines[1], SEPARATOR);
    assert_eq!(lines[2], SEPARATOR, "block separator precedes the boxes");
    assert!(lines[3].starts_with('╔'));
    assert!(lines[4].starts_with('║') && lines[4].trim_matches(|c| c == '║' || c == ' ') == "John 3:16");
    assert!(out.contains("For God so loved..."));
    assert!(lines.last().is_some_and(|l| l.starts_with('╚')));
}

#[test]
fn given_malformed_color_and_version_when_executing_then_color_error_wins() {
    let library = StubLibrary::new(Outcome::Verses(vec![]), Outcome::Verses(vec![]));

    let (out, result) = run(&["--v", "--rc", "1,2"], library.clone());

    assert!(result.is_ok());
    assert!(out.starts_with("Invalid result color."));
    assert!(!out.contains("Bible.js v"));
    assert_eq!(library.inits(), 0);
}

#[test]
fn given_malformed_color_and_help_when_executing_then_color_error_wins() {
    let library = StubLibrary::new(Outcome::Verses(vec![]), Outcome::Verses(vec![]));

    let (out, _) = run(&["--help", "--rc", "red"], library);

    assert!(out.starts_with("Invalid result color."));
    assert!(!out.contains(HELP));
}

#[rstest::rstest]
#[case(&["--lang", "", "--ref", "John 3:16"])]
#[case(&["--lang", "english", "--s", ""])]
#[case(&["--lang", "english", "--ref", ""])]
fn given_empty_flag_values_when_executing_then_prints_help_without_init(#[case] args: &[&str]) {
    let library = StubLibrary::new(
        Outcome::Verses(vec![john_3_16()]),
        Outcome::Verses(vec![john_3_16()]),
    );

    let (out, result) = run(args, library.clone());

    assert!(result.is_ok());
    assert_eq!(out, format!("{HELP}\n"));
    assert_eq!(library.inits(), 0);
}

#[test]
fn given_only_verses_when_executing_then_prints_exactly_the_text() {
    let library = StubLibrary::new(Outcome::Verses(vec![john_3_16()]), Outcome::Verses(vec![]));

    let (out, _) = run(
        &["--lang", "english", "--ref", "John 3:16", "--onlyVerses"],
        library,
    );

    assert_eq!(out, format!("For God so loved...{LINE_ENDING}"));
}

#[test]
fn given_search_when_executing_then_highlights_matched_substring_only() {
    colored::control::set_override(true);
    let library = StubLibrary::new(
        Outcome::Verses(vec![]),
        Outcome::Verses(vec![john_3_16()]),
    );

    let (out, _) = run(
        &["--lang", "english", "--s", "love", "--onlyVerses"],
        library,
    );

    assert_eq!(
        out,
        format!("For God so \x1b[38;2;255;0;0mlove\x1b[0md...{LINE_ENDING}")
    );
}

#[test]
fn given_custom_color_when_searching_then_uses_that_color() {
    colored::control::set_override(true);
    let library = StubLibrary::new(
        Outcome::Verses(vec![]),
        Outcome::Verses(vec![john_3_16()]),
    );

    let (out, _) = run(
        &["--lang", "english", "--s", "God", "--rc", "0, 128, 255", "--onlyVerses"],
        library,
    );

    assert!(out.contains("\x1b[38;2;0;128;255mGod\x1b[0m"));
}

#[test]
fn given_empty_result_when_executing_then_not_found_without_boxes() {
    let library = StubLibrary::new(Outcome::Verses(vec![]), Outcome::Verses(vec![]));

    let (out, result) = run(&["--lang", "english", "--ref", "Hezekiah 1:1"], library);

    assert!(result.is_ok());
    assert!(out.contains(NOT_FOUND));
    assert!(!out.contains('╔'));
}

#[test]
fn given_failing_lookup_when_executing_then_prints_error_only() {
    let library = StubLibrary::new(Outcome::Fail("boom"), Outcome::Verses(vec![]));

    let (out, result) = run(&["--lang", "english", "--ref", "John 3:16"], library);

    assert!(result.is_ok(), "request failures are reported, not fatal");
    assert!(out.contains("Error: "));
    assert!(out.contains("boom"));
    assert!(!out.contains(NOT_FOUND));
    assert!(!out.contains('╔'));
}

#[test]
fn given_lookup_and_search_when_one_fails_then_other_block_prints_whole() {
    colored::control::set_override(true);
    let library = StubLibrary::new(Outcome::Fail("boom"), Outcome::Verses(vec![john_3_16()]));

    let (out, result) = run(
        &["--lang", "english", "--ref", "John 3:16", "--s", "loved"],
        library,
    );
    assert!(result.is_ok());

    let preamble = format!("You are reading John 3:16\nYou are searching loved\n{SEPARATOR}\n");
    let rest = out.strip_prefix(&preamble).expect("preamble first");

    let options = InvocationOptions {
        language: "english".into(),
        reference: Some("John 3:16".into()),
        search: Some("loved".into()),
        only_verses: false,
        result_color: ResultColor::default(),
    };
    let formatter = OutputFormatter::new(&options);
    let lookup_block = formatter.render(&Err(ApplicationError::Lookup {
        reference: "John 3:16".into(),
        source: Box::new(InfraError::Data {
            source_name: "stub".into(),
            message: "boom".into(),
        }),
    }));
    let search_block = formatter.render(&Ok(vec![john_3_16()]));

    // Blocks may arrive in either order but are never torn.
    assert!(lookup_block.contains("boom"));
    assert!(
        rest == format!("{lookup_block}{search_block}")
            || rest == format!("{search_block}{lookup_block}"),
        "unexpected output: {rest:?}"
    );
}

#[test]
fn given_failing_init_when_executing_then_fatal_config_error() {
    let library = StubLibrary::failing();

    let (out, result) = run(&["--lang", "klingon", "--ref", "John 3:16"], library.clone());

    let err = result.expect_err("init failure is fatal");
    assert_eq!(err.exit_code(), exitcode::CONFIG);
    assert!(err.to_string().contains("klingon"));
    assert!(out.starts_with("You are reading John 3:16"));
    assert_eq!(library.inits(), 1);
}

#[test]
fn given_missing_config_file_when_executing_then_fatal_config_error() {
    let library = StubLibrary::new(Outcome::Verses(vec![]), Outcome::Verses(vec![]));
    let cli = Cli::try_parse_from([
        "bible",
        "--config",
        "/nonexistent/.bible-config",
        "--lang",
        "english",
        "--ref",
        "John 3:16",
    ])
    .unwrap();

    let mut out = Vec::new();
    let err = execute_command(&cli, library.clone(), &mut out).expect_err("missing config");

    assert_eq!(err.exit_code(), exitcode::CONFIG);
    assert_eq!(library.inits(), 0);
}
