//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::domain::{InvocationOptions, ResultColor};

/// Usage text printed for `--help` and incomplete invocations.
pub const HELP: &str = "bible --help
usage: bible [options]

Read the Holy Bible from the command line.

options:
  --v, --version          print the version
  --lang, --language      set the Bible language
  --ref, --reference      the verse references that you want to read
  --onlyVerses            prevent showing additional output
  --s, --search           get the verses that match to the string or
                          regular expression provided
  --rc, --resultColor     set the result color when searching something
  --config                configuration file (default: ~/.bible-config)
  -d, --debug             increase log verbosity (repeatable)
  --generate              print shell completions
  --help                  print this output

Documentation can be found at https://github.com/BibleJS/BibleApp";

/// Read the Holy Bible from the command line
#[derive(Parser, Debug, Default)]
#[command(name = "bible")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(override_help = HELP)]
pub struct Cli {
    /// Print the version
    #[arg(long, visible_alias = "v")]
    pub version: bool,

    /// Bible language
    #[arg(long, visible_alias = "lang", value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Verse reference to read, e.g. "John 3:16"
    #[arg(long, visible_alias = "ref", value_name = "REFERENCE")]
    pub reference: Option<String>,

    /// Print raw verse text only
    #[arg(long = "onlyVerses")]
    pub only_verses: bool,

    /// String or regular expression to search for
    #[arg(long, visible_alias = "s", value_name = "PATTERN", allow_hyphen_values = true)]
    pub search: Option<String>,

    /// Highlight color for search matches: "r, g, b"
    #[arg(long = "resultColor", visible_alias = "rc", value_name = "R,G,B")]
    pub result_color: Option<String>,

    /// Print usage
    #[arg(long)]
    pub help: bool,

    /// Configuration file (default: ~/.bible-config)
    #[arg(long, env = "BIBLE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Print shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,
}

impl Cli {
    /// Options for the lookup/search path.
    ///
    /// `None` means the usage text should be shown instead: `--help` was given, the
    /// language is missing, or there is neither a reference nor a search pattern.
    /// Empty values count as missing.
    pub fn invocation_options(&self, result_color: ResultColor) -> Option<InvocationOptions> {
        let reference = non_empty(self.reference.as_deref());
        let search = non_empty(self.search.as_deref());
        if self.help || (reference.is_none() && search.is_none()) {
            return None;
        }
        let language = non_empty(self.language.as_deref())?;
        Some(InvocationOptions {
            language,
            reference,
            search,
            only_verses: self.only_verses,
            result_color,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}
