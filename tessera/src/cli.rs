use clap::{ColorChoice, Parser, ValueEnum};
use tessera_config::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Target {
  /// Generate an Arduino sketch (setup/loop wrappers, BLE catalog enabled)
  Arduino,
  /// Generate a Python script
  Python,
}

impl From<Target> for Dialect {
  fn from(value: Target) -> Dialect {
    match value {
      Target::Arduino => Dialect::arduino(),
      Target::Python => Dialect::python(),
    }
  }
}

#[derive(Parser)]
#[command(author, version, about = "Block-graph to source-text code generator", long_about = None)]
#[command(color = ColorChoice::Always)]
pub struct Cli {
  /// Graph JSON file exported by the editor
  pub graph: String,

  /// The dialect to generate for
  #[arg(short, long, value_enum, default_value = "arduino")]
  pub target: Target,

  /// Load dialect settings from a TOML file instead of the built-ins
  #[arg(long)]
  pub dialect_file: Option<String>,

  /// Write the generated source here instead of stdout
  #[arg(short, long)]
  pub output: Option<String>,

  /// Don't print any output besides the generated source
  #[arg(long, short = 'q', default_value = "false")]
  pub quiet: bool,

  /// Use verbose output
  #[arg(long, short, action = clap::ArgAction::Count)]
  pub verbose: u8,
}
