mod cli;

use std::fs;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use colored::Colorize;

use cli::{Cli, Target};
use tessera_config::Dialect;
use tessera_core::emitters::{arduino_registry, python_registry};
use tessera_graph::Program;

fn phase(
  cli: &Cli,
  message: &str,
  detail: &str,
) {
  if !cli.quiet {
    eprintln!("{:indent$}{}... {}", "-->".bright_green().bold(), message, detail, indent = 4);
  }
}

fn fail(message: impl std::fmt::Display) -> ExitCode {
  eprintln!("{}", message);
  ExitCode::FAILURE
}

fn error_line(message: impl std::fmt::Display) -> String {
  format!("{}: {}", "Error".red().bold(), message)
}

fn load_dialect(cli: &Cli) -> Result<Dialect, String> {
  let Some(path) = &cli.dialect_file else {
    return Ok(cli.target.into());
  };

  let content = fs::read_to_string(path).map_err(|e| error_line(format!("Failed to read '{}': {}", path, e)))?;
  Dialect::from_toml(&content).map_err(|e| error_line(format!("Invalid dialect file '{}': {}", path, e)))
}

fn run(cli: &Cli) -> Result<(), String> {
  phase(cli, "Reading", &cli.graph);
  let content = fs::read_to_string(&cli.graph)
    .map_err(|e| error_line(format!("Failed to read '{}': {}", cli.graph, e)))?;
  let program = Program::from_json(&content)
    .map_err(|e| error_line(format!("Invalid graph file '{}': {}", cli.graph, e)))?;

  let dialect = load_dialect(cli)?;
  let registry = match cli.target {
    Target::Arduino => arduino_registry(),
    Target::Python => python_registry(),
  };

  if cli.verbose > 0 && !cli.quiet {
    eprintln!(
      "{:indent$}Dialect '{}', {} emitters, {} top-level blocks",
      "-->".bright_yellow().bold(),
      dialect.name,
      registry.len(),
      program.blocks.len(),
      indent = 4
    );
  }

  phase(cli, "Generating", &dialect.name);
  let source = tessera_core::generate(&program, &registry, &dialect).map_err(|e| {
    let rendered = e.to_string();
    let message = rendered.strip_prefix(e.code()).map(str::trim_start).unwrap_or(&rendered).to_string();
    format!("{}[{}]: {}", "Error".red().bold(), e.code(), message)
  })?;

  match &cli.output {
    Some(path) => {
      fs::write(path, &source)
        .map_err(|e| error_line(format!("Failed to write '{}': {}", path, e)))?;
      phase(cli, "Writing", path);
    },
    None => print!("{}", source),
  }

  Ok(())
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(message) => fail(message),
  }
}
