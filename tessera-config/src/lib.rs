//! Dialect configuration.
//!
//! A [`Dialect`] carries everything target-language-specific the generation
//! core needs without knowing the language itself: the reserved-word set for
//! name collision avoidance, the statement terminator, entry-point wrapper
//! templates, and the default-literal table used when an expression slot is
//! left unconnected.
//!
//! Dialects are plain serde structs loadable from TOML, so a host can ship
//! a custom target without recompiling, in the same way the built-in
//! `arduino()` and `python()` dialects are defined here.

use serde::{Deserialize, Serialize};

/// Expected value category of an expression slot, used to pick the default
/// literal for an unconnected slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
  Number,
  Text,
  Boolean,
  /// Digital pin level (Arduino `HIGH`/`LOW` style dialect literals).
  PinState,
}

/// Default literal per value kind. Centralized so the filler emitted for an
/// unconnected slot is consistent and auditable across the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultLiterals {
  pub number: String,
  pub text: String,
  pub boolean: String,
  pub pin_state: String,
}

impl DefaultLiterals {
  pub fn for_kind(
    &self,
    kind: ValueKind,
  ) -> &str {
    match kind {
      ValueKind::Number => &self.number,
      ValueKind::Text => &self.text,
      ValueKind::Boolean => &self.boolean,
      ValueKind::PinState => &self.pin_state,
    }
  }
}

/// A target dialect: the complete language-facing configuration for one
/// generation target.
///
/// Wrapper templates use a `{body}` placeholder; the finalizer substitutes
/// the (already indented) section text. A dialect without wrappers emits its
/// sections bare, in definitions/setup/body order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialect {
  /// Display name, used in logs only.
  pub name: String,
  /// Appended when an expression result lands in statement position.
  pub statement_terminator: String,
  /// Indent unit for nested statement chains and wrapped sections.
  pub indent: String,
  /// Words the name table must never hand out.
  pub reserved_words: Vec<String>,
  /// Template for a pre-declared global variable, `{name}` placeholder.
  /// `None` means globals are not hoisted into definitions.
  pub variable_declaration: Option<String>,
  /// Wrapper around drained setup statements (init-function syntax).
  pub setup_wrapper: Option<String>,
  /// Wrapper around the walked body plus drained body statements
  /// (main-loop syntax).
  pub loop_wrapper: Option<String>,
  pub defaults: DefaultLiterals,
}

impl Dialect {
  /// The embedded C-like dialect.
  pub fn arduino() -> Self {
    Self {
      name: "arduino".to_string(),
      statement_terminator: ";".to_string(),
      indent: "  ".to_string(),
      reserved_words: ARDUINO_RESERVED_WORDS.iter().map(|word| word.to_string()).collect(),
      variable_declaration: Some("int {name} = 0;".to_string()),
      setup_wrapper: Some("void setup() {\n{body}\n}".to_string()),
      loop_wrapper: Some("void loop() {\n{body}\n}".to_string()),
      defaults: DefaultLiterals {
        number: "0".to_string(),
        text: "\"\"".to_string(),
        boolean: "false".to_string(),
        pin_state: "HIGH".to_string(),
      },
    }
  }

  /// The scripting dialect. No entry-point wrappers: definitions (imports),
  /// setup statements and the body are emitted bare, in that order.
  pub fn python() -> Self {
    Self {
      name: "python".to_string(),
      statement_terminator: String::new(),
      indent: "  ".to_string(),
      reserved_words: PYTHON_RESERVED_WORDS.iter().map(|word| word.to_string()).collect(),
      variable_declaration: Some("{name} = None".to_string()),
      setup_wrapper: None,
      loop_wrapper: None,
      defaults: DefaultLiterals {
        number: "0".to_string(),
        text: "\"\"".to_string(),
        boolean: "False".to_string(),
        pin_state: "1".to_string(),
      },
    }
  }

  pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(source)
  }

  pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(self)
  }

  pub fn is_reserved(
    &self,
    word: &str,
  ) -> bool {
    self.reserved_words.iter().any(|reserved| reserved == word)
  }
}

/// Reserved words of the embedded dialect: language keywords plus the core
/// runtime symbols user names must never shadow.
pub const ARDUINO_RESERVED_WORDS: &[&str] = &[
  "setup",
  "loop",
  "if",
  "else",
  "for",
  "while",
  "switch",
  "case",
  "break",
  "continue",
  "return",
  "void",
  "int",
  "long",
  "float",
  "double",
  "char",
  "byte",
  "word",
  "boolean",
  "String",
  "pinMode",
  "digitalWrite",
  "digitalRead",
  "analogRead",
  "analogWrite",
  "delay",
  "delayMicroseconds",
  "millis",
  "micros",
  "Serial",
  "Serial1",
  "Serial2",
  "Serial3",
  "SerialUSB",
  "Keyboard",
  "Mouse",
  "tone",
  "noTone",
  "pulseIn",
  "pulseInLong",
  "shiftOut",
  "shiftIn",
  "attachInterrupt",
  "detachInterrupt",
  "interrupts",
  "noInterrupts",
  "HIGH",
  "LOW",
  "INPUT",
  "OUTPUT",
  "INPUT_PULLUP",
];

pub const PYTHON_RESERVED_WORDS: &[&str] = &[
  "False",
  "None",
  "True",
  "and",
  "as",
  "assert",
  "async",
  "await",
  "break",
  "class",
  "continue",
  "def",
  "del",
  "elif",
  "else",
  "except",
  "finally",
  "for",
  "from",
  "global",
  "if",
  "import",
  "in",
  "is",
  "lambda",
  "nonlocal",
  "not",
  "or",
  "pass",
  "raise",
  "return",
  "try",
  "while",
  "with",
  "yield",
  "print",
  "input",
  "range",
  "len",
  "str",
  "int",
  "float",
];
