//! Block-graph data model.
//!
//! A graph is the external input to the code generator: the visual editor
//! owns its structural legality, this crate only carries it. Every node has
//! a kind tag, literal fields, named expression slots, named statement
//! slots, and an optional `next` sibling in its statement chain.

use std::collections::HashMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A literal field value attached to a block.
///
/// The editor serializes fields as plain JSON scalars, so the enum is
/// untagged. Enum-style dropdown fields arrive as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Boolean(bool),
  Number(f64),
  Text(String),
}

impl FieldValue {
  pub fn as_text(&self) -> Option<&str> {
    match self {
      FieldValue::Text(text) => Some(text),
      _ => None,
    }
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      FieldValue::Number(value) => Some(*value),
      _ => None,
    }
  }

  pub fn as_boolean(&self) -> Option<bool> {
    match self {
      FieldValue::Boolean(value) => Some(*value),
      _ => None,
    }
  }
}

impl Display for FieldValue {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    match self {
      FieldValue::Boolean(value) => write!(f, "{}", value),
      FieldValue::Number(value) => write!(f, "{}", format_number(*value)),
      FieldValue::Text(text) => write!(f, "{}", text),
    }
  }
}

/// Renders a number the way source text expects it: integral values lose
/// the trailing `.0` (a pin field holding `13.0` must emit as `13`).
pub fn format_number(value: f64) -> String {
  if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
    format!("{}", value as i64)
  } else {
    format!("{}", value)
  }
}

/// One visual program element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockNode {
  /// Stable node id, reported back in generation errors.
  pub id: String,
  /// Kind tag that selects the emitter.
  pub kind: String,
  /// Literal field values, typed by the block's declared schema.
  #[serde(default, skip_serializing_if = "HashMap::is_empty")]
  pub fields: HashMap<String, FieldValue>,
  /// Expression slots: slot name to connected child.
  #[serde(default, skip_serializing_if = "HashMap::is_empty")]
  pub values: HashMap<String, BlockNode>,
  /// Statement slots: slot name to the head of a nested chain.
  #[serde(default, skip_serializing_if = "HashMap::is_empty")]
  pub statements: HashMap<String, BlockNode>,
  /// Next statement in this node's own chain.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub next: Option<Box<BlockNode>>,
}

impl BlockNode {
  pub fn new(
    kind: impl Into<String>,
    id: impl Into<String>,
  ) -> Self {
    Self {
      kind: kind.into(),
      id: id.into(),
      ..Default::default()
    }
  }

  pub fn field(
    &self,
    name: &str,
  ) -> Option<&FieldValue> {
    self.fields.get(name)
  }

  pub fn value(
    &self,
    slot: &str,
  ) -> Option<&BlockNode> {
    self.values.get(slot)
  }

  pub fn statement(
    &self,
    slot: &str,
  ) -> Option<&BlockNode> {
    self.statements.get(slot)
  }

  pub fn with_field(
    mut self,
    name: impl Into<String>,
    value: FieldValue,
  ) -> Self {
    self.fields.insert(name.into(), value);
    self
  }

  pub fn with_text_field(
    self,
    name: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.with_field(name, FieldValue::Text(value.into()))
  }

  pub fn with_number_field(
    self,
    name: impl Into<String>,
    value: f64,
  ) -> Self {
    self.with_field(name, FieldValue::Number(value))
  }

  pub fn with_value(
    mut self,
    slot: impl Into<String>,
    child: BlockNode,
  ) -> Self {
    self.values.insert(slot.into(), child);
    self
  }

  pub fn with_statement(
    mut self,
    slot: impl Into<String>,
    head: BlockNode,
  ) -> Self {
    self.statements.insert(slot.into(), head);
    self
  }

  pub fn with_next(
    mut self,
    next: BlockNode,
  ) -> Self {
    self.next = Some(Box::new(next));
    self
  }
}

/// A global identity declared outside any block (workspace variables).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalVariable {
  pub id: String,
  pub name: String,
}

/// A whole program: top-level block stacks in declared order, plus global
/// identities used to pre-seed the generator's name table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
  #[serde(default)]
  pub variables: Vec<GlobalVariable>,
  #[serde(default)]
  pub blocks: Vec<BlockNode>,
}

impl Program {
  pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(source)
  }

  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }
}
