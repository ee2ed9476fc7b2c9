use std::error::Error;
use std::fmt;

use tessera_graph::BlockNode;

/// Fatal generation failure. Every variant carries the offending node's kind
/// and id; none are recovered inside the core — either a complete source
/// string is produced, or one of these is returned and no output exists.
#[derive(Debug)]
pub enum GenerationError {
  /// Traversal or expression resolution hit a node whose kind has no
  /// registered emitter.
  UnknownKind { kind: String, node_id: String },
  /// An emitter's required literal field is absent from the node. Distinct
  /// from an unconnected expression slot, which resolves to a default.
  MissingRequiredField {
    kind: String,
    node_id: String,
    field: String,
  },
  /// An emitter (possibly extension-registered) failed internally. The
  /// original cause is preserved for diagnostics.
  EmitterFailed {
    kind: String,
    node_id: String,
    source: Box<dyn Error + Send + Sync>,
  },
}

impl GenerationError {
  pub fn unknown_kind(
    kind: impl Into<String>,
    node_id: impl Into<String>,
  ) -> Self {
    Self::UnknownKind {
      kind: kind.into(),
      node_id: node_id.into(),
    }
  }

  pub fn missing_field(
    node: &BlockNode,
    field: impl Into<String>,
  ) -> Self {
    Self::MissingRequiredField {
      kind: node.kind.clone(),
      node_id: node.id.clone(),
      field: field.into(),
    }
  }

  pub fn emitter_failed(
    node: &BlockNode,
    source: impl Into<Box<dyn Error + Send + Sync>>,
  ) -> Self {
    Self::EmitterFailed {
      kind: node.kind.clone(),
      node_id: node.id.clone(),
      source: source.into(),
    }
  }

  /// Error code used in rendered output (`GEN0001`..`GEN0003`).
  pub fn code(&self) -> &'static str {
    match self {
      GenerationError::UnknownKind { .. } => "GEN0001",
      GenerationError::MissingRequiredField { .. } => "GEN0002",
      GenerationError::EmitterFailed { .. } => "GEN0003",
    }
  }

  /// Kind of the node the failure is attached to.
  pub fn kind(&self) -> &str {
    match self {
      GenerationError::UnknownKind { kind, .. } => kind,
      GenerationError::MissingRequiredField { kind, .. } => kind,
      GenerationError::EmitterFailed { kind, .. } => kind,
    }
  }

  /// Id of the node the failure is attached to.
  pub fn node_id(&self) -> &str {
    match self {
      GenerationError::UnknownKind { node_id, .. } => node_id,
      GenerationError::MissingRequiredField { node_id, .. } => node_id,
      GenerationError::EmitterFailed { node_id, .. } => node_id,
    }
  }
}

impl fmt::Display for GenerationError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      GenerationError::UnknownKind { kind, node_id } => {
        write!(f, "GEN0001 No emitter registered for block kind '{}' (node {})", kind, node_id)
      },
      GenerationError::MissingRequiredField { kind, node_id, field } => {
        write!(
          f,
          "GEN0002 Block kind '{}' is missing required field '{}' (node {})",
          kind, field, node_id
        )
      },
      GenerationError::EmitterFailed { kind, node_id, source } => {
        write!(f, "GEN0003 Emitter for block kind '{}' failed (node {}): {}", kind, node_id, source)
      },
    }
  }
}

impl Error for GenerationError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      GenerationError::EmitterFailed { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_carries_code_kind_and_node_id() {
    let err = GenerationError::unknown_kind("mystery_block", "b42");
    let rendered = err.to_string();
    assert!(rendered.contains("GEN0001"));
    assert!(rendered.contains("mystery_block"));
    assert!(rendered.contains("b42"));
  }

  #[test]
  fn emitter_failure_preserves_cause() {
    let node = BlockNode::new("ext_block", "b7");
    let err = GenerationError::emitter_failed(&node, "uuid field malformed");

    assert_eq!(err.code(), "GEN0003");
    assert_eq!(err.kind(), "ext_block");
    assert_eq!(err.node_id(), "b7");
    assert!(err.source().is_some());
  }
}
