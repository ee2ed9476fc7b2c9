//! Built-in emitter catalogs.
//!
//! Each catalog is a plain `register` function over an [`EmitterRegistry`],
//! so hosts can compose catalogs (and extension catalogs can override
//! individual kinds — last registration wins).

pub mod arduino;
pub mod arduino_ble;
pub mod python;

use tessera_graph::{BlockNode, FieldValue};

use crate::errors::GenerationError;
use crate::registry::EmitterRegistry;

/// The full embedded-dialect registry: the base catalog plus the BLE
/// extension catalog.
pub fn arduino_registry() -> EmitterRegistry {
  let mut registry = EmitterRegistry::new();
  arduino::register(&mut registry);
  arduino_ble::register(&mut registry);
  registry
}

/// The scripting-dialect registry.
pub fn python_registry() -> EmitterRegistry {
  let mut registry = EmitterRegistry::new();
  python::register(&mut registry);
  registry
}

/// A literal field an emitter cannot do without. Absence is a structural
/// defect of the node, not an unconnected slot, so it is fatal.
pub(crate) fn required_field<'n>(
  node: &'n BlockNode,
  name: &str,
) -> Result<&'n FieldValue, GenerationError> {
  node.field(name).ok_or_else(|| GenerationError::missing_field(node, name))
}

/// Required field rendered as text (numbers render integrally).
pub(crate) fn required_text(
  node: &BlockNode,
  name: &str,
) -> Result<String, GenerationError> {
  required_field(node, name).map(|value| value.to_string())
}

/// Optional field rendered as text, with a fallback.
pub(crate) fn field_text_or(
  node: &BlockNode,
  name: &str,
  fallback: &str,
) -> String {
  node.field(name).map(|value| value.to_string()).unwrap_or_else(|| fallback.to_string())
}
