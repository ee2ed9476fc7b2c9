use std::collections::HashMap;

use tessera_graph::BlockNode;

use crate::emission::Emission;
use crate::errors::GenerationError;
use crate::generator::CodeGenerator;

/// Boxed emitter: translates one block kind into target-dialect text,
/// mutating the run's emission context through the generator it is handed.
pub type EmitterFn = Box<dyn Fn(&BlockNode, &mut CodeGenerator) -> Result<Emission, GenerationError>>;

/// Explicit, injectable mapping from block kind to emitter.
///
/// Not a global: the caller owns the registry, populates it once per target
/// dialect at startup (plus any extension catalogs), and lends it immutably
/// to each generation run. Registration is idempotent and the last
/// registration for a kind wins, which is what lets extensions override
/// built-in emitters at runtime.
#[derive(Default)]
pub struct EmitterRegistry {
  emitters: HashMap<String, EmitterFn>,
}

impl EmitterRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers or overwrites the emitter for `kind`.
  pub fn register<F>(
    &mut self,
    kind: impl Into<String>,
    emitter: F,
  ) where
    F: Fn(&BlockNode, &mut CodeGenerator) -> Result<Emission, GenerationError> + 'static,
  {
    self.emitters.insert(kind.into(), Box::new(emitter));
  }

  pub fn get(
    &self,
    kind: &str,
  ) -> Option<&EmitterFn> {
    self.emitters.get(kind)
  }

  pub fn contains(
    &self,
    kind: &str,
  ) -> bool {
    self.emitters.contains_key(kind)
  }

  pub fn len(&self) -> usize {
    self.emitters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.emitters.is_empty()
  }
}

impl std::fmt::Debug for EmitterRegistry {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    f.debug_struct("EmitterRegistry").field("kinds", &self.emitters.len()).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::emission::Emission;

  #[test]
  fn last_registration_wins() {
    let mut registry = EmitterRegistry::new();
    registry.register("blink", |_, _| Ok(Emission::atomic("first")));
    registry.register("blink", |_, _| Ok(Emission::atomic("second")));

    assert_eq!(registry.len(), 1);
    assert!(registry.contains("blink"));
  }

  #[test]
  fn unregistered_kinds_are_absent() {
    let registry = EmitterRegistry::new();
    assert!(registry.get("mystery").is_none());
    assert!(registry.is_empty());
  }
}
