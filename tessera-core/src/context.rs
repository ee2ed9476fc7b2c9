use std::collections::{BTreeMap, HashMap};

use tessera_config::Dialect;

use crate::names::NameTable;

/// Per-run mutable store shared by all emitters of one generation run.
///
/// Holds three order-distinct collections — definitions (top-of-file
/// declarations and includes), setup statements (one-time initialization)
/// and body statements (for dialects with an implicit repeating entry
/// point) — each keyed by a caller-chosen deduplication key.
///
/// Upsert is idempotent: writing the same key again overwrites, never
/// duplicates, so two unrelated blocks contributing the same requirement
/// inherently deduplicate. Drain order is the lexicographic order of the
/// keys, not insertion order; callers encode hard ordering dependencies as
/// numeric bands inside the key itself (`ble_10_...` sorts, and therefore
/// runs, before `ble_20_...` no matter which emitter executed first).
///
/// A context belongs to exactly one run. The finalizer consumes it by
/// value, so a drained context cannot be reused or finished twice.
#[derive(Debug)]
pub struct EmissionContext {
  definitions: BTreeMap<String, String>,
  setup: BTreeMap<String, String>,
  body: BTreeMap<String, String>,
  notes: HashMap<String, String>,
  names: NameTable,
}

impl EmissionContext {
  pub fn new(dialect: &Dialect) -> Self {
    Self {
      definitions: BTreeMap::new(),
      setup: BTreeMap::new(),
      body: BTreeMap::new(),
      notes: HashMap::new(),
      names: NameTable::new(&dialect.reserved_words),
    }
  }

  /// Upserts a top-of-file definition (declaration, include, hoisted
  /// function). Last write for a key wins.
  pub fn add_definition(
    &mut self,
    key: impl Into<String>,
    code: impl Into<String>,
  ) {
    self.definitions.insert(key.into(), code.into());
  }

  /// Upserts a one-time initialization statement. Entry text should carry
  /// no indentation of its own; the finalizer indents uniformly.
  pub fn add_setup(
    &mut self,
    key: impl Into<String>,
    code: impl Into<String>,
  ) {
    self.setup.insert(key.into(), code.into());
  }

  /// Upserts a statement for the dialect's implicit repeating entry point.
  pub fn add_body(
    &mut self,
    key: impl Into<String>,
    code: impl Into<String>,
  ) {
    self.body.insert(key.into(), code.into());
  }

  /// Intra-run scratch value for cross-emitter coordination (e.g. the most
  /// recently declared peripheral instance another emitter must reference).
  pub fn set_note(
    &mut self,
    key: impl Into<String>,
    value: impl Into<String>,
  ) {
    self.notes.insert(key.into(), value.into());
  }

  pub fn note(
    &self,
    key: &str,
  ) -> Option<&str> {
    self.notes.get(key).map(|value| value.as_str())
  }

  pub fn names(&mut self) -> &mut NameTable {
    &mut self.names
  }

  /// Drains definitions in key order. Entry text is returned untouched.
  pub fn drain_definitions(&mut self) -> Vec<(String, String)> {
    std::mem::take(&mut self.definitions).into_iter().collect()
  }

  /// Drains setup statements in key order (ordering bands included).
  pub fn drain_setup(&mut self) -> Vec<(String, String)> {
    std::mem::take(&mut self.setup).into_iter().collect()
  }

  /// Drains body statements in key order.
  pub fn drain_body(&mut self) -> Vec<(String, String)> {
    std::mem::take(&mut self.body).into_iter().collect()
  }
}
