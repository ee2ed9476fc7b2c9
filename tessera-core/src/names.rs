use std::collections::{HashMap, HashSet};

/// Namespace a logical identity belongs to. Variables and procedures keep
/// separate identity spaces but share one pool of emitted names, so the two
/// realms can never collide in the output text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameRealm {
  Variable,
  Procedure,
}

/// Maps stable logical identities to collision-free, reserved-word-safe
/// names in the target dialect.
///
/// Within one generation run the same identity always maps to the same name,
/// distinct identities never collide, and no emitted name is a dialect
/// reserved word.
#[derive(Debug, Default)]
pub struct NameTable {
  reserved: HashSet<String>,
  assigned: HashMap<(NameRealm, String), String>,
  used: HashSet<String>,
}

impl NameTable {
  pub fn new(reserved_words: &[String]) -> Self {
    Self {
      reserved: reserved_words.iter().cloned().collect(),
      assigned: HashMap::new(),
      used: HashSet::new(),
    }
  }

  /// Pre-seeds `identity` with a preferred display name. Returns the name
  /// actually assigned (sanitized and uniquified if the preference was
  /// unusable). Re-declaring an identity returns its existing name.
  pub fn declare(
    &mut self,
    identity: &str,
    preferred: &str,
    realm: NameRealm,
  ) -> String {
    let key = (realm, identity.to_string());
    if let Some(existing) = self.assigned.get(&key) {
      return existing.clone();
    }

    let name = self.safe_name(preferred);
    self.used.insert(name.clone());
    self.assigned.insert(key, name.clone());
    name
  }

  /// Stable name for `identity`. Unseen identities are assigned on first
  /// use, deriving the name from the identity text itself.
  pub fn get_name(
    &mut self,
    identity: &str,
    realm: NameRealm,
  ) -> String {
    let key = (realm, identity.to_string());
    if let Some(existing) = self.assigned.get(&key) {
      return existing.clone();
    }

    let name = self.safe_name(identity);
    self.used.insert(name.clone());
    self.assigned.insert(key, name.clone());
    name
  }

  /// A fresh name derived from `base`, never handed out before and never
  /// tied to an identity (loop counters, scratch temporaries).
  pub fn distinct_name(
    &mut self,
    base: &str,
  ) -> String {
    let name = self.safe_name(base);
    self.used.insert(name.clone());
    name
  }

  fn safe_name(
    &self,
    candidate: &str,
  ) -> String {
    let base = sanitize(candidate);
    if !self.is_taken(&base) {
      return base;
    }

    let mut counter = 2u32;
    loop {
      let next = format!("{}{}", base, counter);
      if !self.is_taken(&next) {
        return next;
      }
      counter += 1;
    }
  }

  fn is_taken(
    &self,
    name: &str,
  ) -> bool {
    self.reserved.contains(name) || self.used.contains(name)
  }
}

/// Reduces arbitrary text to a legal identifier: non-alphanumeric characters
/// become underscores, a leading digit gets an underscore prefix, empty
/// input becomes `unnamed`.
fn sanitize(candidate: &str) -> String {
  let mut out: String = candidate
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
    .collect();

  if out.is_empty() {
    out = "unnamed".to_string();
  }

  if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
    out.insert(0, '_');
  }

  out
}
