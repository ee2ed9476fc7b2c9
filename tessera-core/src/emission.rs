use std::fmt;

/// Binding strength of an emitted expression fragment.
///
/// Convention (fixed for the whole core): **lower value binds tighter**. A
/// parent embedding a child passes the loosest precedence it can accept
/// unparenthesized; the walker wraps the child's text in parentheses when
/// the child's returned precedence is numerically greater. Atomic fragments
/// ([`Precedence::ATOMIC`]) are therefore never parenthesized, and a parent
/// asking at [`Precedence::NONE`] never parenthesizes anything.
///
/// Dialect catalogs define their own operator tables on top of this scale
/// (see `emitters::arduino` and `emitters::python`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precedence(pub u8);

impl Precedence {
  /// Literals, identifiers, calls, parenthesized text.
  pub const ATOMIC: Precedence = Precedence(0);
  /// Loosest possible context; accepts any child without parentheses.
  pub const NONE: Precedence = Precedence(99);
}

impl fmt::Display for Precedence {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Result of emitting one block.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
  /// Zero or more complete, newline-terminated statements.
  Statement(String),
  /// Expression text (no trailing terminator) with its binding strength.
  Expression(String, Precedence),
}

impl Emission {
  /// An atomic expression fragment.
  pub fn atomic(text: impl Into<String>) -> Self {
    Emission::Expression(text.into(), Precedence::ATOMIC)
  }

  /// A statement fragment contributing no inline text (blocks that only
  /// populate the context's side tables).
  pub fn empty() -> Self {
    Emission::Statement(String::new())
  }
}
