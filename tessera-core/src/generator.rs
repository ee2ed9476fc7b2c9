use tessera_config::{Dialect, ValueKind};
use tessera_graph::{BlockNode, Program};

use crate::context::EmissionContext;
use crate::emission::{Emission, Precedence};
use crate::errors::GenerationError;
use crate::finalizer;
use crate::names::NameRealm;
use crate::registry::EmitterRegistry;

/// Graph walker and code assembler for one generation run.
///
/// Owns the run's [`EmissionContext`] and borrows the emitter registry and
/// dialect immutably, so a registry can serve any number of sequential runs
/// while each run keeps its own context. Traversal is depth-first over the
/// declared structure of the graph: expression slots resolve before their
/// parent emits, and statement chains concatenate in `next`-link order, so
/// the same graph always assembles the same body text.
pub struct CodeGenerator<'a> {
  registry: &'a EmitterRegistry,
  dialect: &'a Dialect,
  ctx: EmissionContext,
}

impl<'a> CodeGenerator<'a> {
  pub fn new(
    registry: &'a EmitterRegistry,
    dialect: &'a Dialect,
  ) -> Self {
    Self {
      registry,
      dialect,
      ctx: EmissionContext::new(dialect),
    }
  }

  pub fn dialect(&self) -> &Dialect {
    self.dialect
  }

  /// The run's shared emission context, for emitter side effects.
  pub fn context(&mut self) -> &mut EmissionContext {
    &mut self.ctx
  }

  /// Walks the whole program and returns the assembled body text. Side
  /// tables accumulate in the context; [`CodeGenerator::finish`] drains
  /// them into the final unit.
  pub fn generate(
    &mut self,
    program: &Program,
  ) -> Result<String, GenerationError> {
    self.seed_globals(program);

    let mut body = String::new();
    for block in &program.blocks {
      body.push_str(&self.block_to_code(block)?);
    }

    Ok(body)
  }

  /// Finalizes the run: drains the context once and stitches definitions,
  /// wrapped setup and wrapped body into the complete source unit.
  pub fn finish(
    self,
    body: &str,
  ) -> String {
    finalizer::finish(self.dialect, body, self.ctx)
  }

  /// Emits one statement chain: the node itself, then every `next` sibling.
  pub fn block_to_code(
    &mut self,
    node: &BlockNode,
  ) -> Result<String, GenerationError> {
    let mut code = self.statement_text(node)?;

    let mut current = node;
    while let Some(next) = current.next.as_deref() {
      code.push_str(&self.statement_text(next)?);
      current = next;
    }

    Ok(code)
  }

  /// Resolves the expression child connected to `slot`.
  ///
  /// An unconnected slot resolves to the dialect's default literal for
  /// `kind` — never an error. A connected child is emitted and its text
  /// parenthesized when its returned precedence is looser (numerically
  /// greater) than `max`, the loosest precedence the caller accepts.
  ///
  /// A statement block wired into a value slot (structurally illegal, but
  /// the core stays total) contributes its text stripped of the trailing
  /// terminator, ranked [`Precedence::NONE`].
  pub fn value_to_code(
    &mut self,
    parent: &BlockNode,
    slot: &str,
    max: Precedence,
    kind: ValueKind,
  ) -> Result<String, GenerationError> {
    let Some(child) = parent.value(slot) else {
      return Ok(self.dialect.defaults.for_kind(kind).to_string());
    };

    let (text, precedence) = match self.emit_node(child)? {
      Emission::Expression(text, precedence) => (text, precedence),
      Emission::Statement(text) => {
        let mut trimmed = text.trim_end();
        let terminator = self.dialect.statement_terminator.as_str();
        if !terminator.is_empty() {
          trimmed = trimmed.strip_suffix(terminator).unwrap_or(trimmed);
        }
        (trimmed.to_string(), Precedence::NONE)
      },
    };

    if precedence > max {
      Ok(format!("({})", text))
    } else {
      Ok(text)
    }
  }

  /// Resolves the statement chain connected to `slot`, indented one level.
  /// An unconnected slot produces empty text.
  pub fn statement_to_code(
    &mut self,
    parent: &BlockNode,
    slot: &str,
  ) -> Result<String, GenerationError> {
    match parent.statement(slot) {
      None => Ok(String::new()),
      Some(head) => {
        let code = self.block_to_code(head)?;
        Ok(indent_lines(&code, &self.dialect.indent))
      },
    }
  }

  /// Stable emitted name for a variable identity.
  pub fn variable_name(
    &mut self,
    identity: &str,
  ) -> String {
    self.ctx.names().get_name(identity, NameRealm::Variable)
  }

  /// Stable emitted name for a procedure identity.
  pub fn procedure_name(
    &mut self,
    identity: &str,
  ) -> String {
    self.ctx.names().get_name(identity, NameRealm::Procedure)
  }

  /// Fresh, never-reused name (loop counters and similar scratch).
  pub fn distinct_name(
    &mut self,
    base: &str,
  ) -> String {
    self.ctx.names().distinct_name(base)
  }

  fn seed_globals(
    &mut self,
    program: &Program,
  ) {
    for variable in &program.variables {
      let name = self.ctx.names().declare(&variable.id, &variable.name, NameRealm::Variable);
      if let Some(template) = &self.dialect.variable_declaration {
        self
          .ctx
          .add_definition(format!("variable_{}", name), template.replace("{name}", &name));
      }
    }
  }

  fn emit_node(
    &mut self,
    node: &BlockNode,
  ) -> Result<Emission, GenerationError> {
    let registry = self.registry;
    let Some(emitter) = registry.get(&node.kind) else {
      return Err(GenerationError::unknown_kind(&node.kind, &node.id));
    };

    emitter(node, self)
  }

  fn statement_text(
    &mut self,
    node: &BlockNode,
  ) -> Result<String, GenerationError> {
    match self.emit_node(node)? {
      Emission::Statement(text) => Ok(text),
      // An expression block in statement position becomes a bare
      // expression statement in the target dialect.
      Emission::Expression(text, _) => Ok(format!("{}{}\n", text, self.dialect.statement_terminator)),
    }
  }
}

/// Prefixes every non-empty line with `unit`, preserving trailing newlines.
pub fn indent_lines(
  text: &str,
  unit: &str,
) -> String {
  let mut out = String::with_capacity(text.len());
  for line in text.split_inclusive('\n') {
    if line != "\n" {
      out.push_str(unit);
    }
    out.push_str(line);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn indent_skips_blank_lines() {
    assert_eq!(indent_lines("a;\n\nb;\n", "  "), "  a;\n\n  b;\n");
  }

  #[test]
  fn indent_preserves_missing_trailing_newline() {
    assert_eq!(indent_lines("a;", "  "), "  a;");
    assert_eq!(indent_lines("", "  "), "");
  }
}
