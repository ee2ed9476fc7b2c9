//! Emitter catalog for the scripting dialect.
//!
//! The dialect has no statement terminator and no setup or loop wrappers,
//! so control flow carries its own structure: every branch slot that comes
//! back empty must still emit `pass` to keep the output parseable.

use tessera_config::ValueKind;
use tessera_graph::BlockNode;

use super::{field_text_or, required_text};
use crate::emission::{Emission, Precedence};
use crate::errors::GenerationError;
use crate::generator::CodeGenerator;
use crate::registry::EmitterRegistry;

/// Scripting-dialect precedence bands. Lower binds tighter.
pub const ATOMIC: Precedence = Precedence::ATOMIC;
pub const POWER: Precedence = Precedence(1);
pub const UNARY_SIGN: Precedence = Precedence(2);
pub const MULTIPLICATIVE: Precedence = Precedence(3);
pub const ADDITIVE: Precedence = Precedence(4);
pub const RELATIONAL: Precedence = Precedence(6);
pub const LOGICAL_NOT: Precedence = Precedence(10);
pub const LOGICAL_AND: Precedence = Precedence(11);
pub const LOGICAL_OR: Precedence = Precedence(12);

pub fn register(registry: &mut EmitterRegistry) {
  register_variables(registry);
  register_control(registry);
  register_logic(registry);
  register_math(registry);
  register_text(registry);
  register_collections(registry);
}

fn register_variables(registry: &mut EmitterRegistry) {
  registry.register("variables_get", |node, gen| {
    let name = gen.variable_name(&required_text(node, "VAR")?);
    Ok(Emission::atomic(name))
  });

  registry.register("variables_set", |node, gen| {
    let value = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Number)?;
    let name = gen.variable_name(&required_text(node, "VAR")?);
    Ok(Emission::Statement(format!("{} = {}\n", name, value)))
  });
}

/// Branch text for a statement slot, substituting `pass` when the slot is
/// unconnected or resolved to nothing.
fn branch_or_pass(
  node: &BlockNode,
  slot: &str,
  gen: &mut CodeGenerator,
) -> Result<String, GenerationError> {
  let branch = gen.statement_to_code(node, slot)?;
  if branch.is_empty() {
    Ok(format!("{}pass\n", gen.dialect().indent))
  } else {
    Ok(branch)
  }
}

fn register_control(registry: &mut EmitterRegistry) {
  registry.register("controls_if", |node, gen| {
    let mut code = String::new();
    let mut index = 0;
    while node.value(&format!("IF{}", index)).is_some() || node.statement(&format!("DO{}", index)).is_some() {
      let condition = gen.value_to_code(node, &format!("IF{}", index), Precedence::NONE, ValueKind::Boolean)?;
      let branch = branch_or_pass(node, &format!("DO{}", index), gen)?;
      let keyword = if index == 0 { "if" } else { "elif" };
      code.push_str(&format!("{} {}:\n{}", keyword, condition, branch));
      index += 1;
    }
    if node.statement("ELSE").is_some() {
      let branch = branch_or_pass(node, "ELSE", gen)?;
      code.push_str(&format!("else:\n{}", branch));
    }
    Ok(Emission::Statement(code))
  });

  registry.register("controls_whileUntil", |node, gen| {
    let until = field_text_or(node, "MODE", "WHILE") == "UNTIL";
    let max = if until { LOGICAL_NOT } else { Precedence::NONE };
    let mut condition = gen.value_to_code(node, "BOOL", max, ValueKind::Boolean)?;
    if until {
      condition = format!("not {}", condition);
    }
    let branch = branch_or_pass(node, "DO", gen)?;
    Ok(Emission::Statement(format!("while {}:\n{}", condition, branch)))
  });

  registry.register("controls_repeat_ext", |node, gen| {
    let times = gen.value_to_code(node, "TIMES", Precedence::NONE, ValueKind::Number)?;
    let counter = gen.distinct_name("count");
    let branch = branch_or_pass(node, "DO", gen)?;
    Ok(Emission::Statement(format!("for {} in range({}):\n{}", counter, times, branch)))
  });
}

fn register_logic(registry: &mut EmitterRegistry) {
  registry.register("logic_compare", |node, gen| {
    let operator = match required_text(node, "OP")?.as_str() {
      "EQ" => "==",
      "NEQ" => "!=",
      "LT" => "<",
      "LTE" => "<=",
      "GT" => ">",
      "GTE" => ">=",
      _ => "==",
    };
    // Comparison operands bind one band tighter: an unparenthesized nested
    // comparison would chain (`a == b == c` means `a == b and b == c`).
    let operand_max = Precedence(RELATIONAL.0 - 1);
    let left = gen.value_to_code(node, "A", operand_max, ValueKind::Number)?;
    let right = gen.value_to_code(node, "B", operand_max, ValueKind::Number)?;
    Ok(Emission::Expression(format!("{} {} {}", left, operator, right), RELATIONAL))
  });

  registry.register("logic_operation", |node, gen| {
    let (operator, precedence) = if required_text(node, "OP")? == "AND" {
      ("and", LOGICAL_AND)
    } else {
      ("or", LOGICAL_OR)
    };
    let left = gen.value_to_code(node, "A", precedence, ValueKind::Boolean)?;
    let right = gen.value_to_code(node, "B", precedence, ValueKind::Boolean)?;
    Ok(Emission::Expression(format!("{} {} {}", left, operator, right), precedence))
  });

  registry.register("logic_negate", |node, gen| {
    let operand = gen.value_to_code(node, "BOOL", LOGICAL_NOT, ValueKind::Boolean)?;
    Ok(Emission::Expression(format!("not {}", operand), LOGICAL_NOT))
  });

  registry.register("logic_boolean", |node, _gen| {
    let literal = if required_text(node, "BOOL")? == "TRUE" { "True" } else { "False" };
    Ok(Emission::atomic(literal))
  });
}

fn register_math(registry: &mut EmitterRegistry) {
  registry.register("math_number", |node, _gen| {
    Ok(Emission::atomic(required_text(node, "NUM")?))
  });

  registry.register("math_arithmetic", |node, gen| {
    let op = required_text(node, "OP")?;
    let (operator, precedence) = match op.as_str() {
      "ADD" => ("+", ADDITIVE),
      "MINUS" => ("-", ADDITIVE),
      "MULTIPLY" => ("*", MULTIPLICATIVE),
      "DIVIDE" => ("/", MULTIPLICATIVE),
      "POWER" => ("**", POWER),
      _ => ("+", ADDITIVE),
    };
    // Non-associative positions bind one band tighter: the right operand of
    // - and /, and the left operand of the right-associative **.
    let (left_max, right_max) = match op.as_str() {
      "MINUS" | "DIVIDE" => (precedence, Precedence(precedence.0 - 1)),
      "POWER" => (Precedence(precedence.0 - 1), precedence),
      _ => (precedence, precedence),
    };
    let left = gen.value_to_code(node, "A", left_max, ValueKind::Number)?;
    let right = gen.value_to_code(node, "B", right_max, ValueKind::Number)?;
    Ok(Emission::Expression(format!("{} {} {}", left, operator, right), precedence))
  });
}

fn register_text(registry: &mut EmitterRegistry) {
  registry.register("text", |node, _gen| {
    Ok(Emission::atomic(quote(&required_text(node, "TEXT")?)))
  });

  registry.register("text_join", |node, gen| {
    let mut pieces = Vec::new();
    let mut index = 0;
    while node.value(&format!("ADD{}", index)).is_some() {
      let piece = gen.value_to_code(node, &format!("ADD{}", index), Precedence::NONE, ValueKind::Text)?;
      pieces.push(format!("str({})", piece));
      index += 1;
    }
    if pieces.is_empty() {
      return Ok(Emission::atomic("\"\""));
    }
    Ok(Emission::Expression(pieces.join(" + "), ADDITIVE))
  });

  registry.register("text_print", |node, gen| {
    let value = gen.value_to_code(node, "TEXT", Precedence::NONE, ValueKind::Text)?;
    Ok(Emission::Statement(format!("print({})\n", value)))
  });

  registry.register("python_input", |node, _gen| {
    let prompt = field_text_or(node, "PROMPT", "");
    Ok(Emission::atomic(format!("input({})", quote(&prompt))))
  });
}

fn register_collections(registry: &mut EmitterRegistry) {
  registry.register("python_tuple", |node, gen| {
    let mut items = Vec::new();
    let mut index = 0;
    while node.value(&format!("ADD{}", index)).is_some() {
      items.push(gen.value_to_code(node, &format!("ADD{}", index), Precedence::NONE, ValueKind::Number)?);
      index += 1;
    }
    // A one-element tuple needs the trailing comma to stay a tuple.
    let text = match items.len() {
      1 => format!("({},)", items[0]),
      _ => format!("({})", items.join(", ")),
    };
    Ok(Emission::atomic(text))
  });

  registry.register("dicts_create_with", |node, gen| {
    let mut entries = Vec::new();
    let mut index = 0;
    while node.value(&format!("KEY{}", index)).is_some() || node.value(&format!("VALUE{}", index)).is_some() {
      let key = gen.value_to_code(node, &format!("KEY{}", index), Precedence::NONE, ValueKind::Text)?;
      let value = gen.value_to_code(node, &format!("VALUE{}", index), Precedence::NONE, ValueKind::Number)?;
      entries.push(format!("{}: {}", key, value));
      index += 1;
    }
    Ok(Emission::atomic(format!("{{{}}}", entries.join(", "))))
  });

  registry.register("dict_get", |node, gen| {
    let dict = gen.value_to_code(node, "DICT", ATOMIC, ValueKind::Text)?;
    let key = gen.value_to_code(node, "KEY", Precedence::NONE, ValueKind::Text)?;
    Ok(Emission::atomic(format!("{}.get({})", dict, key)))
  });
}

/// Double-quoted literal with escapes; JSON string syntax is valid here.
fn quote(text: &str) -> String {
  serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tessera_config::Dialect;

  use crate::emitters::python_registry;
  use crate::generator::CodeGenerator;

  #[test]
  fn empty_branches_emit_pass() {
    let registry = python_registry();
    let dialect = Dialect::python();
    let mut gen = CodeGenerator::new(&registry, &dialect);

    let node = BlockNode::new("controls_whileUntil", "b1")
      .with_text_field("MODE", "WHILE")
      .with_value("BOOL", BlockNode::new("logic_boolean", "b2").with_text_field("BOOL", "TRUE"));

    let code = gen.block_to_code(&node).unwrap();
    assert_eq!(code, "while True:\n  pass\n");
  }

  #[test]
  fn quoting_escapes_embedded_quotes() {
    assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
  }
}
