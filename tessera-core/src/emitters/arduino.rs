//! Emitter catalog for the embedded C-like dialect.
//!
//! One function per block kind. Emitters are pure over the node and the
//! run's context: inline code goes back to the walker, hoisted requirements
//! go into the context's keyed tables (`pinMode_<pin>` setup entries,
//! `include_*` definitions, ...) where repeated contributions deduplicate.

use tessera_config::ValueKind;
use tessera_graph::BlockNode;

use super::{field_text_or, required_text};
use crate::emission::{Emission, Precedence};
use crate::errors::GenerationError;
use crate::generator::CodeGenerator;
use crate::registry::EmitterRegistry;

/// C-like operator precedence bands. Lower binds tighter.
pub const ATOMIC: Precedence = Precedence::ATOMIC;
pub const UNARY_POSTFIX: Precedence = Precedence(1);
pub const UNARY_PREFIX: Precedence = Precedence(2);
pub const MULTIPLICATIVE: Precedence = Precedence(3);
pub const ADDITIVE: Precedence = Precedence(4);
pub const RELATIONAL: Precedence = Precedence(6);
pub const EQUALITY: Precedence = Precedence(7);
pub const LOGICAL_AND: Precedence = Precedence(11);
pub const LOGICAL_OR: Precedence = Precedence(12);

/// Registers the whole base catalog.
pub fn register(registry: &mut EmitterRegistry) {
  register_variables(registry);
  register_procedures(registry);
  register_io(registry);
  register_timing(registry);
  register_tasks(registry);
  register_control(registry);
  register_logic(registry);
  register_math(registry);
  register_serial(registry);
  register_text(registry);
}

fn register_variables(registry: &mut EmitterRegistry) {
  registry.register("variables_get", |node, gen| {
    let name = gen.variable_name(&required_text(node, "VAR")?);
    Ok(Emission::atomic(name))
  });

  registry.register("variables_set", |node, gen| {
    let value = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Number)?;
    let name = gen.variable_name(&required_text(node, "VAR")?);
    Ok(Emission::Statement(format!("{} = {};\n", name, value)))
  });
}

/// Splits a comma-separated `ARGS` field (`"a,b"`) into emitted parameter
/// names, all typed `int` (untyped procedure blocks).
fn untyped_params(
  node: &BlockNode,
  gen: &mut CodeGenerator,
) -> Vec<String> {
  let args = field_text_or(node, "ARGS", "");
  args
    .split(',')
    .map(str::trim)
    .filter(|arg| !arg.is_empty())
    .map(|arg| format!("int {}", gen.variable_name(arg)))
    .collect()
}

/// Splits a typed `ARGS` field (`"int a,float b"`) into emitted parameters.
fn typed_params(
  node: &BlockNode,
  gen: &mut CodeGenerator,
) -> Vec<String> {
  let args = field_text_or(node, "ARGS", "");
  args
    .split(',')
    .map(str::trim)
    .filter(|arg| !arg.is_empty())
    .map(|arg| match arg.split_once(' ') {
      Some((ty, name)) => format!("{} {}", ty.trim(), gen.variable_name(name.trim())),
      None => format!("int {}", gen.variable_name(arg)),
    })
    .collect()
}

/// Collects contiguous `ARG0..ARGn` call arguments.
fn call_args(
  node: &BlockNode,
  gen: &mut CodeGenerator,
) -> Result<Vec<String>, GenerationError> {
  let mut args = Vec::new();
  let mut index = 0;
  while node.value(&format!("ARG{}", index)).is_some() {
    args.push(gen.value_to_code(node, &format!("ARG{}", index), Precedence::NONE, ValueKind::Number)?);
    index += 1;
  }
  Ok(args)
}

fn register_procedures(registry: &mut EmitterRegistry) {
  registry.register("procedures_defnoreturn", |node, gen| {
    let name = gen.procedure_name(&required_text(node, "NAME")?);
    let branch = gen.statement_to_code(node, "STACK")?;
    let params = untyped_params(node, gen);

    let code = format!("void {}({}) {{\n{}}}\n", name, params.join(", "), branch);
    gen.context().add_definition(name, code);
    Ok(Emission::empty())
  });

  registry.register("procedures_defreturn", |node, gen| {
    let name = gen.procedure_name(&required_text(node, "NAME")?);
    let branch = gen.statement_to_code(node, "STACK")?;
    let params = untyped_params(node, gen);

    let mut code = format!("int {}({}) {{\n{}", name, params.join(", "), branch);
    if node.value("RETURN").is_some() {
      let value = gen.value_to_code(node, "RETURN", Precedence::NONE, ValueKind::Number)?;
      code.push_str(&format!("  return {};\n", value));
    }
    code.push_str("}\n");

    gen.context().add_definition(name, code);
    Ok(Emission::empty())
  });

  registry.register("procedures_callnoreturn", |node, gen| {
    let name = gen.procedure_name(&required_text(node, "NAME")?);
    let args = call_args(node, gen)?;
    Ok(Emission::Statement(format!("{}({});\n", name, args.join(", "))))
  });

  registry.register("procedures_callreturn", |node, gen| {
    let name = gen.procedure_name(&required_text(node, "NAME")?);
    let args = call_args(node, gen)?;
    Ok(Emission::atomic(format!("{}({})", name, args.join(", "))))
  });

  registry.register("arduino_functions_defnoreturn", |node, gen| {
    let name = gen.procedure_name(&required_text(node, "NAME")?);
    let branch = gen.statement_to_code(node, "STACK")?;
    let params = typed_params(node, gen);

    let code = format!("void {}({}) {{\n{}}}\n", name, params.join(", "), branch);
    gen.context().add_definition(name, code);
    Ok(Emission::empty())
  });

  registry.register("arduino_functions_defreturn", |node, gen| {
    let name = gen.procedure_name(&required_text(node, "NAME")?);
    let return_type = field_text_or(node, "RETURN_TYPE", "int");
    let branch = gen.statement_to_code(node, "STACK")?;
    let params = typed_params(node, gen);

    let mut code = format!("{} {}({}) {{\n{}", return_type, name, params.join(", "), branch);
    if node.value("RETURN").is_some() {
      let value = gen.value_to_code(node, "RETURN", Precedence::NONE, ValueKind::Number)?;
      code.push_str(&format!("  return {};\n", value));
    }
    code.push_str("}\n");

    gen.context().add_definition(name, code);
    Ok(Emission::empty())
  });
}

fn register_io(registry: &mut EmitterRegistry) {
  // The setup/loop block: its SETUP branch is hoisted to the setup table,
  // its LOOP branch is the block's inline contribution to the body.
  registry.register("arduino_setup", |node, gen| {
    if let Some(head) = node.statement("SETUP") {
      let code = gen.block_to_code(head)?;
      let trimmed = code.trim();
      if !trimmed.is_empty() {
        let entry = trimmed.to_string();
        gen.context().add_setup("manual_setup", entry);
      }
    }

    match node.statement("LOOP") {
      Some(head) => Ok(Emission::Statement(gen.block_to_code(head)?)),
      None => Ok(Emission::empty()),
    }
  });

  registry.register("arduino_digital_write", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;
    let state = gen.value_to_code(node, "STATE", Precedence::NONE, ValueKind::PinState)?;

    gen
      .context()
      .add_setup(format!("pinMode_{}", pin), format!("pinMode({}, OUTPUT);", pin));
    Ok(Emission::Statement(format!("digitalWrite({}, {});\n", pin, state)))
  });

  registry.register("arduino_digital_read", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;

    gen
      .context()
      .add_setup(format!("pinMode_{}", pin), format!("pinMode({}, INPUT);", pin));
    Ok(Emission::atomic(format!("digitalRead({})", pin)))
  });

  registry.register("arduino_analog_write", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;
    let value = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Number)?;

    gen
      .context()
      .add_setup(format!("pinMode_{}", pin), format!("pinMode({}, OUTPUT);", pin));
    Ok(Emission::Statement(format!("analogWrite({}, {});\n", pin, value)))
  });

  registry.register("arduino_analog_read", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;

    gen
      .context()
      .add_setup(format!("pinMode_{}", pin), format!("pinMode({}, INPUT);", pin));
    Ok(Emission::atomic(format!("analogRead({})", pin)))
  });

  registry.register("arduino_highlow", |node, _gen| {
    Ok(Emission::atomic(required_text(node, "STATE")?))
  });

  registry.register("arduino_interrupt", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;
    let mode = required_text(node, "MODE")?;
    let branch = gen.statement_to_code(node, "DO")?;

    let handler = format!("onInterrupt_{}", pin);
    let definition = format!("void {}() {{\n{}}}\n", handler, branch);
    let attach = format!("attachInterrupt(digitalPinToInterrupt({}), {}, {});", pin, handler, mode);

    gen.context().add_definition(handler, definition);
    gen.context().add_setup(format!("interrupt_{}", pin), attach);
    Ok(Emission::empty())
  });

  registry.register("arduino_detach_interrupt", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;
    Ok(Emission::Statement(format!("detachInterrupt(digitalPinToInterrupt({}));\n", pin)))
  });

  registry.register("arduino_pulse_in", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;
    let state = gen.value_to_code(node, "STATE", Precedence::NONE, ValueKind::PinState)?;
    Ok(Emission::atomic(format!("pulseIn({}, {})", pin, state)))
  });

  registry.register("arduino_pulse_in_timeout", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;
    let state = gen.value_to_code(node, "STATE", Precedence::NONE, ValueKind::PinState)?;
    let timeout = gen.value_to_code(node, "TIMEOUT", Precedence::NONE, ValueKind::Number)?;
    Ok(Emission::atomic(format!("pulseIn({}, {}, {})", pin, state, timeout)))
  });

  registry.register("arduino_tone", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;
    let freq = gen.value_to_code(node, "FREQ", Precedence::NONE, ValueKind::Number)?;
    let duration = gen.value_to_code(node, "DURATION", Precedence::NONE, ValueKind::Number)?;
    Ok(Emission::Statement(format!("tone({}, {}, {});\n", pin, freq, duration)))
  });

  registry.register("arduino_notone", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;
    Ok(Emission::Statement(format!("noTone({});\n", pin)))
  });

  registry.register("arduino_shiftout", |node, gen| {
    let data = gen.value_to_code(node, "DATA", Precedence::NONE, ValueKind::Number)?;
    let clock = gen.value_to_code(node, "CLOCK", Precedence::NONE, ValueKind::Number)?;
    let order = required_text(node, "ORDER")?;
    let value = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Number)?;

    gen
      .context()
      .add_setup(format!("pinMode_data_{}", data), format!("pinMode({}, OUTPUT);", data));
    gen
      .context()
      .add_setup(format!("pinMode_clock_{}", clock), format!("pinMode({}, OUTPUT);", clock));
    Ok(Emission::Statement(format!("shiftOut({}, {}, {}, {});\n", data, clock, order, value)))
  });

  registry.register("arduino_pin_mode", |node, gen| {
    let pin = gen.value_to_code(node, "PIN", Precedence::NONE, ValueKind::Number)?;
    let mode = required_text(node, "MODE")?;
    Ok(Emission::Statement(format!("pinMode({}, {});\n", pin, mode)))
  });
}

fn register_timing(registry: &mut EmitterRegistry) {
  registry.register("arduino_delay", |node, gen| {
    let value = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Number)?;
    let unit = required_text(node, "UNIT")?;

    let code = if unit == "ms" {
      format!("delay({});\n", value)
    } else {
      format!("delayMicroseconds({});\n", value)
    };
    Ok(Emission::Statement(code))
  });

  registry.register("arduino_system_time", |node, _gen| {
    let unit = required_text(node, "UNIT")?;
    Ok(Emission::atomic(if unit == "ms" { "millis()" } else { "micros()" }))
  });

  registry.register("arduino_interrupt_control", |node, _gen| {
    let action = required_text(node, "ACTION")?;
    Ok(Emission::Statement(format!("{}();\n", action)))
  });

  registry.register("arduino_mstimer2_setup", |node, gen| {
    let time = gen.value_to_code(node, "TIME", Precedence::NONE, ValueKind::Number)?;
    let branch = gen.statement_to_code(node, "DO")?;
    let handler = "mstimer2_handler";

    gen.context().add_definition("MsTimer2_include", "#include <MsTimer2.h>");
    gen
      .context()
      .add_definition(handler, format!("void {}() {{\n{}}}\n", handler, branch));
    gen
      .context()
      .add_setup("MsTimer2_setup", format!("MsTimer2::set({}, {});", time, handler));
    Ok(Emission::empty())
  });

  registry.register("arduino_mstimer2_control", |node, gen| {
    let action = required_text(node, "ACTION")?;
    gen.context().add_definition("MsTimer2_include", "#include <MsTimer2.h>");
    Ok(Emission::Statement(format!("MsTimer2::{}();\n", action)))
  });
}

fn register_tasks(registry: &mut EmitterRegistry) {
  registry.register("arduino_scoop_task", |node, gen| {
    let name = required_text(node, "NAME")?;
    let setup = gen.statement_to_code(node, "SETUP")?;
    let task_loop = gen.statement_to_code(node, "LOOP")?;

    let definition = format!(
      "defineTask({name});\n\nvoid {name}::setup() {{\n{setup}}}\n\nvoid {name}::loop() {{\n{task_loop}}}\n",
      name = name,
      setup = setup,
      task_loop = task_loop
    );

    gen.context().add_definition("SCoop_include", "#include <SCoop.h>");
    gen.context().add_definition(format!("SCoop_task_{}", name), definition);
    gen.context().add_setup("SCoop_start", "mySCoop.start();");
    Ok(Emission::empty())
  });

  registry.register("arduino_scoop_yield", |_node, gen| {
    gen.context().add_definition("SCoop_include", "#include <SCoop.h>");
    Ok(Emission::Statement("yield();\n".to_string()))
  });

  registry.register("arduino_scoop_sleep", |node, gen| {
    let time = gen.value_to_code(node, "TIME", Precedence::NONE, ValueKind::Number)?;
    gen.context().add_definition("SCoop_include", "#include <SCoop.h>");
    Ok(Emission::Statement(format!("sleep({});\n", time)))
  });
}

fn register_control(registry: &mut EmitterRegistry) {
  registry.register("controls_if", |node, gen| {
    let mut code = String::new();
    let mut n = 0;

    loop {
      let condition = gen.value_to_code(node, &format!("IF{}", n), Precedence::NONE, ValueKind::Boolean)?;
      let branch = gen.statement_to_code(node, &format!("DO{}", n))?;

      if n > 0 {
        code.push_str(" else ");
      }
      code.push_str(&format!("if ({}) {{\n{}}}", condition, branch));

      n += 1;
      let has_more = node.value(&format!("IF{}", n)).is_some() || node.statement(&format!("DO{}", n)).is_some();
      if !has_more {
        break;
      }
    }

    if node.statement("ELSE").is_some() {
      let branch = gen.statement_to_code(node, "ELSE")?;
      code.push_str(&format!(" else {{\n{}}}", branch));
    }

    code.push('\n');
    Ok(Emission::Statement(code))
  });

  registry.register("controls_repeat_ext", |node, gen| {
    let repeats = gen.value_to_code(node, "TIMES", ADDITIVE, ValueKind::Number)?;
    let branch = gen.statement_to_code(node, "DO")?;
    let counter = gen.distinct_name("count");

    Ok(Emission::Statement(format!(
      "for (int {counter} = 0; {counter} < {repeats}; {counter}++) {{\n{branch}}}\n",
      counter = counter,
      repeats = repeats,
      branch = branch
    )))
  });

  registry.register("controls_whileUntil", |node, gen| {
    let until = field_text_or(node, "MODE", "WHILE") == "UNTIL";
    let max = if until { UNARY_PREFIX } else { Precedence::NONE };
    let mut condition = gen.value_to_code(node, "BOOL", max, ValueKind::Boolean)?;
    let branch = gen.statement_to_code(node, "DO")?;

    if until {
      condition = format!("!{}", condition);
    }
    Ok(Emission::Statement(format!("while ({}) {{\n{}}}\n", condition, branch)))
  });

  registry.register("controls_for", |node, gen| {
    let variable = gen.variable_name(&required_text(node, "VAR")?);
    let from = gen.value_to_code(node, "FROM", Precedence::NONE, ValueKind::Number)?;
    let to = gen.value_to_code(node, "TO", ADDITIVE, ValueKind::Number)?;
    let step = gen.value_to_code(node, "BY", Precedence::NONE, ValueKind::Number)?;
    let branch = gen.statement_to_code(node, "DO")?;

    Ok(Emission::Statement(format!(
      "for ({var} = {from}; {var} <= {to}; {var} += {step}) {{\n{branch}}}\n",
      var = variable,
      from = from,
      to = to,
      step = step,
      branch = branch
    )))
  });

  registry.register("controls_flow_statements", |node, _gen| {
    let code = match field_text_or(node, "FLOW", "").as_str() {
      "BREAK" => "break;\n",
      "CONTINUE" => "continue;\n",
      _ => "",
    };
    Ok(Emission::Statement(code.to_string()))
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
      _ => ">=",
    };
    // Comparison operands bind one band tighter: `a == b == c` parses as
    // `(a == b) == c` and loses the inner grouping.
    let operand_max = Precedence(RELATIONAL.0 - 1);
    let a = gen.value_to_code(node, "A", operand_max, ValueKind::Number)?;
    let b = gen.value_to_code(node, "B", operand_max, ValueKind::Number)?;
    Ok(Emission::Expression(format!("{} {} {}", a, operator, b), RELATIONAL))
  });

  registry.register("logic_operation", |node, gen| {
    let (operator, order) = if required_text(node, "OP")? == "AND" {
      ("&&", LOGICAL_AND)
    } else {
      ("||", LOGICAL_OR)
    };
    let a = gen.value_to_code(node, "A", order, ValueKind::Boolean)?;
    let b = gen.value_to_code(node, "B", order, ValueKind::Boolean)?;
    Ok(Emission::Expression(format!("{} {} {}", a, operator, b), order))
  });

  registry.register("logic_negate", |node, gen| {
    let operand = gen.value_to_code(node, "BOOL", UNARY_PREFIX, ValueKind::Boolean)?;
    Ok(Emission::Expression(format!("!{}", operand), UNARY_PREFIX))
  });

  registry.register("logic_boolean", |node, _gen| {
    let value = if required_text(node, "BOOL")? == "TRUE" { "true" } else { "false" };
    Ok(Emission::atomic(value))
  });
}

fn register_math(registry: &mut EmitterRegistry) {
  registry.register("math_number", |node, _gen| {
    Ok(Emission::atomic(required_text(node, "NUM")?))
  });

  registry.register("math_arithmetic", |node, gen| {
    let op = required_text(node, "OP")?;

    if op == "POWER" {
      let a = gen.value_to_code(node, "A", Precedence::NONE, ValueKind::Number)?;
      let b = gen.value_to_code(node, "B", Precedence::NONE, ValueKind::Number)?;
      return Ok(Emission::atomic(format!("pow({}, {})", a, b)));
    }

    let (operator, order) = match op.as_str() {
      "ADD" => ("+", ADDITIVE),
      "MINUS" => ("-", ADDITIVE),
      "MULTIPLY" => ("*", MULTIPLICATIVE),
      _ => ("/", MULTIPLICATIVE),
    };
    // Subtraction and division are non-associative: an equal-precedence
    // right operand must keep its parentheses.
    let right_max = if op == "MINUS" || op == "DIVIDE" { Precedence(order.0 - 1) } else { order };
    let a = gen.value_to_code(node, "A", order, ValueKind::Number)?;
    let b = gen.value_to_code(node, "B", right_max, ValueKind::Number)?;
    Ok(Emission::Expression(format!("{} {} {}", a, operator, b), order))
  });

  registry.register("math_random_int", |node, gen| {
    let from = gen.value_to_code(node, "FROM", Precedence::NONE, ValueKind::Number)?;
    let to = gen.value_to_code(node, "TO", ADDITIVE, ValueKind::Number)?;
    Ok(Emission::atomic(format!("random({}, {} + 1)", from, to)))
  });
}

fn register_serial(registry: &mut EmitterRegistry) {
  registry.register("arduino_serial_print", |node, gen| {
    let content = gen.value_to_code(node, "CONTENT", Precedence::NONE, ValueKind::Text)?;
    gen.context().add_setup("serial_begin", "Serial.begin(9600);");
    Ok(Emission::Statement(format!("Serial.print({});\n", content)))
  });

  registry.register("arduino_serial_println", |node, gen| {
    let content = gen.value_to_code(node, "CONTENT", Precedence::NONE, ValueKind::Text)?;
    gen.context().add_setup("serial_begin", "Serial.begin(9600);");
    Ok(Emission::Statement(format!("Serial.println({});\n", content)))
  });

  registry.register("arduino_serial_available", |_node, gen| {
    gen.context().add_setup("serial_begin", "Serial.begin(9600);");
    Ok(Emission::Expression("Serial.available() > 0".to_string(), RELATIONAL))
  });

  registry.register("arduino_serial_read", |_node, gen| {
    gen.context().add_setup("serial_begin", "Serial.begin(9600);");
    Ok(Emission::atomic("Serial.read()"))
  });
}

fn register_text(registry: &mut EmitterRegistry) {
  registry.register("text", |node, _gen| {
    let text = required_text(node, "TEXT")?;
    Ok(Emission::atomic(quote(&text)))
  });

  registry.register("text_join", |node, gen| {
    let mut parts = Vec::new();
    let mut index = 0;
    while node.value(&format!("ADD{}", index)).is_some() {
      let part = gen.value_to_code(node, &format!("ADD{}", index), Precedence::NONE, ValueKind::Text)?;
      parts.push(format!("String({})", part));
      index += 1;
    }

    let code = if parts.is_empty() { "\"\"".to_string() } else { parts.join(" + ") };
    Ok(Emission::Expression(code, ADDITIVE))
  });

  registry.register("text_append", |node, gen| {
    let name = gen.variable_name(&required_text(node, "VAR")?);
    let value = gen.value_to_code(node, "TEXT", Precedence::NONE, ValueKind::Text)?;
    Ok(Emission::Statement(format!("{} += String({});\n", name, value)))
  });

  registry.register("text_length", |node, gen| {
    let text = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Text)?;
    Ok(Emission::atomic(format!("String({}).length()", text)))
  });

  registry.register("text_isEmpty", |node, gen| {
    let text = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Text)?;
    Ok(Emission::Expression(format!("String({}).length() == 0", text), EQUALITY))
  });

  registry.register("text_indexOf", |node, gen| {
    let text = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Text)?;
    let find = gen.value_to_code(node, "FIND", Precedence::NONE, ValueKind::Text)?;
    Ok(Emission::atomic(format!("String({}).indexOf(String({}))", text, find)))
  });

  registry.register("text_charAt", |node, gen| {
    let text = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Text)?;
    let at = gen.value_to_code(node, "AT", Precedence::NONE, ValueKind::Number)?;
    Ok(Emission::atomic(format!("String({}).charAt({})", text, at)))
  });

  registry.register("text_getSubstring", |node, gen| {
    let text = gen.value_to_code(node, "STRING", Precedence::NONE, ValueKind::Text)?;
    let from = gen.value_to_code(node, "AT1", Precedence::NONE, ValueKind::Number)?;
    let to = gen.value_to_code(node, "AT2", Precedence::NONE, ValueKind::Number)?;
    Ok(Emission::atomic(format!("String({}).substring({}, {})", text, from, to)))
  });

  registry.register("text_changeCase", |node, gen| {
    let text = gen.value_to_code(node, "TEXT", Precedence::NONE, ValueKind::Text)?;
    let method = if field_text_or(node, "CASE", "UPPERCASE") == "UPPERCASE" {
      "toUpperCase"
    } else {
      "toLowerCase"
    };
    Ok(Emission::atomic(format!(
      "({{ String _s = String({}); _s.{}(); _s; }})",
      text, method
    )))
  });

  registry.register("text_trim", |node, gen| {
    let text = gen.value_to_code(node, "TEXT", Precedence::NONE, ValueKind::Text)?;
    Ok(Emission::atomic(format!("({{ String _s = String({}); _s.trim(); _s; }})", text)))
  });

  registry.register("arduino_text_toInt", |node, gen| {
    let text = gen.value_to_code(node, "TEXT", Precedence::NONE, ValueKind::Text)?;
    Ok(Emission::atomic(format!("String({}).toInt()", text)))
  });

  registry.register("arduino_text_toFloat", |node, gen| {
    let text = gen.value_to_code(node, "TEXT", Precedence::NONE, ValueKind::Text)?;
    Ok(Emission::atomic(format!("String({}).toFloat()", text)))
  });
}

/// JSON string escaping doubles as C string escaping for the subset the
/// editor produces.
fn quote(text: &str) -> String {
  serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}
