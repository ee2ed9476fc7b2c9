use tessera_config::Dialect;

use crate::context::EmissionContext;
use crate::generator::indent_lines;

/// Stitches the walked body and the drained context into the final
/// compilable unit.
///
/// The context is consumed by value: a run moves from walking to draining
/// exactly once, and a drained context cannot be finished again.
///
/// Layout, in dialect order:
/// 1. definitions, one per line, a single blank line after the group;
/// 2. setup statements, each entry indented uniformly on every non-empty
///    line, wrapped in the dialect's init-function template;
/// 3. the body (walker output plus drained body entries), indented and
///    wrapped in the dialect's main-loop template.
///
/// A dialect without wrappers emits sections 2 and 3 bare, in the same
/// order. Output is byte-for-byte deterministic for a given context.
pub fn finish(
  dialect: &Dialect,
  body: &str,
  mut ctx: EmissionContext,
) -> String {
  let definitions = ctx.drain_definitions();
  let setup = ctx.drain_setup();
  let loops = ctx.drain_body();

  let mut out = String::new();

  if !definitions.is_empty() {
    let codes: Vec<String> = definitions.into_iter().map(|(_, code)| code).collect();
    // Hoisted function definitions carry their own trailing newline; the
    // group separator stays a single blank line either way.
    out.push_str(codes.join("\n").trim_end_matches('\n'));
    out.push_str("\n\n");
  }

  let setup_section = join_entries(setup);
  match &dialect.setup_wrapper {
    Some(wrapper) => {
      let indented = trim_trailing_newline(indent_lines(&setup_section, &dialect.indent));
      out.push_str(&wrapper.replace("{body}", &indented));
      out.push_str("\n\n");
    },
    None => {
      if !setup_section.is_empty() {
        out.push_str(&setup_section);
        out.push_str("\n\n");
      }
    },
  }

  let mut main_body = String::from(body);
  for (_, code) in loops {
    main_body.push_str(&code);
    main_body.push('\n');
  }

  match &dialect.loop_wrapper {
    Some(wrapper) => {
      let indented = trim_trailing_newline(indent_lines(&main_body, &dialect.indent));
      out.push_str(&wrapper.replace("{body}", &indented));
      out.push('\n');
    },
    None => out.push_str(&main_body),
  }

  out
}

/// Joins drained entries with newlines. Entries may themselves span several
/// lines; their text is taken as-is.
fn join_entries(entries: Vec<(String, String)>) -> String {
  entries.into_iter().map(|(_, code)| code).collect::<Vec<String>>().join("\n")
}

fn trim_trailing_newline(mut text: String) -> String {
  if text.ends_with('\n') {
    text.pop();
  }
  text
}

#[cfg(test)]
mod tests {
  use super::*;

  fn arduino_ctx() -> EmissionContext {
    EmissionContext::new(&Dialect::arduino())
  }

  #[test]
  fn empty_run_still_emits_both_wrappers() {
    let out = finish(&Dialect::arduino(), "", arduino_ctx());
    assert_eq!(out, "void setup() {\n\n}\n\nvoid loop() {\n\n}\n");
  }

  #[test]
  fn definitions_precede_setup_and_loop() {
    let mut ctx = arduino_ctx();
    ctx.add_definition("include_dht", "#include <DHT.h>");
    ctx.add_setup("dht_begin", "dht.begin();");

    let out = finish(&Dialect::arduino(), "delay(100);\n", ctx);
    assert_eq!(
      out,
      "#include <DHT.h>\n\nvoid setup() {\n  dht.begin();\n}\n\nvoid loop() {\n  delay(100);\n}\n"
    );
  }

  #[test]
  fn multi_line_setup_entries_indent_on_every_line() {
    let mut ctx = arduino_ctx();
    ctx.add_setup("ultrasonic_pins", "pinMode(TRIG, OUTPUT);\npinMode(ECHO, INPUT);");

    let out = finish(&Dialect::arduino(), "", ctx);
    assert!(out.contains("void setup() {\n  pinMode(TRIG, OUTPUT);\n  pinMode(ECHO, INPUT);\n}"));
  }

  #[test]
  fn body_entries_append_after_the_walked_body() {
    let mut ctx = arduino_ctx();
    ctx.add_body("ble_poll", "BLE.poll();");

    let out = finish(&Dialect::arduino(), "digitalWrite(13, HIGH);\n", ctx);
    assert!(out.contains("void loop() {\n  digitalWrite(13, HIGH);\n  BLE.poll();\n}"));
  }

  #[test]
  fn wrapperless_dialect_emits_sections_bare() {
    let dialect = Dialect::python();
    let mut ctx = EmissionContext::new(&dialect);
    ctx.add_definition("import_math", "import math");
    ctx.add_setup("turtle_init", "t = turtle.Turtle()");

    let out = finish(&dialect, "print(x)\n", ctx);
    assert_eq!(out, "import math\n\nt = turtle.Turtle()\n\nprint(x)\n");
  }
}
