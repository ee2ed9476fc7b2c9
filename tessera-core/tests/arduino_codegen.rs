mod common;

use common::*;
use tessera_config::Dialect;
use tessera_core::emitters::arduino_registry;
use tessera_core::generate;
use tessera_graph::BlockNode;

fn run(program: &tessera_graph::Program) -> String {
  let registry = arduino_registry();
  generate(program, &registry, &Dialect::arduino()).expect("generation should succeed")
}

#[test]
fn blink_program_emits_complete_sketch() {
  let chain = digital_write("b2", 13.0, "HIGH").with_next(
    BlockNode::new("arduino_delay", "b3")
      .with_text_field("UNIT", "ms")
      .with_value("VALUE", number("b4", 500.0)),
  );
  let program = program(vec![BlockNode::new("arduino_setup", "b1").with_statement("LOOP", chain)]);

  assert_eq!(
    run(&program),
    "void setup() {\n  pinMode(13, OUTPUT);\n}\n\nvoid loop() {\n  digitalWrite(13, HIGH);\n  delay(500);\n}\n"
  );
}

#[test]
fn unconnected_value_slots_fall_back_to_dialect_defaults() {
  let program = program(vec![BlockNode::new("arduino_digital_write", "b1")]);
  let out = run(&program);

  assert!(out.contains("pinMode(0, OUTPUT);"), "missing default pin setup in:\n{}", out);
  assert!(out.contains("digitalWrite(0, HIGH);"), "missing default write in:\n{}", out);
}

#[test]
fn repeated_requirements_deduplicate() {
  let chain =
    BlockNode::new("arduino_scoop_yield", "b1").with_next(BlockNode::new("arduino_scoop_yield", "b2"));
  let out = run(&program(vec![chain]));

  assert_eq!(out.matches("#include <SCoop.h>").count(), 1, "include duplicated in:\n{}", out);
}

#[test]
fn pin_setup_entries_drain_in_key_order() {
  let chain = digital_write("b1", 2.0, "HIGH").with_next(digital_write("b2", 13.0, "LOW"));
  let out = run(&program(vec![chain]));

  let pin13 = out.find("pinMode(13, OUTPUT);").expect("pin 13 setup missing");
  let pin2 = out.find("pinMode(2, OUTPUT);").expect("pin 2 setup missing");
  assert!(pin13 < pin2, "setup entries not in key order:\n{}", out);
}

#[test]
fn nested_expressions_parenthesize_only_when_looser() {
  let value = arithmetic(
    "b2",
    "MULTIPLY",
    arithmetic("b3", "ADD", number("b4", 1.0), number("b5", 2.0)),
    number("b6", 3.0),
  );
  let out = run(&program(vec![set_variable("b1", "x", value)]));

  assert!(out.contains("x = (1 + 2) * 3;"), "unexpected expression text in:\n{}", out);
}

#[test]
fn non_associative_right_operands_keep_their_grouping() {
  let difference = arithmetic(
    "b2",
    "MINUS",
    number("b3", 10.0),
    arithmetic("b4", "ADD", number("b5", 2.0), number("b6", 3.0)),
  );
  let out = run(&program(vec![set_variable("b1", "x", difference)]));
  assert!(out.contains("x = 10 - (2 + 3);"), "subtraction flattened in:\n{}", out);

  let quotient = arithmetic(
    "b2",
    "DIVIDE",
    number("b3", 12.0),
    arithmetic("b4", "MULTIPLY", number("b5", 2.0), number("b6", 3.0)),
  );
  let out = run(&program(vec![set_variable("b1", "x", quotient)]));
  assert!(out.contains("x = 12 / (2 * 3);"), "division flattened in:\n{}", out);
}

#[test]
fn nested_comparisons_keep_their_grouping() {
  let inner = BlockNode::new("logic_compare", "b2")
    .with_text_field("OP", "LT")
    .with_value("A", number("b3", 1.0))
    .with_value("B", number("b4", 2.0));
  let outer = BlockNode::new("logic_compare", "b5")
    .with_text_field("OP", "EQ")
    .with_value("A", inner)
    .with_value("B", number("b6", 1.0));

  let out = run(&program(vec![set_variable("b1", "x", outer)]));
  assert!(out.contains("x = (1 < 2) == 1;"), "comparison flattened in:\n{}", out);
}

#[test]
fn until_loops_negate_with_parentheses() {
  let condition = BlockNode::new("logic_compare", "b2")
    .with_text_field("OP", "EQ")
    .with_value("A", number("b3", 1.0))
    .with_value("B", number("b4", 2.0));
  let block = BlockNode::new("controls_whileUntil", "b1")
    .with_text_field("MODE", "UNTIL")
    .with_value("BOOL", condition);

  let out = run(&program(vec![block]));
  assert!(out.contains("while (!(1 == 2)) {"), "missing negated condition in:\n{}", out);
}

#[test]
fn global_variables_declare_and_avoid_reserved_words() {
  let program = program_with_variables(
    vec![global("v1", "loop")],
    vec![set_variable("b1", "v1", number("b2", 5.0))],
  );
  let out = run(&program);

  assert!(out.contains("int loop2 = 0;"), "missing renamed declaration in:\n{}", out);
  assert!(out.contains("loop2 = 5;"), "missing renamed assignment in:\n{}", out);
  assert!(!out.contains("int loop = 0;"), "reserved word leaked in:\n{}", out);
}

#[test]
fn procedures_hoist_to_definitions_and_calls_stay_inline() {
  let definition = BlockNode::new("procedures_defnoreturn", "b1")
    .with_text_field("NAME", "blink")
    .with_statement("STACK", digital_write("b2", 13.0, "HIGH"));
  let call = BlockNode::new("procedures_callnoreturn", "b3").with_text_field("NAME", "blink");

  let out = run(&program(vec![definition, call]));
  assert!(out.contains("void blink() {\n  digitalWrite(13, HIGH);\n}"), "missing hoisted definition in:\n{}", out);
  assert!(out.contains("void loop() {\n  blink();\n}"), "missing inline call in:\n{}", out);
}

#[test]
fn setup_branch_hoists_into_init_function() {
  let block = BlockNode::new("arduino_setup", "b1")
    .with_statement(
      "SETUP",
      BlockNode::new("arduino_delay", "b2")
        .with_text_field("UNIT", "ms")
        .with_value("VALUE", number("b3", 100.0)),
    )
    .with_statement(
      "LOOP",
      BlockNode::new("arduino_serial_println", "b4").with_value("CONTENT", text("b5", "hi")),
    );

  let out = run(&program(vec![block]));
  assert!(out.contains("void setup() {\n  delay(100);\n  Serial.begin(9600);\n}"), "setup section wrong in:\n{}", out);
  assert!(out.contains("Serial.println(\"hi\");"), "loop statement missing in:\n{}", out);
}

#[test]
fn string_literals_escape_embedded_quotes() {
  let block =
    BlockNode::new("arduino_serial_print", "b1").with_value("CONTENT", text("b2", "say \"hi\""));
  let out = run(&program(vec![block]));

  assert!(out.contains("Serial.print(\"say \\\"hi\\\"\");"), "bad quoting in:\n{}", out);
}
