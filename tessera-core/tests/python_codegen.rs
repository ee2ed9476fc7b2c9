mod common;

use common::*;
use tessera_config::Dialect;
use tessera_core::emitters::python_registry;
use tessera_core::generate;
use tessera_graph::BlockNode;

fn run(program: &tessera_graph::Program) -> String {
  let registry = python_registry();
  generate(program, &registry, &Dialect::python()).expect("generation should succeed")
}

#[test]
fn wrapperless_layout_is_declarations_then_body() {
  let program = program_with_variables(
    vec![global("v1", "x")],
    vec![
      set_variable("b1", "v1", number("b2", 5.0)),
      BlockNode::new("text_print", "b3").with_value(
        "TEXT",
        BlockNode::new("variables_get", "b4").with_text_field("VAR", "v1"),
      ),
    ],
  );

  assert_eq!(run(&program), "x = None\n\nx = 5\nprint(x)\n");
}

#[test]
fn reserved_words_are_renamed() {
  let program = program_with_variables(
    vec![global("v1", "for")],
    vec![set_variable("b1", "v1", number("b2", 1.0))],
  );
  let out = run(&program);

  assert!(out.contains("for2 = None"), "missing renamed declaration in:\n{}", out);
  assert!(out.contains("for2 = 1"), "missing renamed assignment in:\n{}", out);
}

#[test]
fn if_chains_emit_elif_and_else() {
  let block = BlockNode::new("controls_if", "b1")
    .with_value("IF0", boolean("b2", true))
    .with_statement("DO0", print_text("b3", "first"))
    .with_value("IF1", boolean("b4", false))
    .with_statement("DO1", print_text("b5", "second"))
    .with_statement("ELSE", print_text("b6", "third"));

  let out = run(&program(vec![block]));
  assert!(out.contains("if True:\n  print(\"first\")\n"), "if arm wrong in:\n{}", out);
  assert!(out.contains("elif False:\n  print(\"second\")\n"), "elif arm wrong in:\n{}", out);
  assert!(out.contains("else:\n  print(\"third\")\n"), "else arm wrong in:\n{}", out);
}

#[test]
fn empty_loop_bodies_emit_pass() {
  let block = BlockNode::new("controls_repeat_ext", "b1").with_value("TIMES", number("b2", 3.0));
  let out = run(&program(vec![block]));

  assert!(out.contains("for count in range(3):\n  pass\n"), "missing pass body in:\n{}", out);
}

#[test]
fn single_element_tuples_keep_the_trailing_comma() {
  let tuple = BlockNode::new("python_tuple", "b2").with_value("ADD0", number("b3", 1.0));
  let out = run(&program(vec![set_variable("b1", "t", tuple)]));

  assert!(out.contains("t = (1,)"), "tuple literal wrong in:\n{}", out);
}

#[test]
fn dict_literals_and_lookups() {
  let dict = BlockNode::new("dicts_create_with", "b2")
    .with_value("KEY0", text("b3", "a"))
    .with_value("VALUE0", number("b4", 1.0))
    .with_value("KEY1", text("b5", "b"))
    .with_value("VALUE1", number("b6", 2.0));
  let lookup = BlockNode::new("dict_get", "b8")
    .with_value("DICT", BlockNode::new("variables_get", "b9").with_text_field("VAR", "d"))
    .with_value("KEY", text("b10", "a"));

  let out = run(&program(vec![
    set_variable("b1", "d", dict),
    set_variable("b7", "v", lookup),
  ]));
  assert!(out.contains("d = {\"a\": 1, \"b\": 2}"), "dict literal wrong in:\n{}", out);
  assert!(out.contains("v = d.get(\"a\")"), "dict lookup wrong in:\n{}", out);
}

#[test]
fn power_uses_the_native_operator() {
  let value = arithmetic("b2", "POWER", number("b3", 2.0), number("b4", 3.0));
  let out = run(&program(vec![set_variable("b1", "x", value)]));

  assert!(out.contains("x = 2 ** 3"), "power expression wrong in:\n{}", out);
}

#[test]
fn non_associative_operands_keep_their_grouping() {
  let difference = arithmetic(
    "b2",
    "MINUS",
    number("b3", 10.0),
    arithmetic("b4", "ADD", number("b5", 2.0), number("b6", 3.0)),
  );
  let out = run(&program(vec![set_variable("b1", "x", difference)]));
  assert!(out.contains("x = 10 - (2 + 3)"), "subtraction flattened in:\n{}", out);

  // ** is right-associative, so a nested power on the left needs parens.
  let tower = arithmetic(
    "b2",
    "POWER",
    arithmetic("b3", "POWER", number("b4", 2.0), number("b5", 3.0)),
    number("b6", 2.0),
  );
  let out = run(&program(vec![set_variable("b1", "x", tower)]));
  assert!(out.contains("x = (2 ** 3) ** 2"), "power flattened in:\n{}", out);
}

#[test]
fn nested_comparisons_never_chain() {
  let inner = BlockNode::new("logic_compare", "b2")
    .with_text_field("OP", "EQ")
    .with_value("A", number("b3", 1.0))
    .with_value("B", number("b4", 2.0));
  let outer = BlockNode::new("logic_compare", "b5")
    .with_text_field("OP", "EQ")
    .with_value("A", inner)
    .with_value("B", boolean("b6", false));

  let out = run(&program(vec![set_variable("b1", "x", outer)]));
  assert!(out.contains("x = (1 == 2) == False"), "comparison chained in:\n{}", out);
}

#[test]
fn input_prompts_are_quoted() {
  let input = BlockNode::new("python_input", "b2").with_text_field("PROMPT", "name?");
  let out = run(&program(vec![set_variable("b1", "n", input)]));

  assert!(out.contains("n = input(\"name?\")"), "input expression wrong in:\n{}", out);
}

fn print_text(
  id: &str,
  value: &str,
) -> BlockNode {
  BlockNode::new("text_print", id).with_value("TEXT", text(&format!("{}_t", id), value))
}
