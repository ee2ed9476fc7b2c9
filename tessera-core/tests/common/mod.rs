#![allow(dead_code)]

use tessera_graph::{BlockNode, GlobalVariable, Program};

pub fn program(blocks: Vec<BlockNode>) -> Program {
  Program {
    variables: Vec::new(),
    blocks,
  }
}

pub fn program_with_variables(
  variables: Vec<GlobalVariable>,
  blocks: Vec<BlockNode>,
) -> Program {
  Program { variables, blocks }
}

pub fn global(
  id: &str,
  name: &str,
) -> GlobalVariable {
  GlobalVariable {
    id: id.to_string(),
    name: name.to_string(),
  }
}

pub fn number(
  id: &str,
  value: f64,
) -> BlockNode {
  BlockNode::new("math_number", id).with_number_field("NUM", value)
}

pub fn text(
  id: &str,
  value: &str,
) -> BlockNode {
  BlockNode::new("text", id).with_text_field("TEXT", value)
}

pub fn boolean(
  id: &str,
  value: bool,
) -> BlockNode {
  BlockNode::new("logic_boolean", id).with_text_field("BOOL", if value { "TRUE" } else { "FALSE" })
}

pub fn highlow(
  id: &str,
  state: &str,
) -> BlockNode {
  BlockNode::new("arduino_highlow", id).with_text_field("STATE", state)
}

pub fn digital_write(
  id: &str,
  pin: f64,
  state: &str,
) -> BlockNode {
  BlockNode::new("arduino_digital_write", id)
    .with_value("PIN", number(&format!("{}_pin", id), pin))
    .with_value("STATE", highlow(&format!("{}_state", id), state))
}

pub fn arithmetic(
  id: &str,
  op: &str,
  a: BlockNode,
  b: BlockNode,
) -> BlockNode {
  BlockNode::new("math_arithmetic", id)
    .with_text_field("OP", op)
    .with_value("A", a)
    .with_value("B", b)
}

pub fn set_variable(
  id: &str,
  var: &str,
  value: BlockNode,
) -> BlockNode {
  BlockNode::new("variables_set", id)
    .with_text_field("VAR", var)
    .with_value("VALUE", value)
}
