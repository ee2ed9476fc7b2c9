mod common;

use common::*;
use tessera_config::Dialect;
use tessera_core::emitters::arduino_registry;
use tessera_core::{generate, Emission, GenerationError};
use tessera_graph::BlockNode;

fn ble_program() -> tessera_graph::Program {
  // Characteristic placed after the service on purpose; the output order
  // must not depend on block placement.
  program(vec![
    BlockNode::new("ble_init", "b1").with_value("NAME", text("b2", "beacon")),
    BlockNode::new("ble_service_init", "b3").with_text_field("UUID", "180F"),
    BlockNode::new("ble_char_init", "b4")
      .with_text_field("UUID", "2A19")
      .with_text_field("PROP", "BLERead | BLENotify")
      .with_text_field("TYPE", "BLEByteCharacteristic"),
    BlockNode::new("ble_advertise", "b5"),
  ])
}

#[test]
fn generation_is_byte_deterministic() {
  let registry = arduino_registry();
  let dialect = Dialect::arduino();
  let program = ble_program();

  let first = generate(&program, &registry, &dialect).unwrap();
  let second = generate(&program, &registry, &dialect).unwrap();
  assert_eq!(first, second);
}

#[test]
fn characteristics_attach_before_services_register() {
  let registry = arduino_registry();
  let out = generate(&ble_program(), &registry, &Dialect::arduino()).unwrap();

  let attach = out.find(".addCharacteristic(").expect("attach statement missing");
  let register = out.find("BLE.addService(").expect("register statement missing");
  assert!(attach < register, "ordering bands violated in:\n{}", out);
}

#[test]
fn ble_poll_lands_once_in_the_loop() {
  let registry = arduino_registry();
  let out = generate(&ble_program(), &registry, &Dialect::arduino()).unwrap();

  assert_eq!(out.matches("BLE.poll();").count(), 1, "poll duplicated in:\n{}", out);
  assert!(out.contains("void loop() {\n  BLE.advertise();\n  BLE.poll();\n}"), "loop section wrong in:\n{}", out);
}

#[test]
fn orphan_characteristics_get_a_default_service() {
  let registry = arduino_registry();
  let program = program(vec![BlockNode::new("ble_char_init", "b1")
    .with_text_field("UUID", "2A19")
    .with_text_field("PROP", "BLERead")
    .with_text_field("TYPE", "BLEByteCharacteristic")]);

  let out = generate(&program, &registry, &Dialect::arduino()).unwrap();
  assert!(out.contains("BLEService bleService_default(\"1800\");"), "fallback service missing in:\n{}", out);
  assert!(out.contains("bleService_default.addCharacteristic(bleChar_2A19);"), "attach missing in:\n{}", out);
}

#[test]
fn unknown_kinds_fail_with_their_node_id() {
  let registry = arduino_registry();
  let program = program(vec![BlockNode::new("mystery_block", "b42")]);

  let err = generate(&program, &registry, &Dialect::arduino()).unwrap_err();
  assert_eq!(err.code(), "GEN0001");
  assert_eq!(err.node_id(), "b42");
  assert!(matches!(err, GenerationError::UnknownKind { .. }));
}

#[test]
fn missing_required_fields_fail_fatally() {
  let registry = arduino_registry();
  let program = program(vec![set_variable("b1", "x", BlockNode::new("math_number", "b2"))]);

  let err = generate(&program, &registry, &Dialect::arduino()).unwrap_err();
  assert_eq!(err.code(), "GEN0002");
  assert!(err.to_string().contains("NUM"), "field name absent from: {}", err);
}

#[test]
fn extension_registrations_override_builtins() {
  let mut registry = arduino_registry();
  registry.register("math_number", |_, _| Ok(Emission::atomic("42")));

  let program = program(vec![set_variable("b1", "x", number("b2", 7.0))]);
  let out = generate(&program, &registry, &Dialect::arduino()).unwrap();
  assert!(out.contains("x = 42;"), "override ignored in:\n{}", out);
}

#[test]
fn failing_extension_emitters_surface_their_cause() {
  use std::error::Error;

  let mut registry = arduino_registry();
  registry.register("ext_block", |node, _| {
    Err(GenerationError::emitter_failed(node, "uuid field malformed"))
  });

  let program = program(vec![BlockNode::new("ext_block", "b9")]);
  let err = generate(&program, &registry, &Dialect::arduino()).unwrap_err();
  assert_eq!(err.code(), "GEN0003");
  assert!(err.source().is_some());
  assert!(err.to_string().contains("uuid field malformed"));
}
