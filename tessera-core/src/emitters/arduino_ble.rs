//! BLE extension catalog for the embedded dialect.
//!
//! This catalog leans on every escape hatch the emission context offers:
//!
//! - **Ordering bands.** A characteristic must be attached to its service
//!   before that service is registered with the controller, no matter which
//!   block the user placed first. Attach statements are keyed in the `10`
//!   band (`ble_10_char_add_*`), registration in the `20` band
//!   (`ble_20_service_add_*`); lexicographic drain order does the rest.
//! - **Body table.** `BLE.poll()` must run every pass of the implicit loop,
//!   contributed once regardless of how many BLE blocks appear.
//! - **Notes.** The most recently declared service instance is recorded so
//!   a characteristic block can attach itself to it; a characteristic with
//!   no preceding service falls back to a generic default service.

use tessera_config::ValueKind;

use super::required_text;
use crate::emission::{Emission, Precedence};
use crate::registry::EmitterRegistry;

const INCLUDE_KEY: &str = "include_ble";
const INCLUDE_LINE: &str = "#include <ArduinoBLE.h>";
const LAST_SERVICE_NOTE: &str = "ble_last_service";

pub fn register(registry: &mut EmitterRegistry) {
  registry.register("ble_init", |node, gen| {
    let name = gen.value_to_code(node, "NAME", Precedence::NONE, ValueKind::Text)?;

    gen.context().add_definition(INCLUDE_KEY, INCLUDE_LINE);
    gen.context().add_body("ble_poll", "BLE.poll();");
    gen.context().add_setup(
      "ble_01_init",
      format!(
        "if (!BLE.begin()) {{ while (1); }}\nBLE.setLocalName({name});\nBLE.setDeviceName({name});",
        name = name
      ),
    );
    Ok(Emission::empty())
  });

  registry.register("ble_advertise", |_node, _gen| {
    Ok(Emission::Statement("BLE.advertise();\n".to_string()))
  });

  registry.register("ble_is_connected", |_node, _gen| {
    Ok(Emission::atomic("BLE.central().connected()"))
  });

  registry.register("ble_service_init", |node, gen| {
    let uuid = required_text(node, "UUID")?;
    let var_name = format!("bleService_{}", sanitize_uuid(&uuid));

    gen.context().set_note(LAST_SERVICE_NOTE, var_name.clone());
    gen.context().add_definition(INCLUDE_KEY, INCLUDE_LINE);
    gen.context().add_definition(
      format!("var_ble_service_{}", uuid),
      format!("BLEService {}(\"{}\");", var_name, uuid),
    );

    // Band 20: services register only after band-10 attach statements ran.
    gen.context().add_setup(
      format!("ble_20_service_add_{}", uuid),
      format!("BLE.addService({var});\nBLE.setAdvertisedService({var});", var = var_name),
    );
    Ok(Emission::empty())
  });

  registry.register("ble_char_init", |node, gen| {
    let uuid = required_text(node, "UUID")?;
    let property = required_text(node, "PROP")?;
    let char_type = required_text(node, "TYPE")?;
    let var_name = format!("bleChar_{}", sanitize_uuid(&uuid));

    gen.context().add_definition(INCLUDE_KEY, INCLUDE_LINE);

    let service_var = match gen.context().note(LAST_SERVICE_NOTE) {
      Some(service) => service.to_string(),
      None => {
        // No service block ran yet: declare the generic access service.
        let fallback = "bleService_default".to_string();
        gen.context().add_definition(
          "var_ble_service_default",
          format!("BLEService {}(\"1800\");", fallback),
        );
        gen
          .context()
          .add_setup("ble_20_service_add_default", format!("BLE.addService({});", fallback));
        gen.context().set_note(LAST_SERVICE_NOTE, fallback.clone());
        fallback
      },
    };

    let mut declaration = format!("{} {}(\"{}\", {}", char_type, var_name, uuid, property);
    if char_type == "BLEStringCharacteristic" {
      declaration.push_str(", 512");
    }
    declaration.push_str(");");

    gen.context().add_definition(format!("var_ble_char_{}", uuid), declaration);

    // Band 10: attach to the service before the service registers (band 20).
    gen.context().add_setup(
      format!("ble_10_char_add_{}", uuid),
      format!("{}.addCharacteristic({});", service_var, var_name),
    );
    Ok(Emission::empty())
  });

  registry.register("ble_char_write", |node, gen| {
    let uuid = required_text(node, "UUID")?;
    let value = gen.value_to_code(node, "VALUE", Precedence::NONE, ValueKind::Number)?;
    let var_name = format!("bleChar_{}", sanitize_uuid(&uuid));
    Ok(Emission::Statement(format!("{}.writeValue({});\n", var_name, value)))
  });

  registry.register("ble_char_read", |node, _gen| {
    let uuid = required_text(node, "UUID")?;
    Ok(Emission::atomic(format!("bleChar_{}.value()", sanitize_uuid(&uuid))))
  });

  registry.register("ble_char_was_written", |node, _gen| {
    let uuid = required_text(node, "UUID")?;
    Ok(Emission::atomic(format!("bleChar_{}.written()", sanitize_uuid(&uuid))))
  });
}

fn sanitize_uuid(uuid: &str) -> String {
  uuid
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn uuids_sanitize_to_identifier_text() {
    assert_eq!(sanitize_uuid("19B1"), "19B1");
    assert_eq!(sanitize_uuid("19b1-0001"), "19b1_0001");
  }
}
