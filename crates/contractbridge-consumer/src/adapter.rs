//! Bridge from document schemas to the code generation model

use contractbridge_codegen::{TypeSchema, parse_type_schema};
use contractbridge_core::{ContractError, ContractResult, SchemaNode};

/// Convert one registry schema into the code generation model
///
/// The node goes through its JSON text form, the same representation the
/// document carries on the wire, so both sides read identical input.
pub fn to_codegen_schema(name: &str, node: &SchemaNode) -> ContractResult<TypeSchema> {
    let text = serde_json::to_string(&node.to_value())?;
    let value: serde_json::Value = serde_json::from_str(&text)?;

    parse_type_schema(name, &value).map_err(|e| ContractError::Generation {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "adapter/adapter_tests.rs"]
mod adapter_tests;
