//! Mechanical translation between logical (camelCase) and physical
//! (snake_case) column names. Per-model overrides take precedence; see
//! [`Model::physical_name`](super::Model::physical_name).

use heck::{ToLowerCamelCase, ToSnakeCase};

/// `firstName` -> `first_name`
pub fn physical_case(name: &str) -> String {
    name.to_snake_case()
}

/// `first_name` -> `firstName`
pub fn logical_case(name: &str) -> String {
    name.to_lower_camel_case()
}
