use crate::stmt::Type;

/// A persisted field of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Logical (application-facing) name, e.g. `firstName`
    pub name: String,

    /// Physical (storage) name, e.g. `first_name`
    pub storage_name: String,

    pub ty: Type,
}
