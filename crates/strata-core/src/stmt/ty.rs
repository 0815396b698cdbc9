/// Logical type of a declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    F64,
    I64,
    String,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Type::Bool => "bool",
            Type::F64 => "f64",
            Type::I64 => "i64",
            Type::String => "String",
        }
    }
}
