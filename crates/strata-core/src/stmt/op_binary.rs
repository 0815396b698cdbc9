/// Comparison operator of a property or `$gt`-family filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl BinaryOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
        }
    }

    /// The reserved key for this operator. Equality has none; it is the
    /// implicit property filter.
    pub fn key(self) -> Option<&'static str> {
        match self {
            BinaryOp::Eq => None,
            BinaryOp::Gt => Some("$gt"),
            BinaryOp::Ge => Some("$gte"),
            BinaryOp::Lt => Some("$lt"),
            BinaryOp::Le => Some("$lte"),
        }
    }
}
