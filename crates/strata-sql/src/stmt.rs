mod count;
pub use count::Count;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod select;
pub use select::{Columns, Select};

mod update;
pub use update::Update;

pub use strata_core::stmt::{Filter, Scope, Value};

/// A statement the query assembler knows how to serialize.
#[derive(Debug, Clone)]
pub enum Statement {
    Count(Count),
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

