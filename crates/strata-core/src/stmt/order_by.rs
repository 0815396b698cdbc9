use super::Direction;

/// One sort directive of a scope's ordering list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Logical column name
    pub column: String,

    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> OrderBy {
        OrderBy {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> OrderBy {
        OrderBy {
            column: column.into(),
            direction: Direction::Desc,
        }
    }
}

impl From<&str> for OrderBy {
    fn from(column: &str) -> Self {
        OrderBy::asc(column)
    }
}

impl From<(&str, Direction)> for OrderBy {
    fn from((column, direction): (&str, Direction)) -> Self {
        OrderBy {
            column: column.into(),
            direction,
        }
    }
}
