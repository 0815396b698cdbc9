use super::Error;

/// Error when an attribute or lookup names a column the model does not
/// declare.
#[derive(Debug)]
pub(super) struct UnknownColumn {
    pub(super) table: Box<str>,
    pub(super) column: Box<str>,
}

impl std::error::Error for UnknownColumn {}

impl core::fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown column `{}` for table `{}`",
            self.column, self.table
        )
    }
}

impl Error {
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownColumn(UnknownColumn {
            table: table.into().into(),
            column: column.into().into(),
        }))
    }

    pub fn is_unknown_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownColumn(_))
    }
}
