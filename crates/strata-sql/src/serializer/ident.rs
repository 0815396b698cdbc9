use super::{Formatter, Params, ToSql};

use strata_core::Result;

/// A double-quoted SQL identifier. Embedded quotes are doubled.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let name = self.0.as_ref();

        f.dst.reserve(name.len() + 2);
        f.dst.push('"');
        for ch in name.chars() {
            if ch == '"' {
                f.dst.push('"');
            }
            f.dst.push(ch);
        }
        f.dst.push('"');
        Ok(())
    }
}
