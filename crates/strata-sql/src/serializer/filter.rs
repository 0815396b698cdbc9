use super::{ColumnRef, Comma, Delimited, Formatter, Params, Serializer, ToSql};

use crate::stmt::Filter;

use indexmap::IndexMap;
use std::fmt::Write;
use strata_core::{
    stmt::{BinaryOp, FilterKind, FilterRaw, Range, Value},
    Error, Result,
};

/// Emitted for a conjunction without operands.
const TAUTOLOGY: &str = "(1 = 1)";

/// Emitted for a disjunction without operands.
const CONTRADICTION: &str = "(1 = 0)";

impl ToSql for &Filter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let serializer = f.serializer;

        match self.kind() {
            FilterKind::Property(columns) => {
                conjoin(f, compare(serializer, BinaryOp::Eq, columns), TAUTOLOGY)
            }
            FilterKind::Compare(op, columns) => {
                conjoin(f, compare(serializer, *op, columns), TAUTOLOGY)
            }
            // Match-all operands are the identity of a conjunction
            FilterKind::And(operands) => join(
                f,
                operands.iter().filter(|operand| !operand.is_all()).collect(),
                " AND ",
                TAUTOLOGY,
            ),
            FilterKind::Or(operands) => join(f, operands.iter().collect(), " OR ", CONTRADICTION),
            FilterKind::Not(operand) => {
                fmt!(f, "(NOT " operand ")");
                Ok(())
            }
            // A column without candidates contributes nothing
            FilterKind::In(lists) => conjoin(f, in_lists(serializer, lists, false), CONTRADICTION),
            FilterKind::NotIn(lists) => conjoin(f, in_lists(serializer, lists, true), TAUTOLOGY),
            FilterKind::Null(column) => {
                let column = serializer.column(column);
                fmt!(f, "(" column " IS NULL)");
                Ok(())
            }
            FilterKind::NotNull(column) => {
                let column = serializer.column(column);
                fmt!(f, "(" column " IS NOT NULL)");
                Ok(())
            }
            FilterKind::Between(ranges) => {
                conjoin(f, between(serializer, ranges, false), TAUTOLOGY)
            }
            FilterKind::NotBetween(ranges) => {
                conjoin(f, between(serializer, ranges, true), TAUTOLOGY)
            }
            FilterKind::Raw(raw) => raw.to_sql(f),
            // Deferred branches are resolved before serialization starts.
            FilterKind::Async(_) => Err(Error::unreachable_filter("$async")),
        }
    }
}

/// Writes a single part as is, several parts wrapped and joined by `AND`.
fn conjoin<P: Params, T: ToSql>(
    f: &mut Formatter<'_, P>,
    parts: Vec<T>,
    empty: &str,
) -> Result<()> {
    join(f, parts, " AND ", empty)
}

fn join<P: Params, T: ToSql>(
    f: &mut Formatter<'_, P>,
    parts: Vec<T>,
    separator: &'static str,
    empty: &str,
) -> Result<()> {
    match parts.len() {
        0 => empty.to_sql(f),
        1 => Delimited(parts, separator).to_sql(f),
        _ => {
            fmt!(f, "(" Delimited(parts, separator) ")");
            Ok(())
        }
    }
}

struct Comparison<'a> {
    column: ColumnRef<'a>,
    op: BinaryOp,
    value: &'a Value,
}

fn compare<'a>(
    serializer: &'a Serializer<'a>,
    op: BinaryOp,
    columns: &'a IndexMap<String, Value>,
) -> Vec<Comparison<'a>> {
    columns
        .iter()
        .map(|(column, value)| Comparison {
            column: serializer.column(column),
            op,
            value,
        })
        .collect()
}

impl ToSql for Comparison<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        fmt!(f, "(" self.column " " self.op.as_sql() " " self.value ")");
        Ok(())
    }
}

struct InList<'a> {
    column: ColumnRef<'a>,
    values: &'a [Value],
    negated: bool,
}

fn in_lists<'a>(
    serializer: &'a Serializer<'a>,
    lists: &'a IndexMap<String, Vec<Value>>,
    negated: bool,
) -> Vec<InList<'a>> {
    lists
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(column, values)| InList {
            column: serializer.column(column),
            values,
            negated,
        })
        .collect()
}

impl ToSql for InList<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let op = if self.negated { " NOT IN " } else { " IN " };
        fmt!(f, "(" self.column op "(" Comma(self.values) "))");
        Ok(())
    }
}

struct Between<'a> {
    column: ColumnRef<'a>,
    range: &'a Range,
    negated: bool,
}

fn between<'a>(
    serializer: &'a Serializer<'a>,
    ranges: &'a IndexMap<String, Range>,
    negated: bool,
) -> Vec<Between<'a>> {
    ranges
        .iter()
        .map(|(column, range)| Between {
            column: serializer.column(column),
            range,
            negated,
        })
        .collect()
}

impl ToSql for Between<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let op = if self.negated {
            " NOT BETWEEN "
        } else {
            " BETWEEN "
        };
        let Range { from, to } = self.range;
        fmt!(f, "(" self.column op from " AND " to ")");
        Ok(())
    }
}

impl ToSql for &FilterRaw {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let placeholders: Vec<usize> = self
            .bindings
            .iter()
            .map(|binding| f.params.push(binding).0)
            .collect();

        let query = renumber(&self.query, &placeholders)?;
        fmt!(f, "(" query.as_str() ")");
        Ok(())
    }
}

/// Rewrites the local `$1..$n` placeholders of a raw fragment to the
/// statement-wide positions its bindings were assigned.
///
/// The text is scanned once, so `$1` is never rewritten inside `$10`. A `$`
/// not followed by digits is copied through.
fn renumber(query: &str, placeholders: &[usize]) -> Result<String> {
    let mut ret = String::with_capacity(query.len());
    let mut rest = query;

    while let Some(pos) = rest.find('$') {
        ret.push_str(&rest[..pos]);

        let after = &rest[pos + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();

        if digits == 0 {
            ret.push('$');
            rest = after;
            continue;
        }

        let local = &after[..digits];
        let position = local
            .parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| placeholders.get(index));

        let Some(position) = position else {
            return Err(Error::malformed_filter(format!(
                "`$raw` references `${local}` but only {} binding(s) were given",
                placeholders.len()
            )));
        };

        write!(ret, "${position}").map_err(|err| strata_core::err!("{err}"))?;
        rest = &after[digits..];
    }

    ret.push_str(rest);
    Ok(ret)
}
