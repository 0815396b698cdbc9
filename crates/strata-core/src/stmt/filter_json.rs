use super::{BinaryOp, Filter, FilterKind, FilterRaw, Range, Value};
use crate::{Error, Result};

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

impl Filter {
    /// Parses the `$`-keyed filter language.
    ///
    /// An object without reserved keys is a property filter. An object with a
    /// reserved key must carry exactly that one key.
    pub fn from_json(json: Json) -> Result<Filter> {
        let Json::Object(object) = json else {
            return Err(Error::malformed_filter(format!(
                "a filter must be an object; got `{json}`"
            )));
        };

        if !object.keys().any(|key| key.starts_with('$')) {
            return Ok(FilterKind::Property(scalars("property filter", object)?).into());
        }

        if object.len() != 1 {
            let keys = object.keys().cloned().collect::<Vec<_>>().join(", ");
            return Err(Error::malformed_filter(format!(
                "a special filter takes exactly one reserved key; got [{keys}]"
            )));
        }

        let Some((key, payload)) = object.into_iter().next() else {
            return Err(Error::malformed_filter("empty special filter"));
        };

        special(&key, payload)
    }
}

impl TryFrom<Json> for Filter {
    type Error = Error;

    fn try_from(json: Json) -> Result<Filter> {
        Filter::from_json(json)
    }
}

fn special(key: &str, payload: Json) -> Result<Filter> {
    let kind = match key {
        "$and" => FilterKind::And(filters(key, payload)?),
        "$or" => FilterKind::Or(filters(key, payload)?),
        "$not" => FilterKind::Not(Filter::from_json(payload)?),
        "$in" => FilterKind::In(lists(key, payload)?),
        "$notIn" => FilterKind::NotIn(lists(key, payload)?),
        "$null" => FilterKind::Null(column(key, payload)?),
        "$notNull" => FilterKind::NotNull(column(key, payload)?),
        "$between" => FilterKind::Between(ranges(key, payload)?),
        "$notBetween" => FilterKind::NotBetween(ranges(key, payload)?),
        "$gt" => FilterKind::Compare(BinaryOp::Gt, scalars(key, object(key, payload)?)?),
        "$gte" => FilterKind::Compare(BinaryOp::Ge, scalars(key, object(key, payload)?)?),
        "$lt" => FilterKind::Compare(BinaryOp::Lt, scalars(key, object(key, payload)?)?),
        "$lte" => FilterKind::Compare(BinaryOp::Le, scalars(key, object(key, payload)?)?),
        "$raw" => FilterKind::Raw(raw(payload)?),
        "$async" => {
            return Err(Error::malformed_filter(
                "`$async` has no JSON form; build it with `Filter::deferred`",
            ))
        }
        _ => return Err(Error::unreachable_filter(key)),
    };

    Ok(kind.into())
}

fn object(key: &str, payload: Json) -> Result<Map<String, Json>> {
    match payload {
        Json::Object(object) => Ok(object),
        other => Err(Error::malformed_filter(format!(
            "`{key}` expects an object; got `{other}`"
        ))),
    }
}

fn array(key: &str, payload: Json) -> Result<Vec<Json>> {
    match payload {
        Json::Array(items) => Ok(items),
        other => Err(Error::malformed_filter(format!(
            "`{key}` expects an array; got `{other}`"
        ))),
    }
}

fn filters(key: &str, payload: Json) -> Result<Vec<Filter>> {
    array(key, payload)?
        .into_iter()
        .map(Filter::from_json)
        .collect()
}

fn column(key: &str, payload: Json) -> Result<String> {
    match payload {
        Json::String(column) => Ok(column),
        other => Err(Error::malformed_filter(format!(
            "`{key}` expects a column name; got `{other}`"
        ))),
    }
}

fn scalars(key: &str, object: Map<String, Json>) -> Result<IndexMap<String, Value>> {
    object
        .into_iter()
        .map(|(column, value)| {
            let value = Value::try_from(value).map_err(|_| {
                Error::malformed_filter(format!(
                    "`{key}` expects a scalar value for column `{column}`"
                ))
            })?;
            Ok((column, value))
        })
        .collect()
}

fn lists(key: &str, payload: Json) -> Result<IndexMap<String, Vec<Value>>> {
    object(key, payload)?
        .into_iter()
        .map(|(column, values)| {
            let values = array(key, values)?
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()?;
            Ok((column, values))
        })
        .collect()
}

fn ranges(key: &str, payload: Json) -> Result<IndexMap<String, Range>> {
    object(key, payload)?
        .into_iter()
        .map(|(column, bounds)| {
            let mut bounds = object(key, bounds)?;
            let (Some(from), Some(to)) = (bounds.remove("from"), bounds.remove("to")) else {
                return Err(Error::malformed_filter(format!(
                    "`{key}` for column `{column}` needs both `from` and `to`"
                )));
            };
            let range = Range {
                from: Value::try_from(from)?,
                to: Value::try_from(to)?,
            };
            Ok((column, range))
        })
        .collect()
}

fn raw(payload: Json) -> Result<FilterRaw> {
    let mut payload = object("$raw", payload)?;

    let query = match payload.remove("$query") {
        Some(Json::String(query)) => query,
        _ => return Err(Error::malformed_filter("`$raw` needs a `$query` string")),
    };

    let bindings = match payload.remove("$bindings") {
        Some(bindings) => array("$bindings", bindings)?
            .into_iter()
            .map(Value::try_from)
            .collect::<Result<Vec<_>>>()?,
        None => vec![],
    };

    Ok(FilterRaw::new(query, bindings))
}
