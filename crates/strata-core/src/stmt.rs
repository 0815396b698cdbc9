mod direction;
pub use direction::Direction;

mod filter;
pub use filter::{Filter, FilterKind};

mod filter_async;
pub use filter_async::FilterAsync;

mod filter_json;

mod filter_raw;
pub use filter_raw::FilterRaw;

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::OrderBy;

mod range;
pub use range::Range;

mod scope;
pub use scope::Scope;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;
