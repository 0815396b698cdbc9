mod builder;
pub use builder::Builder;

mod column;
pub use column::Column;

mod model;
pub use model::Model;

mod name;
pub use name::{logical_case, physical_case};
