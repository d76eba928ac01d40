pub mod block;
pub mod catalog;
pub mod error;
pub mod manifest;
pub mod render;
pub mod schema;
pub mod value;

pub use block::composition::Composition;
pub use block::{BlockDefinition, BlockInstance};
pub use catalog::{Catalog, Category};
pub use error::{BlockError, SchemaError};
pub use value::{ParamValue, Parameters};
