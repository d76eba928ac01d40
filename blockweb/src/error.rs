use thiserror::Error;

/// Errors raised by block, schema and composition operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    /// `set_parameter` on a name the instance does not carry.
    #[error("block '{block}' has no parameter named '{name}'")]
    UnknownParameter { block: String, name: String },

    /// No generation rule and nothing in the template to substitute.
    #[error("element type '{0}' has no generation rule and its template has no placeholders")]
    UnsupportedElementType(String),

    /// Catalog lookup for an element type that was never registered.
    #[error("unknown element type: {0}")]
    UnknownElementType(String),

    #[error("block index {index} out of range for composition of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A value rejected by an element's parameter schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("'{name}' is not a parameter of '{element_type}'")]
    UnknownParameter { element_type: String, name: String },

    #[error("parameter '{name}' expects {expected}, got {got}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        got: String,
    },

    #[error("'{value}' is not an option for '{name}' (expected one of: {options})")]
    InvalidOption {
        name: String,
        value: String,
        options: String,
    },
}
