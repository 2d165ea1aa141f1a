pub mod annotate;
pub mod dom;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use annotate::{AnnotateError, Annotation, AnnotatedUnit, Annotator};
pub use error::ParseError;
pub use io::*;
pub use models::*;
pub use parsing::DocumentParser;
pub use parsing::options::{DELIMITER, ParserOptions, Replacement, SourceFormat};
