//! Input validation
//!
//! Request bodies are deserialized into typed input structs carrying
//! `validator` rules and checked before they reach the handlers.

pub mod extractor;
pub mod filters;

pub use extractor::{ValidatedJson, parse_and_validate};
pub use filters::trimmed;
