//! Mystery content contracts and the provider abstraction.
//!
//! Defines the shape of a generated Mystery Package, the prompts sent to the
//! AI content provider, and the provider trait itself. Pure data contracts;
//! the HTTP adapter lives in `whodunit-openai`.

pub mod prompt;
pub mod provider;
pub mod schema;
