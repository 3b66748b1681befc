//! Learning analytics: the model store the quiz looks prompts up in, the SDK
//! it reports evidence to, and the glue that builds evidence from a grade.

pub mod reporting;
pub mod sdk;
pub mod taxonomy;
pub mod types;

pub use reporting::*;
pub use sdk::*;
pub use taxonomy::*;
pub use types::*;
