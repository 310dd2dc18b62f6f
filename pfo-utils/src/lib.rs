mod hash;
pub use hash::*;
mod json;
pub use json::*;
mod source;
pub use source::*;
