//! Advisory decision engine
//!
//! Rule sets that turn a yield prediction or a set of leaf-colour ratios into
//! human-readable advice. Classification is deterministic; only the wording
//! of each message is drawn at random from a fixed pool, through a caller
//! supplied RNG so a fixed seed reproduces the exact text.

mod color;
mod image_rules;
mod messages;
mod report;
mod yield_rules;

pub use color::*;
pub use image_rules::*;
pub use messages::*;
pub use report::*;
pub use yield_rules::*;
