//! Domain models for the Crop Advisory service

mod agronomic;
mod image_report;
mod user;
mod weather;
mod yield_report;

pub use agronomic::*;
pub use image_report::*;
pub use user::*;
pub use weather::*;
pub use yield_report::*;
