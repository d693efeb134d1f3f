mod advisory;
mod flaw;
mod tracker;

pub use advisory::*;
pub use flaw::*;
pub use tracker::*;
