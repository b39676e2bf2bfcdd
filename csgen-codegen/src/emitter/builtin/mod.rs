//! Body emitters shipped with the crate.

mod equatable;
mod properties;
mod raw_text;

pub use equatable::EquatableEmitter;
pub use properties::PropertiesEmitter;
pub use raw_text::RawTextEmitter;
