pub mod dataset;
pub mod record;

pub use dataset::{AttributeSlot, Dataset};
pub use record::Record;
