mod builder;
pub mod classifier;
pub mod node;
pub mod observer;
pub mod params;
pub mod render;

pub use classifier::Id3Classifier;
pub use node::{Node, TreeVisitor};
pub use observer::{BuildEvent, BuildObserver, NoopObserver, TracingObserver};
pub use params::Id3Params;
pub use render::TreeRenderer;
