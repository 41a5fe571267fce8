pub mod instance;
pub mod silhouette;
pub mod traits;

pub use traits::{RenderSink, SinkUpdate, UpdateLog};
