pub mod audio;
pub mod cv;
pub mod error;
pub mod math;
pub mod model;
pub mod processor;
pub mod result;
pub mod setting;
pub mod sync;
pub mod tracing;
pub mod volume;

pub use error::Error;
pub use result::Result;
