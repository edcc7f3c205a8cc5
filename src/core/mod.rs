pub mod loader;
pub mod normalize;
pub mod reader;
pub mod recorder;
