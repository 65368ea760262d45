pub mod aliases;
pub mod classifier;
pub mod sentiment;

pub use classifier::NewsClassifier;
