//! Synthetic dataset generation for the self-improvement loop.

pub mod synthetic;

pub use synthetic::{generate, Dataset};
