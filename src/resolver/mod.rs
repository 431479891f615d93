// src/resolver/mod.rs

mod cache;
mod coordinator;
mod runner;

pub use cache::ResolutionCache;
pub use coordinator::{MediaStream, RequestCoordinator};
pub use runner::ExtractionRunner;
