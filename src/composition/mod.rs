//! # Composition Module
//!
//! The pipeline orchestrator: probing, planning, rendering, and assembly.

pub mod engine;

pub use engine::{AssemblyJob, CompositionEngine};
