//! Heuristic Fallback Predictor
//!
//! Deterministic, artifact-free risk scoring used when no trained model
//! artifacts could be loaded. Mirrors the cascade engine's output shape so
//! callers need not care which produced the result.

mod heuristic;

pub use heuristic::HeuristicPredictor;
