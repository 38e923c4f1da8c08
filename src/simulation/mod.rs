//! Transition engine and the tools built on it

pub mod engine;
pub mod homeostasis;
pub mod modifiers;
pub mod motivation;
pub mod optimizer;
pub mod runner;

pub use engine::{Session, SessionSnapshot, Transition, TransitionReport};
pub use motivation::wanting;
pub use optimizer::{Candidate, OptimizationResult, OptimizerConfig, SequenceOptimizer};
pub use runner::{
    run_actions, run_actions_from, run_sequence, run_sequence_from, RunReport, RunStep, SkippedAction,
    StopReason,
};
