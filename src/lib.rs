//! Affect Sim - affective state simulation engine
//!
//! A single simulated subject's bounded affective state, driven one discrete
//! action at a time through hand-authored effect rules, modifiers and
//! homeostatic decay.

pub mod actions;
pub mod command;
pub mod core;
pub mod entity;
pub mod simulation;
