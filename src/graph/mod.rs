//! Transition graphs
//!
//! Loading labeled transition graphs and enumerating their simple cycles.

pub mod cycles;
pub mod document;
pub mod transition;

pub use cycles::simple_cycles;
pub use document::{EdgeSpec, NetworkDocument, ParameterGraph};
pub use transition::{LabeledCycle, TransitionGraph};
