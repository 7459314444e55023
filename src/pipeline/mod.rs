//! The notebook pipeline: an ordered list of steps and the runner that
//! executes them one after another.

pub mod report;
pub mod runner;
pub mod step;

pub use report::{PipelineReport, StepOutcome, StepReport};
pub use runner::{PipelineOutcome, PipelineRunner};
pub use step::{builtin_steps, NotebookStep};
