use super::resolve_pipeline;
use crate::cli::args::PipelineArgs;
use crate::pipeline::NotebookStep;
use anyhow::Result;

/// Print the resolved pipeline, one step per line
pub fn run_list_command(args: PipelineArgs) -> Result<()> {
    let resolved = resolve_pipeline(&args)?;

    match &resolved.loaded.source {
        Some(path) => println!("Pipeline from {}:", path.display()),
        None => println!("Built-in pipeline:"),
    }
    for (index, step) in resolved.loaded.config.steps.iter().enumerate() {
        println!("{}", format_step(index, step));
    }
    Ok(())
}

fn format_step(index: usize, step: &NotebookStep) -> String {
    let mut line = format!(
        "  {}. {}: {} -> {}",
        index + 1,
        step.name(),
        step.notebook.display(),
        step.output.display()
    );
    if !step.save_output {
        line.push_str(" (output not saved)");
    }
    line
}
