//! Processors command implementation.

use anyhow::Result;
use console::style;

use qcs_adapter_qvm::get_qc;
use qcs_sampler::RigettiQcsService;

use super::common::spinner;

/// List the quantum processors visible to the configured QCS account.
pub async fn execute() -> Result<()> {
    // The service needs a computer to bind to; lookups never touch it.
    let qc = get_qc("9q-square", true)?;
    let service = RigettiQcsService::new(&qc);

    let spinner = spinner("Listing quantum processors...")?;
    let processors = service.list_quantum_processors().await;
    spinner.finish_and_clear();
    let processors = processors?;

    println!(
        "{} {} quantum processors:\n",
        style("QCS").cyan().bold(),
        processors.len()
    );
    for processor in &processors {
        println!("  {} {}", style("●").green(), style(&processor.id).bold());
    }
    Ok(())
}
