//! ISA command implementation.

use anyhow::Result;
use console::style;

use qcs_adapter_qvm::get_qc;
use qcs_hal::{InstructionSetArchitecture, QuantumProcessor};
use qcs_sampler::RigettiQcsService;

use super::common::spinner;

/// Fetch and show the instruction set architecture of a processor.
pub async fn execute(quantum_processor_id: &str, json: bool) -> Result<()> {
    let qc = get_qc("9q-square", true)?;
    let service = RigettiQcsService::new(&qc);

    let spinner = spinner(format!("Fetching ISA for {quantum_processor_id}..."))?;
    let isa = service
        .get_instruction_set_architecture(quantum_processor_id)
        .await;
    spinner.finish_and_clear();
    let isa = isa?;

    if json {
        println!("{}", serde_json::to_string_pretty(&isa)?);
    } else {
        print!("{}", summarize(&isa));
    }
    Ok(())
}

fn summarize(isa: &InstructionSetArchitecture) -> String {
    let processor = QuantumProcessor::from_isa(isa);
    let mut out = format!("{} {}\n", style("ISA").cyan().bold(), style(&isa.name).bold());
    if let Some(family) = &isa.architecture.family {
        out.push_str(&format!("  Family: {family}\n"));
    }
    out.push_str(&format!(
        "  Qubits: {}, couplings: {}\n",
        processor.qubits().len(),
        processor.num_edges()
    ));
    let mut gates: Vec<&str> = isa.instructions.iter().map(|op| op.name.as_str()).collect();
    gates.sort_unstable();
    gates.dedup();
    out.push_str(&format!("  Operations: {}\n", gates.join(", ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_counts_topology() {
        let isa: InstructionSetArchitecture = serde_json::from_value(serde_json::json!({
            "name": "Test-2",
            "architecture": {
                "family": "Ankaa",
                "nodes": [{"node_id": 0}, {"node_id": 1}, {"node_id": 2}],
                "edges": [{"node_ids": [0, 1]}, {"node_ids": [1, 2]}]
            },
            "instructions": [
                {"name": "RX", "sites": []},
                {"name": "CZ", "sites": []},
                {"name": "RX", "sites": []}
            ],
            "benchmarks": []
        }))
        .unwrap();

        let summary = console::strip_ansi_codes(&summarize(&isa)).to_string();
        assert!(summary.contains("Test-2"));
        assert!(summary.contains("Family: Ankaa"));
        assert!(summary.contains("Qubits: 3, couplings: 2"));
        assert!(summary.contains("Operations: CZ, RX"));
    }
}
