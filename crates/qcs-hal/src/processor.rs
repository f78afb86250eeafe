//! Quantum processor topology.

use petgraph::graphmap::UnGraphMap;

use crate::api::InstructionSetArchitecture;

/// A processor's qubits and the pairs that support two-qubit gates.
#[derive(Debug, Clone)]
pub struct QuantumProcessor {
    id: String,
    topology: UnGraphMap<u64, ()>,
}

impl QuantumProcessor {
    /// Build a processor from explicit qubits and couplings.
    pub fn from_edges(
        id: impl Into<String>,
        qubits: impl IntoIterator<Item = u64>,
        edges: impl IntoIterator<Item = (u64, u64)>,
    ) -> Self {
        let mut topology = UnGraphMap::new();
        for q in qubits {
            topology.add_node(q);
        }
        for (a, b) in edges {
            topology.add_edge(a, b, ());
        }
        Self {
            id: id.into(),
            topology,
        }
    }

    /// A `rows × cols` grid with row-major qubit numbering.
    pub fn grid(id: impl Into<String>, rows: u64, cols: u64) -> Self {
        let mut edges = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let idx = r * cols + c;
                if c + 1 < cols {
                    edges.push((idx, idx + 1));
                }
                if r + 1 < rows {
                    edges.push((idx, idx + cols));
                }
            }
        }
        Self::from_edges(id, 0..rows * cols, edges)
    }

    /// `n` qubits, all pairs coupled.
    pub fn fully_connected(id: impl Into<String>, n: u64) -> Self {
        let edges = (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j)));
        Self::from_edges(id, 0..n, edges)
    }

    /// The topology described by an instruction set architecture.
    pub fn from_isa(isa: &InstructionSetArchitecture) -> Self {
        let qubits = isa.architecture.nodes.iter().map(|n| n.node_id);
        let edges = isa
            .architecture
            .edges
            .iter()
            .filter_map(|e| match e.node_ids.as_slice() {
                [a, b] => Some((*a, *b)),
                _ => None,
            });
        Self::from_edges(isa.name.clone(), qubits, edges)
    }

    /// Processor identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Qubit addresses, sorted.
    pub fn qubits(&self) -> Vec<u64> {
        let mut qubits: Vec<u64> = self.topology.nodes().collect();
        qubits.sort_unstable();
        qubits
    }

    /// Check whether `qubit` exists.
    pub fn has_qubit(&self, qubit: u64) -> bool {
        self.topology.contains_node(qubit)
    }

    /// Check whether `a` and `b` are coupled.
    pub fn is_connected(&self, a: u64, b: u64) -> bool {
        self.topology.contains_edge(a, b)
    }

    /// Number of couplings.
    pub fn num_edges(&self) -> usize {
        self.topology.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nine_qubit_square() {
        let p = QuantumProcessor::grid("9q-square", 3, 3);
        assert_eq!(p.qubits(), (0..9).collect::<Vec<_>>());
        assert_eq!(p.num_edges(), 12);
        assert!(p.is_connected(0, 1));
        assert!(p.is_connected(4, 1));
        assert!(!p.is_connected(2, 3));
        assert!(!p.is_connected(0, 4));
    }

    #[test]
    fn test_fully_connected() {
        let p = QuantumProcessor::fully_connected("4q-qvm", 4);
        assert_eq!(p.num_edges(), 6);
        assert!(p.is_connected(3, 0));
        assert!(!p.has_qubit(4));
    }

    #[test]
    fn test_from_isa() {
        let isa: InstructionSetArchitecture = serde_json::from_str(
            r#"{
                "name": "Ankaa-test",
                "architecture": {
                    "family": "Ankaa",
                    "nodes": [{"node_id": 0}, {"node_id": 1}, {"node_id": 7}],
                    "edges": [{"node_ids": [0, 1]}, {"node_ids": [1, 7]}]
                }
            }"#,
        )
        .unwrap();
        let p = QuantumProcessor::from_isa(&isa);
        assert_eq!(p.id(), "Ankaa-test");
        assert_eq!(p.qubits(), vec![0, 1, 7]);
        assert!(p.is_connected(7, 1));
        assert!(!p.is_connected(0, 7));
    }
}
