//! Dense unitaries of small Quil programs, for checking rewrites.
//!
//! Qubit `q` is bit `q` of the basis index. Within a gate matrix the first
//! listed qubit is the most significant local bit.

use num_complex::Complex64;
use qcs_quil::{Instruction, Program, QuilGate};
use std::f64::consts::FRAC_1_SQRT_2;

const EPSILON: f64 = 1e-9;

/// A square matrix in row-major order.
pub type Matrix = Vec<Vec<Complex64>>;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn diag(entries: &[Complex64]) -> Matrix {
    let n = entries.len();
    (0..n)
        .map(|r| (0..n).map(|k| if r == k { entries[r] } else { c(0.0, 0.0) }).collect())
        .collect()
}

fn permutation(map: &[usize]) -> Matrix {
    let n = map.len();
    let mut m = vec![vec![c(0.0, 0.0); n]; n];
    for (from, &to) in map.iter().enumerate() {
        m[to][from] = c(1.0, 0.0);
    }
    m
}

fn angle(gate: &QuilGate) -> f64 {
    gate.parameter()
        .and_then(|p| p.as_f64())
        .expect("test programs use constant angles")
}

/// The matrix of a single gate.
pub fn gate_matrix(gate: &QuilGate) -> Matrix {
    let one = c(1.0, 0.0);
    let zero = c(0.0, 0.0);
    let i = c(0.0, 1.0);
    match gate {
        QuilGate::I => diag(&[one, one]),
        QuilGate::X => permutation(&[1, 0]),
        QuilGate::Y => vec![vec![zero, -i], vec![i, zero]],
        QuilGate::Z => diag(&[one, -one]),
        QuilGate::H => {
            let s = c(FRAC_1_SQRT_2, 0.0);
            vec![vec![s, s], vec![s, -s]]
        }
        QuilGate::S => diag(&[one, i]),
        QuilGate::T => diag(&[one, Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4)]),
        QuilGate::Rx(_) => {
            let t = angle(gate) / 2.0;
            vec![
                vec![c(t.cos(), 0.0), c(0.0, -t.sin())],
                vec![c(0.0, -t.sin()), c(t.cos(), 0.0)],
            ]
        }
        QuilGate::Ry(_) => {
            let t = angle(gate) / 2.0;
            vec![
                vec![c(t.cos(), 0.0), c(-t.sin(), 0.0)],
                vec![c(t.sin(), 0.0), c(t.cos(), 0.0)],
            ]
        }
        QuilGate::Rz(_) => {
            let t = angle(gate) / 2.0;
            diag(&[Complex64::from_polar(1.0, -t), Complex64::from_polar(1.0, t)])
        }
        QuilGate::Phase(_) => diag(&[one, Complex64::from_polar(1.0, angle(gate))]),
        QuilGate::Cz => diag(&[one, one, one, -one]),
        QuilGate::Cnot => permutation(&[0, 1, 3, 2]),
        QuilGate::CPhase(_) => diag(&[one, one, one, Complex64::from_polar(1.0, angle(gate))]),
        QuilGate::Swap => permutation(&[0, 2, 1, 3]),
        QuilGate::ISwap => vec![
            vec![one, zero, zero, zero],
            vec![zero, zero, i, zero],
            vec![zero, i, zero, zero],
            vec![zero, zero, zero, one],
        ],
        QuilGate::CCnot => permutation(&[0, 1, 2, 3, 4, 5, 7, 6]),
    }
}

fn apply(state: &[Complex64], matrix: &Matrix, qubits: &[u64]) -> Vec<Complex64> {
    let k = qubits.len();
    let local = |index: usize| {
        qubits
            .iter()
            .fold(0usize, |acc, &q| (acc << 1) | ((index >> q) & 1))
    };
    let with_local = |index: usize, l: usize| {
        qubits.iter().enumerate().fold(index, |acc, (pos, &q)| {
            let bit = (l >> (k - 1 - pos)) & 1;
            (acc & !(1 << q)) | (bit << q)
        })
    };
    (0..state.len())
        .map(|index| {
            let row = local(index);
            (0..1usize << k)
                .map(|col| matrix[row][col] * state[with_local(index, col)])
                .sum()
        })
        .collect()
}

/// The unitary of the gates in `program` over `n` qubits.
pub fn program_unitary(program: &Program, n: usize) -> Matrix {
    let dim = 1usize << n;
    let mut columns: Vec<Vec<Complex64>> = (0..dim)
        .map(|j| (0..dim).map(|r| if r == j { c(1.0, 0.0) } else { c(0.0, 0.0) }).collect())
        .collect();
    for instruction in program.instructions() {
        if let Instruction::Gate { gate, qubits } = instruction {
            let m = gate_matrix(gate);
            for column in &mut columns {
                *column = apply(column, &m, qubits);
            }
        }
    }
    (0..dim)
        .map(|r| (0..dim).map(|j| columns[j][r]).collect())
        .collect()
}

/// Assert `a == e^{iφ} b` for some global phase `φ`.
pub fn assert_equivalent(a: &Matrix, b: &Matrix) {
    let (r, k) = (0..a.len())
        .flat_map(|r| (0..a.len()).map(move |k| (r, k)))
        .max_by(|&(r1, k1), &(r2, k2)| a[r1][k1].norm().total_cmp(&a[r2][k2].norm()))
        .expect("non-empty matrix");
    let phase = b[r][k] / a[r][k];
    assert!((phase.norm() - 1.0).abs() < EPSILON, "not equal up to phase");
    for (ra, rb) in a.iter().zip(b) {
        for (x, y) in ra.iter().zip(rb) {
            assert!((x * phase - y).norm() < EPSILON, "{x} * {phase} != {y}");
        }
    }
}
