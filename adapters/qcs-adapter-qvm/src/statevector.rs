//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use qcs_quil::QuilGate;

/// A statevector over `n` local qubits. Local qubit `k` is bit `k` of the
/// amplitude index.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply a gate. `angle` is the gate's evaluated parameter, if it has one.
    pub fn apply_gate(&mut self, gate: &QuilGate, angle: Option<f64>, qubits: &[usize]) {
        let theta = angle.unwrap_or(0.0);
        match gate {
            QuilGate::I => {}
            QuilGate::X => self.apply_x(qubits[0]),
            QuilGate::Y => self.apply_y(qubits[0]),
            QuilGate::Z => self.apply_phase(qubits[0], PI),
            QuilGate::H => self.apply_h(qubits[0]),
            QuilGate::S => self.apply_phase(qubits[0], PI / 2.0),
            QuilGate::T => self.apply_phase(qubits[0], PI / 4.0),
            QuilGate::Rx(_) => self.apply_rx(qubits[0], theta),
            QuilGate::Ry(_) => self.apply_ry(qubits[0], theta),
            QuilGate::Rz(_) => self.apply_rz(qubits[0], theta),
            QuilGate::Phase(_) => self.apply_phase(qubits[0], theta),
            QuilGate::Cz => self.apply_cphase(qubits[0], qubits[1], PI),
            QuilGate::Cnot => self.apply_cnot(qubits[0], qubits[1]),
            QuilGate::CPhase(_) => self.apply_cphase(qubits[0], qubits[1], theta),
            QuilGate::Swap => self.apply_swap(qubits[0], qubits[1]),
            QuilGate::ISwap => self.apply_iswap(qubits[0], qubits[1]),
            QuilGate::CCnot => self.apply_ccnot(qubits[0], qubits[1], qubits[2]),
        }
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    fn apply_cnot(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cphase(&mut self, a: usize, b: usize, theta: f64) {
        let mask = (1 << a) | (1 << b);
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == mask {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_iswap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_ccnot(&mut self, c1: usize, c2: usize, target: usize) {
        let ctrl_mask = (1 << c1) | (1 << c2);
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Probability of reading 1 on `qubit`.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Measure `qubit` in the computational basis and collapse the state.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> u8 {
        let p1 = self.probability_one(qubit).clamp(0.0, 1.0);
        let r: f64 = rng.r#gen();
        let outcome = u8::from(r < p1);
        let p = if outcome == 1 { p1 } else { 1.0 - p1 };

        let mask = 1 << qubit;
        let scale = 1.0 / p.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if u8::from(i & mask != 0) == outcome {
                *amp *= scale;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        outcome
    }

    /// Reset `qubit` to |0⟩ by measuring it and flipping a 1.
    pub fn reset<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) {
        if self.measure(qubit, rng) == 1 {
            self.apply_x(qubit);
        }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes[1..].iter().all(|a| approx_eq(*a, Complex64::new(0.0, 0.0))));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(&QuilGate::H, None, &[0]);
        sv.apply_gate(&QuilGate::Cnot, None, &[0, 1]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_rx_pi_flips() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&QuilGate::Rx(PI.into()), Some(PI), &[0]);
        assert!((sv.probability_one(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_measurement_collapses() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = Statevector::new(2);
        sv.apply_gate(&QuilGate::H, None, &[0]);
        sv.apply_gate(&QuilGate::Cnot, None, &[0, 1]);

        let first = sv.measure(0, &mut rng);
        // The partner qubit is now determined.
        for _ in 0..10 {
            assert_eq!(sv.measure(1, &mut rng), first);
        }
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sv = Statevector::new(1);
        sv.apply_gate(&QuilGate::H, None, &[0]);
        sv.reset(0, &mut rng);
        assert!(sv.probability_one(0) < 1e-12);
    }

    proptest! {
        #[test]
        fn test_rx_probability(theta in -6.0f64..6.0) {
            let mut sv = Statevector::new(1);
            sv.apply_gate(&QuilGate::Rx(theta.into()), Some(theta), &[0]);
            let expected = (theta / 2.0).sin().powi(2);
            prop_assert!((sv.probability_one(0) - expected).abs() < 1e-10);
        }
    }
}
