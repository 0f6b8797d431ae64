//! Circuit
//!
//! A flat instruction list produced by the circuit builders, carrying enough annotation
//! (detector coordinates with a color/basis tag, qubit positions, the noise parameter and
//! round count it was built with) for a downstream simulator and decoder to consume it.
//!

use super::util::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CircuitInstruction {
    /// declare the lattice position of a qubit, for visualization and decoder geometry
    QubitCoords { qubit: QubitIndex, x: f64, y: f64 },
    /// depolarize each listed qubit independently with probability `p`
    DepolarizeData { qubits: Vec<QubitIndex>, p: f64 },
    /// project the listed data qubits onto their product-basis stabilizer and append the
    /// outcome to the measurement record; the recorded outcome is flipped with probability `p_flip`
    MeasureStabilizer {
        basis: char,
        data_qubits: Vec<QubitIndex>,
        measurement_qubit: QubitIndex,
        p_flip: f64,
    },
    /// declare a parity constraint over prior measurement record entries;
    /// coordinates are (x, y, t) followed by the extra coordinates of the check's flow
    Detector {
        coords: Vec<f64>,
        measurements: Vec<MeasurementIndex>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// total number of qubits addressed by the instructions
    pub qubit_num: QubitNum,
    /// the noise parameter the circuit was built with
    pub noise: f64,
    /// syndrome extraction rounds; always 1 for code capacity circuits
    pub rounds: usize,
    pub instructions: Vec<CircuitInstruction>,
}

impl Circuit {
    pub fn new(qubit_num: QubitNum, noise: f64, rounds: usize) -> Self {
        Self {
            qubit_num,
            noise,
            rounds,
            instructions: Vec::new(),
        }
    }

    pub fn push(&mut self, instruction: CircuitInstruction) {
        self.instructions.push(instruction);
    }

    pub fn measurement_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instruction| matches!(instruction, CircuitInstruction::MeasureStabilizer { .. }))
            .count()
    }

    pub fn detectors(&self) -> Vec<&CircuitInstruction> {
        self.instructions
            .iter()
            .filter(|instruction| matches!(instruction, CircuitInstruction::Detector { .. }))
            .collect()
    }

    /// every detector must reference existing measurement record entries
    pub fn sanity_check(&self) -> Result<(), String> {
        if self.instructions.is_empty() {
            return Err("empty circuit".to_string());
        }
        let mut measurement_count: MeasurementIndex = 0;
        for (instruction_index, instruction) in self.instructions.iter().enumerate() {
            match instruction {
                CircuitInstruction::MeasureStabilizer { data_qubits, .. } => {
                    if data_qubits.is_empty() {
                        return Err(format!("instruction {} measures no data qubits", instruction_index));
                    }
                    measurement_count += 1;
                }
                CircuitInstruction::Detector { measurements, .. } => {
                    if measurements.is_empty() {
                        return Err(format!("detector at instruction {} references no measurements", instruction_index));
                    }
                    for measurement in measurements.iter() {
                        if *measurement >= measurement_count {
                            return Err(format!(
                                "detector at instruction {} references future measurement {}",
                                instruction_index, measurement
                            ));
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "qubit_num": self.qubit_num,
            "noise": self.noise,
            "rounds": self.rounds,
            "instructions": self.instructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circuit_sanity_check_rejects_future_measurement() {  // cargo test circuit_sanity_check_rejects_future_measurement -- --nocapture
        let mut circuit = Circuit::new(2, 0.01, 1);
        circuit.push(CircuitInstruction::Detector {
            coords: vec![0., 0., 0., 0.],
            measurements: vec![0],
        });
        assert!(circuit.sanity_check().is_err());
        let mut circuit = Circuit::new(2, 0.01, 1);
        circuit.push(CircuitInstruction::MeasureStabilizer {
            basis: 'Z',
            data_qubits: vec![0],
            measurement_qubit: 1,
            p_flip: 0.,
        });
        circuit.push(CircuitInstruction::Detector {
            coords: vec![0., 0., 0., 3.],
            measurements: vec![0],
        });
        circuit.sanity_check().unwrap();
    }

    #[test]
    fn circuit_to_json_keeps_build_parameters() {  // cargo test circuit_to_json_keeps_build_parameters -- --nocapture
        let circuit = Circuit::new(4, 0.003, 5);
        let value = circuit.to_json();
        assert_eq!(value["noise"], json!(0.003));
        assert_eq!(value["rounds"], json!(5));
    }
}
