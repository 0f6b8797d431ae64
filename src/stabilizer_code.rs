//! Stabilizer Code
//!
//! A stabilizer code owns a patch of tiles and knows how to compile itself into a circuit
//! under either fault-injection regime. Measuring a tile generates a flow; the caller
//! supplies a callback turning each flow into extra detector coordinates, which keeps the
//! circuit builders agnostic of how downstream decoders want checks classified.
//!

use super::circuit::{Circuit, CircuitInstruction};
use super::flow::Flow;
use super::layout::{Patch, Tile};
use super::util::*;
use std::collections::BTreeMap;

/// assigns contiguous qubit indices: data qubits first (in position order), then one
/// ancilla per tile
pub struct QubitIndexing {
    data_qubit_index: BTreeMap<Position, QubitIndex>,
}

impl QubitIndexing {
    pub fn new(patch: &Patch) -> Self {
        let mut data_qubit_index = BTreeMap::new();
        for position in patch.data_qubits() {
            let index = data_qubit_index.len() as QubitIndex;
            data_qubit_index.insert(position, index);
        }
        Self { data_qubit_index }
    }

    pub fn data_qubit_num(&self) -> QubitNum {
        self.data_qubit_index.len() as QubitNum
    }

    pub fn data_qubit(&self, position: &Position) -> QubitIndex {
        match self.data_qubit_index.get(position) {
            Some(index) => *index,
            None => panic!("position {:?} is not a data qubit of this patch", position),
        }
    }

    pub fn data_qubits(&self) -> impl Iterator<Item = (&Position, &QubitIndex)> {
        self.data_qubit_index.iter()
    }

    pub fn measurement_qubit(&self, tile_index: usize) -> QubitIndex {
        self.data_qubit_num() + tile_index as QubitIndex
    }
}

/// a stabilizer code instance produced by a layout factory
#[derive(Debug, Clone, PartialEq)]
pub struct StabilizerCode {
    /// the tiles composing the physical layout
    pub patch: Patch,
}

impl StabilizerCode {
    pub fn new(patch: Patch) -> Self {
        Self { patch }
    }

    fn declare_qubit_coords(&self, circuit: &mut Circuit, indexing: &QubitIndexing) {
        for (position, qubit) in indexing.data_qubits() {
            circuit.push(CircuitInstruction::QubitCoords {
                qubit: *qubit,
                x: position.0 as f64,
                y: position.1 as f64,
            });
        }
        for (tile_index, tile) in self.patch.tiles.iter().enumerate() {
            circuit.push(CircuitInstruction::QubitCoords {
                qubit: indexing.measurement_qubit(tile_index),
                x: tile.measurement_qubit.0 as f64,
                y: tile.measurement_qubit.1 as f64,
            });
        }
    }

    fn measure_tile(
        &self,
        circuit: &mut Circuit,
        indexing: &QubitIndexing,
        tile_index: usize,
        tile: &Tile,
        p_flip: f64,
    ) {
        circuit.push(CircuitInstruction::MeasureStabilizer {
            basis: tile.basis,
            data_qubits: tile
                .ordered_data_qubits
                .iter()
                .map(|position| indexing.data_qubit(position))
                .collect(),
            measurement_qubit: indexing.measurement_qubit(tile_index),
            p_flip,
        });
    }

    fn detector_coords(tile: &Tile, round: usize, extra_coords_func: &impl Fn(&Flow) -> Vec<f64>) -> Vec<f64> {
        let mut coords = vec![
            tile.measurement_qubit.0 as f64,
            tile.measurement_qubit.1 as f64,
            round as f64,
        ];
        coords.extend(extra_coords_func(&tile.flow()));
        coords
    }

    /// phenomenological circuit: each round depolarizes every data qubit and flips every
    /// recorded outcome with the same probability, except that the final round is read out
    /// perfectly; detectors compare each check against its previous-round outcome
    pub fn make_phenom_circuit(
        &self,
        noise: f64,
        rounds: usize,
        extra_coords_func: impl Fn(&Flow) -> Vec<f64>,
    ) -> Circuit {
        assert!(rounds >= 1, "at least one syndrome extraction round required");
        let indexing = QubitIndexing::new(&self.patch);
        let qubit_num = indexing.data_qubit_num() + self.patch.tiles.len() as QubitNum;
        let mut circuit = Circuit::new(qubit_num, noise, rounds);
        self.declare_qubit_coords(&mut circuit, &indexing);
        let all_data_qubits: Vec<QubitIndex> = indexing.data_qubits().map(|(_, qubit)| *qubit).collect();
        let mut measurement_index: MeasurementIndex = 0;
        let mut previous: Vec<Option<MeasurementIndex>> = vec![None; self.patch.tiles.len()];
        for round in 0..rounds {
            circuit.push(CircuitInstruction::DepolarizeData {
                qubits: all_data_qubits.clone(),
                p: noise,
            });
            let p_flip = if round + 1 == rounds { 0. } else { noise };
            for (tile_index, tile) in self.patch.tiles.iter().enumerate() {
                self.measure_tile(&mut circuit, &indexing, tile_index, tile, p_flip);
                let measurements = match previous[tile_index] {
                    Some(previous_measurement) => vec![previous_measurement, measurement_index],
                    None => vec![measurement_index],
                };
                circuit.push(CircuitInstruction::Detector {
                    coords: Self::detector_coords(tile, round, &extra_coords_func),
                    measurements,
                });
                previous[tile_index] = Some(measurement_index);
                measurement_index += 1;
            }
        }
        circuit
    }

    /// code capacity circuit: inject data errors once, then read every check out perfectly
    /// in a single shot
    pub fn make_code_capacity_circuit(&self, noise: f64, extra_coords_func: impl Fn(&Flow) -> Vec<f64>) -> Circuit {
        let indexing = QubitIndexing::new(&self.patch);
        let qubit_num = indexing.data_qubit_num() + self.patch.tiles.len() as QubitNum;
        let mut circuit = Circuit::new(qubit_num, noise, 1);
        self.declare_qubit_coords(&mut circuit, &indexing);
        let all_data_qubits: Vec<QubitIndex> = indexing.data_qubits().map(|(_, qubit)| *qubit).collect();
        circuit.push(CircuitInstruction::DepolarizeData {
            qubits: all_data_qubits,
            p: noise,
        });
        for (tile_index, tile) in self.patch.tiles.iter().enumerate() {
            self.measure_tile(&mut circuit, &indexing, tile_index, tile, 0.);
            circuit.push(CircuitInstruction::Detector {
                coords: Self::detector_coords(tile, 0, &extra_coords_func),
                measurements: vec![tile_index as MeasurementIndex],
            });
        }
        circuit
    }
}
