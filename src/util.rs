use serde::{Deserialize, Serialize};
use std::path::PathBuf;

cfg_if::cfg_if! {
    if #[cfg(feature="u32_index")] {
        // use u32 to store index, for less memory usage
        pub type QubitIndex = u32;
        pub type QubitNum = QubitIndex;
        pub type MeasurementIndex = u32;
    } else {
        pub type QubitIndex = usize;
        pub type QubitNum = QubitIndex;
        pub type MeasurementIndex = usize;
    }
}

/// integer lattice coordinate
pub type Coord = i64;
/// a position on the lattice, (x, y)
pub type Position = (Coord, Coord);

/// the noise model feeding the circuit builders; only the idle depolarization rate
/// is consumed by the pyramid code constructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseModel {
    /// probability of a depolarization error on each idle data qubit, within [0, 1)
    pub idle_depolarization: f64,
}

impl NoiseModel {
    pub fn new(idle_depolarization: f64) -> Self {
        Self { idle_depolarization }
    }
}

/// the parameter bundle handed to each construction by the experiment harness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Params {
    /// code diameter, determines the layout dimensions
    pub diameter: usize,
    /// number of syndrome extraction rounds; must be 1 for code capacity circuits
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// noise model parameters
    pub noise_model: NoiseModel,
    /// when set, constructions persist debug visualizations into this directory
    #[serde(default)]
    pub debug_out_dir: Option<PathBuf>,
}

pub fn default_rounds() -> usize {
    1
}

impl Params {
    pub fn new(diameter: usize, rounds: usize, idle_depolarization: f64) -> Self {
        let params = Self {
            diameter,
            rounds,
            noise_model: NoiseModel::new(idle_depolarization),
            debug_out_dir: None,
        };
        params.sanity_check();
        params
    }

    pub fn with_debug_out_dir(mut self, debug_out_dir: PathBuf) -> Self {
        self.debug_out_dir = Some(debug_out_dir);
        self
    }

    pub fn sanity_check(&self) {
        assert!(self.diameter >= 1, "diameter must be a positive integer");
        assert!(self.rounds >= 1, "rounds must be a positive integer");
        assert!(
            (0. ..1.).contains(&self.noise_model.idle_depolarization),
            "idle depolarization must be a probability within [0, 1), got {}",
            self.noise_model.idle_depolarization
        );
    }
}
