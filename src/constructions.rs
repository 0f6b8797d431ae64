//! Keyed Constructions
//!
//! This module contains the named pyramid code constructions consumed by the experiment
//! harness: the harness builds the registry once, looks a construction up by name and
//! invokes it with a parameter bundle to obtain a ready-to-simulate circuit. Each
//! construction binds a (topology, noise mode) pair at registry-build time and dispatches
//! through one shared circuit-building routine.
//!

use super::circuit::Circuit;
use super::flow::flow_extra_coords;
use super::layout::{make_planar_pyramid_code_layout, make_toric_pyramid_code_layout, Patch, Tile};
use super::stabilizer_code::StabilizerCode;
use super::util::*;
use std::collections::BTreeMap;
use std::path::Path;

/// filename of the debug visualization written next to a construction when requested
pub const DEBUG_PATCH_SVG_FILENAME: &str = "rgb_patch.svg";

/// cyclic basis alphabet used to relabel tiles by their color index in debug overlays
pub const BASIS_ALPHABET: [char; 6] = ['X', 'Y', 'Z', 'X', 'Y', 'Z'];

/// patch topology bound by a construction at registry-build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Planar,
    Toric,
}

impl Topology {
    /// layout dimensions are fully determined by the code diameter
    pub fn layout_dimensions(&self, diameter: usize) -> (Coord, Coord) {
        let d = diameter as Coord;
        match self {
            Topology::Planar => (d * 2 - 1, d * 3 / 2 + 1),
            Topology::Toric => {
                let height = d * 3 / 2;
                // round up to a multiple of 3 so the row coloring wraps around the torus
                (d * 2, height + (3 - height % 3) % 3)
            }
        }
    }

    pub fn make_layout(&self, diameter: usize) -> StabilizerCode {
        let (width, height) = self.layout_dimensions(diameter);
        match self {
            Topology::Planar => make_planar_pyramid_code_layout(width, height),
            Topology::Toric => make_toric_pyramid_code_layout(width, height),
        }
    }
}

/// fault-injection regime bound by a construction at registry-build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseMode {
    /// single-shot: inject errors once before one perfect round of syndrome extraction
    CodeCapacity,
    /// per-round idealized data and measurement errors
    Phenomenological,
}

/// a named construction: a (topology, noise mode) pair turning a [`Params`] bundle into a
/// circuit; the registry entry carries no other state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Construction {
    pub topology: Topology,
    pub noise_mode: NoiseMode,
}

impl Construction {
    pub fn new(topology: Topology, noise_mode: NoiseMode) -> Self {
        Self { topology, noise_mode }
    }

    /// generate the circuit of this construction
    pub fn generate(&self, params: &Params) -> Circuit {
        params.sanity_check();
        let code = self.topology.make_layout(params.diameter);
        make_simple_circuit(params, &code, self.noise_mode == NoiseMode::Phenomenological)
    }
}

/// build the immutable name -> construction mapping; exactly these four names exist
pub fn make_named_pyramid_code_constructions() -> BTreeMap<String, Construction> {
    let mut constructions = BTreeMap::new();
    constructions.insert(
        "transit_pyramid_code".to_string(),
        Construction::new(Topology::Planar, NoiseMode::CodeCapacity),
    );
    constructions.insert(
        "phenom_pyramid_code".to_string(),
        Construction::new(Topology::Planar, NoiseMode::Phenomenological),
    );
    constructions.insert(
        "transit_toric_pyramid_code".to_string(),
        Construction::new(Topology::Toric, NoiseMode::CodeCapacity),
    );
    constructions.insert(
        "phenom_toric_pyramid_code".to_string(),
        Construction::new(Topology::Toric, NoiseMode::Phenomenological),
    );
    constructions
}

/// the shared circuit-building routine behind every construction
fn make_simple_circuit(params: &Params, code: &StabilizerCode, phenom: bool) -> Circuit {
    if let Some(debug_out_dir) = params.debug_out_dir.as_ref() {
        write_debug_patch_svg(code, &debug_out_dir.join(DEBUG_PATCH_SVG_FILENAME));
    }
    if phenom {
        return code.make_phenom_circuit(params.noise_model.idle_depolarization, params.rounds, flow_extra_coords);
    }
    assert!(params.rounds == 1, "code capacity circuits are single-shot, rounds must be 1");
    code.make_code_capacity_circuit(params.noise_model.idle_depolarization, flow_extra_coords)
}

/// relabel each tile's basis through the cyclic alphabet indexed by its color, which makes
/// the three color classes visually distinct in a basis-colored rendering
fn relabel_by_color(patch: &Patch) -> Patch {
    Patch::new(
        patch
            .tiles
            .iter()
            .map(|tile| {
                Tile::new(
                    tile.ordered_data_qubits.clone(),
                    tile.measurement_qubit,
                    BASIS_ALPHABET[tile.extra_coords[0] as usize],
                    tile.extra_coords.clone(),
                )
            })
            .collect(),
    )
}

/// render the full patch plus basis-restricted and color-relabeled overlays; purely
/// diagnostic and has no effect on the generated circuit, but a failed write is still fatal
fn write_debug_patch_svg(code: &StabilizerCode, path: &Path) {
    let x_tiles = code.patch.with_only_x_tiles();
    let z_tiles = code.patch.with_only_z_tiles();
    let overlays = [
        x_tiles.clone(),
        z_tiles.clone(),
        relabel_by_color(&x_tiles),
        relabel_by_color(&z_tiles),
    ];
    if let Err(error) = code.patch.write_svg(path, &overlays) {
        panic!("cannot write debug patch svg to {}: {}", path.display(), error);
    }
}

#[cfg(test)]
mod tests {
    use super::super::circuit::CircuitInstruction;
    use super::*;

    #[test]
    fn constructions_registry_names() {  // cargo test constructions_registry_names -- --nocapture
        let constructions = make_named_pyramid_code_constructions();
        let names: Vec<&String> = constructions.keys().collect();
        assert_eq!(
            names,
            vec![
                "phenom_pyramid_code",
                "phenom_toric_pyramid_code",
                "transit_pyramid_code",
                "transit_toric_pyramid_code",
            ]
        );
        let params = Params::new(3, 1, 0.001);
        for construction in constructions.values() {
            let circuit = construction.generate(&params);
            circuit.sanity_check().unwrap();
        }
    }

    #[test]
    fn constructions_layout_dimensions() {  // cargo test constructions_layout_dimensions -- --nocapture
        assert_eq!(Topology::Planar.layout_dimensions(4), (7, 7));
        assert_eq!(Topology::Toric.layout_dimensions(4), (8, 6));
        assert_eq!(Topology::Toric.layout_dimensions(3), (6, 6));
        assert_eq!(Topology::Toric.layout_dimensions(5), (10, 9));
        // toric heights are always multiples of 3, no smaller multiple works
        for diameter in 1..20 {
            let (_width, height) = Topology::Toric.layout_dimensions(diameter);
            assert_eq!(height % 3, 0);
            assert!(height >= diameter as Coord * 3 / 2);
            assert!(height - 3 < diameter as Coord * 3 / 2);
        }
    }

    #[test]
    fn constructions_transit_single_shot() {  // cargo test constructions_transit_single_shot -- --nocapture
        let constructions = make_named_pyramid_code_constructions();
        let params = Params::new(3, 1, 0.001);
        for name in ["transit_pyramid_code", "transit_toric_pyramid_code"] {
            let circuit = constructions[name].generate(&params);
            assert_eq!(circuit.rounds, 1);
        }
    }

    #[test]
    #[should_panic]
    fn constructions_transit_rejects_multiple_rounds() {  // cargo test constructions_transit_rejects_multiple_rounds -- --nocapture
        let constructions = make_named_pyramid_code_constructions();
        constructions["transit_pyramid_code"].generate(&Params::new(3, 2, 0.001));
    }

    #[test]
    #[should_panic]
    fn constructions_transit_toric_rejects_multiple_rounds() {  // cargo test constructions_transit_toric_rejects_multiple_rounds -- --nocapture
        let constructions = make_named_pyramid_code_constructions();
        constructions["transit_toric_pyramid_code"].generate(&Params::new(3, 2, 0.001));
    }

    #[test]
    fn constructions_phenom_keeps_noise_and_rounds() {  // cargo test constructions_phenom_keeps_noise_and_rounds -- --nocapture
        let constructions = make_named_pyramid_code_constructions();
        let params = Params::new(3, 5, 0.002);
        let circuit = constructions["phenom_pyramid_code"].generate(&params);
        assert_eq!(circuit.noise, params.noise_model.idle_depolarization);
        assert_eq!(circuit.rounds, 5);
        // every detector tag classifies one of the six (color, basis) check classes
        for detector in circuit.detectors() {
            if let CircuitInstruction::Detector { coords, .. } = detector {
                let tag = coords[3];
                assert!(tag >= 0. && tag <= 5. && tag.fract() == 0.);
            }
        }
    }

    #[test]
    fn constructions_debug_out_dir_writes_one_artifact() {  // cargo test constructions_debug_out_dir_writes_one_artifact -- --nocapture
        let debug_out_dir = std::env::temp_dir().join("pyramid_color_code_constructions_debug_out_dir");
        if debug_out_dir.exists() {
            std::fs::remove_dir_all(&debug_out_dir).unwrap();
        }
        std::fs::create_dir_all(&debug_out_dir).unwrap();
        let constructions = make_named_pyramid_code_constructions();
        let params = Params::new(3, 5, 0.001);
        let plain_circuit = constructions["phenom_pyramid_code"].generate(&params);
        let debug_circuit = constructions["phenom_pyramid_code"]
            .generate(&params.clone().with_debug_out_dir(debug_out_dir.clone()));
        // the debug artifact never alters the generated circuit
        assert_eq!(plain_circuit, debug_circuit);
        if cfg!(not(feature = "disable_visualizer")) {
            let entries: Vec<_> = std::fs::read_dir(&debug_out_dir).unwrap().collect::<Result<_, _>>().unwrap();
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].file_name(), DEBUG_PATCH_SVG_FILENAME);
        }
        std::fs::remove_dir_all(&debug_out_dir).unwrap();
    }
}
