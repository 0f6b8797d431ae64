//! Pyramid Code Layouts
//!
//! This module contains the tile/patch data structures and the two layout factories that
//! arrange color code plaquettes into pyramid-shaped patches, either on an open plane or
//! wrapped around a torus. Plaquette centers live on the even checkerboard of the integer
//! lattice; every plaquette carries one X tile and one Z tile over the same data qubits,
//! and tiles are 3-colored by row so the color classes cycle vertically.
//!

use super::flow::{Basis, Color, Flow};
use super::stabilizer_code::StabilizerCode;
use super::util::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io;
use std::path::Path;

/// data qubit offsets around a plaquette center, in cyclic order starting from the top
pub const TILE_DATA_OFFSETS: [(Coord, Coord); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// one stabilizer check region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// data qubits in measurement order
    pub ordered_data_qubits: Vec<Position>,
    /// the ancilla at the center of the tile
    pub measurement_qubit: Position,
    /// measurement basis applied to every data qubit of this tile
    pub basis: char,
    /// auxiliary annotations; element 0 is the color index (0=r, 1=g, 2=b)
    pub extra_coords: Vec<f64>,
}

impl Tile {
    pub fn new(
        ordered_data_qubits: Vec<Position>,
        measurement_qubit: Position,
        basis: char,
        extra_coords: Vec<f64>,
    ) -> Self {
        Self {
            ordered_data_qubits,
            measurement_qubit,
            basis,
            extra_coords,
        }
    }

    /// the color class stored at `extra_coords[0]`
    pub fn color(&self) -> Color {
        assert!(!self.extra_coords.is_empty(), "tile carries no color annotation");
        Color::from_index(self.extra_coords[0] as usize)
    }

    /// the flow generated by measuring this tile; only meaningful for X/Z tiles
    pub fn flow(&self) -> Flow {
        Flow::new(self.color(), Basis::from_char(self.basis))
    }
}

/// the set of tiles composing a code instance's physical layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub tiles: Vec<Tile>,
}

impl Patch {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn with_only_x_tiles(&self) -> Patch {
        Patch::new(self.tiles.iter().filter(|tile| tile.basis == 'X').cloned().collect())
    }

    pub fn with_only_z_tiles(&self) -> Patch {
        Patch::new(self.tiles.iter().filter(|tile| tile.basis == 'Z').cloned().collect())
    }

    /// deterministic enumeration of all data qubit positions
    pub fn data_qubits(&self) -> BTreeSet<Position> {
        let mut data_qubits = BTreeSet::new();
        for tile in self.tiles.iter() {
            for position in tile.ordered_data_qubits.iter() {
                data_qubits.insert(*position);
            }
        }
        data_qubits
    }

    /// sanity check to catch malformed layouts that are hard to debug downstream
    pub fn sanity_check(&self) -> Result<(), String> {
        if self.tiles.is_empty() {
            return Err("empty patch".to_string());
        }
        for (tile_index, tile) in self.tiles.iter().enumerate() {
            if tile.ordered_data_qubits.is_empty() {
                return Err(format!("tile {} has no data qubits", tile_index));
            }
            if !['X', 'Y', 'Z'].contains(&tile.basis) {
                return Err(format!("tile {} has invalid basis '{}'", tile_index, tile.basis));
            }
            if tile.extra_coords.is_empty() || tile.extra_coords[0] as usize >= 3 {
                return Err(format!("tile {} has invalid color annotation {:?}", tile_index, tile.extra_coords));
            }
        }
        Ok(())
    }

    /// render the patch into an SVG file, with `other` patches as side-by-side overlay panels
    pub fn write_svg(&self, path: &Path, other: &[Patch]) -> io::Result<()> {
        super::visualize::write_patch_svg(path, self, other)
    }
}

/// an open pyramid-shaped patch: rows narrow as they go up, one plaquette at the apex;
/// boundary plaquettes are clipped to the rectangle and degenerate ones are dropped
pub fn make_planar_pyramid_code_layout(width: Coord, height: Coord) -> StabilizerCode {
    assert!(width >= 1 && height >= 1, "layout dimensions must be positive");
    let mut tiles = Vec::new();
    for y in 0..height {
        let color = (y % 3) as f64;
        for x in 0..width {
            if (x + y) % 2 != 0 {
                continue;  // plaquette centers live on the even checkerboard
            }
            // pyramid silhouette: both sides slope inward at half a column per row
            if 2 * x < y || 2 * x > 2 * (width - 1) - y {
                continue;
            }
            let ordered_data_qubits: Vec<Position> = TILE_DATA_OFFSETS
                .iter()
                .map(|(dx, dy)| (x + dx, y + dy))
                .filter(|&(qx, qy)| qx >= 0 && qx < width && qy >= 0 && qy < height)
                .collect();
            if ordered_data_qubits.len() < 2 {
                continue;  // degenerate corner tile
            }
            for basis in ['X', 'Z'] {
                tiles.push(Tile::new(ordered_data_qubits.clone(), (x, y), basis, vec![color]));
            }
        }
    }
    StabilizerCode::new(Patch::new(tiles))
}

/// a fully periodic patch: plaquettes wrap around both directions, so every tile keeps
/// its full weight; requires an even width for the checkerboard to close in x and a
/// height that is a multiple of 3 for the row coloring to close in y
pub fn make_toric_pyramid_code_layout(width: Coord, height: Coord) -> StabilizerCode {
    assert!(width >= 2 && height >= 3, "toric layout too small");
    assert!(width % 2 == 0, "toric layout width must be even for the plaquette checkerboard to wrap");
    assert!(height % 3 == 0, "toric layout height must be a multiple of 3 for the row coloring to wrap");
    let mut tiles = Vec::new();
    for y in 0..height {
        let color = (y % 3) as f64;
        for x in 0..width {
            if (x + y) % 2 != 0 {
                continue;
            }
            let mut ordered_data_qubits: Vec<Position> = Vec::new();
            for (dx, dy) in TILE_DATA_OFFSETS.iter() {
                let position = ((x + dx).rem_euclid(width), (y + dy).rem_euclid(height));
                if !ordered_data_qubits.contains(&position) {
                    ordered_data_qubits.push(position);  // tiny patches can wrap onto themselves
                }
            }
            for basis in ['X', 'Z'] {
                tiles.push(Tile::new(ordered_data_qubits.clone(), (x, y), basis, vec![color]));
            }
        }
    }
    StabilizerCode::new(Patch::new(tiles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn layout_planar_pyramid_sanity() {  // cargo test layout_planar_pyramid_sanity -- --nocapture
        let code = make_planar_pyramid_code_layout(5, 5);
        code.patch.sanity_check().unwrap();
        // every plaquette carries an X tile and a Z tile over the same data qubits
        let x_tiles = code.patch.with_only_x_tiles();
        let z_tiles = code.patch.with_only_z_tiles();
        assert_eq!(x_tiles.tiles.len(), z_tiles.tiles.len());
        assert_eq!(x_tiles.tiles.len() + z_tiles.tiles.len(), code.patch.tiles.len());
        for (x_tile, z_tile) in x_tiles.tiles.iter().zip(z_tiles.tiles.iter()) {
            assert_eq!(x_tile.measurement_qubit, z_tile.measurement_qubit);
            assert_eq!(x_tile.ordered_data_qubits, z_tile.ordered_data_qubits);
            assert_eq!(x_tile.extra_coords, z_tile.extra_coords);
        }
    }

    #[test]
    fn layout_planar_pyramid_all_classes_present() {  // cargo test layout_planar_pyramid_all_classes_present -- --nocapture
        // diameter 3 planar layout (5x5) already exercises all 3 colors and both bases
        let code = make_planar_pyramid_code_layout(5, 5);
        let mut classes = BTreeSet::new();
        for tile in code.patch.tiles.iter() {
            classes.insert((tile.color().index(), tile.basis));
        }
        assert_eq!(classes.len(), 6);
    }

    #[test]
    fn layout_planar_pyramid_narrows_upward() {  // cargo test layout_planar_pyramid_narrows_upward -- --nocapture
        let code = make_planar_pyramid_code_layout(7, 7);
        let row_count = |y: Coord| {
            code.patch
                .with_only_x_tiles()
                .tiles
                .iter()
                .filter(|tile| tile.measurement_qubit.1 == y)
                .count()
        };
        assert!(row_count(0) > row_count(4), "pyramid base must be wider than its upper rows");
    }

    #[test]
    fn layout_toric_tiles_keep_full_weight() {  // cargo test layout_toric_tiles_keep_full_weight -- --nocapture
        let code = make_toric_pyramid_code_layout(8, 6);
        code.patch.sanity_check().unwrap();
        for tile in code.patch.tiles.iter() {
            assert_eq!(tile.ordered_data_qubits.len(), 4);
        }
        // 8x6 checkerboard has 24 plaquettes, each with two bases
        assert_eq!(code.patch.tiles.len(), 48);
    }

    #[test]
    #[should_panic]
    fn layout_toric_rejects_bad_height() {  // cargo test layout_toric_rejects_bad_height -- --nocapture
        make_toric_pyramid_code_layout(8, 7);
    }
}
