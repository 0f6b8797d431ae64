//! Patch Visualizer
//!
//! This module renders patches into SVG files to help debug layout generation. Each tile
//! is drawn as a polygon over its data qubits, filled by measurement basis, with a small
//! marker at the measurement qubit painted by the tile's color class. Extra patches are
//! rendered as side-by-side panels of the same picture.
//!

use super::layout::{Patch, Tile};
use super::util::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const PITCH: f64 = 24.;
const MARGIN: f64 = 1.5;

fn basis_fill(basis: char) -> &'static str {
    match basis {
        'X' => "#FF8080",
        'Y' => "#80FF80",
        'Z' => "#8080FF",
        _ => "#C0C0C0",
    }
}

fn color_marker(color_index: usize) -> &'static str {
    match color_index {
        0 => "#D00000",
        1 => "#00A000",
        _ => "#0000D0",
    }
}

fn bounding_box(patch: &Patch) -> (Coord, Coord, Coord, Coord) {
    let mut min_x = Coord::MAX;
    let mut min_y = Coord::MAX;
    let mut max_x = Coord::MIN;
    let mut max_y = Coord::MIN;
    for tile in patch.tiles.iter() {
        for position in tile.ordered_data_qubits.iter().chain([&tile.measurement_qubit]) {
            min_x = min_x.min(position.0);
            min_y = min_y.min(position.1);
            max_x = max_x.max(position.0);
            max_y = max_y.max(position.1);
        }
    }
    if min_x > max_x {
        (0, 0, 0, 0)
    } else {
        (min_x, min_y, max_x, max_y)
    }
}

fn render_tile(svg: &mut String, tile: &Tile, offset_x: f64, offset_y: f64) {
    let project =
        |position: &Position| ((position.0 as f64 + offset_x) * PITCH, (position.1 as f64 + offset_y) * PITCH);
    if tile.ordered_data_qubits.len() >= 3 {
        let points: Vec<String> = tile
            .ordered_data_qubits
            .iter()
            .map(|position| {
                let (x, y) = project(position);
                format!("{:.1},{:.1}", x, y)
            })
            .collect();
        svg.push_str(&format!(
            "<polygon points=\"{}\" fill=\"{}\" fill-opacity=\"0.4\" stroke=\"black\" stroke-width=\"1\"/>\n",
            points.join(" "),
            basis_fill(tile.basis)
        ));
    } else {
        // boundary tiles clipped below 3 data qubits degenerate to a segment
        let (x1, y1) = project(&tile.ordered_data_qubits[0]);
        let (x2, y2) = project(tile.ordered_data_qubits.last().unwrap());
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"3\"/>\n",
            x1,
            y1,
            x2,
            y2,
            basis_fill(tile.basis)
        ));
    }
    for position in tile.ordered_data_qubits.iter() {
        let (x, y) = project(position);
        svg.push_str(&format!(
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"2.5\" fill=\"black\"/>\n",
            x, y
        ));
    }
    let (mx, my) = project(&tile.measurement_qubit);
    let color_index = if tile.extra_coords.is_empty() {
        usize::MAX
    } else {
        tile.extra_coords[0] as usize
    };
    svg.push_str(&format!(
        "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"4\" fill=\"{}\"/>\n",
        mx,
        my,
        color_marker(color_index)
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"8\" text-anchor=\"middle\" dy=\"-6\">{}</text>\n",
        mx, my, tile.basis
    ));
}

/// write the main patch plus the other patches as horizontal panels into a single SVG file
pub fn write_patch_svg(path: &Path, main: &Patch, other: &[Patch]) -> std::io::Result<()> {
    if cfg!(feature = "disable_visualizer") {
        return Ok(());
    }
    let mut svg = String::new();
    let mut offset_x = MARGIN;
    let mut total_height: f64 = 0.;
    for patch in std::iter::once(main).chain(other.iter()) {
        let (min_x, min_y, max_x, max_y) = bounding_box(patch);
        let panel_offset_x = offset_x - min_x as f64;
        let panel_offset_y = MARGIN - min_y as f64;
        for tile in patch.tiles.iter() {
            render_tile(&mut svg, tile, panel_offset_x, panel_offset_y);
        }
        offset_x += (max_x - min_x) as f64 + 2. * MARGIN;
        total_height = total_height.max((max_y - min_y) as f64 + 2. * MARGIN);
    }
    let width = offset_x * PITCH;
    let height = total_height * PITCH;
    let mut file = File::create(path)?;
    file.write_all(
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\">\n",
            width, height
        )
        .as_bytes(),
    )?;
    file.write_all(svg.as_bytes())?;
    file.write_all(b"</svg>\n")?;
    file.sync_all()?;
    Ok(())
}

/// timestamped filename for ad-hoc SVG dumps from the command line
pub fn auto_patch_svg_filename() -> String {
    format!("{}.svg", chrono::Local::now().format("%Y%m%d-%H-%M-%S%.3f"))
}

#[cfg(test)]
mod tests {
    use super::super::layout::*;
    use super::*;

    #[test]
    fn visualize_write_patch_svg() {  // cargo test visualize_write_patch_svg -- --nocapture
        let code = make_planar_pyramid_code_layout(5, 5);
        let path = std::env::temp_dir().join("pyramid_color_code_visualize_write_patch_svg.svg");
        code.patch
            .write_svg(&path, &[code.patch.with_only_x_tiles(), code.patch.with_only_z_tiles()])
            .unwrap();
        if cfg!(not(feature = "disable_visualizer")) {
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.starts_with("<svg"));
            assert!(content.ends_with("</svg>\n"));
            assert!(content.contains("<polygon"));
            std::fs::remove_file(&path).unwrap();
        }
    }
}
