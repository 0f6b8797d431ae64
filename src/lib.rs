extern crate cfg_if;
extern crate chrono;
extern crate serde;
#[macro_use] extern crate serde_json;

pub mod util;
pub mod flow;
pub mod circuit;
pub mod layout;
pub mod stabilizer_code;
pub mod visualize;
pub mod constructions;

use circuit::Circuit;
use util::*;

/// look up a construction by name and generate its circuit
/// (to amortize the registry build across calls, obtain it once via
/// [`constructions::make_named_pyramid_code_constructions`] and keep it around)
pub fn generate_named_circuit(name: &str, params: &Params) -> Circuit {
    let constructions = constructions::make_named_pyramid_code_constructions();
    match constructions.get(name) {
        Some(construction) => construction.generate(params),
        None => panic!(
            "unknown construction `{}`, available constructions: {:?}",
            name,
            constructions.keys().collect::<Vec<_>>()
        ),
    }
}
