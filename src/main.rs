extern crate clap;

use pyramid_color_code::constructions::*;
use pyramid_color_code::util::*;
use pyramid_color_code::visualize::auto_patch_svg_filename;
use std::path::PathBuf;

fn create_clap_parser<'a>(color_choice: clap::ColorChoice) -> clap::Command<'a> {
    clap::Command::new("Pyramid Color Code")
        .version(env!("CARGO_PKG_VERSION"))
        .author(clap::crate_authors!(", "))
        .about("Parameterized pyramid color code circuit constructions for quantum error correction")
        .color(color_choice)
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(clap::Command::new("list").about("list the available construction names"))
        .subcommand(
            clap::Command::new("generate")
                .about("generate the circuit of a named construction and print it as JSON")
                .arg(clap::Arg::new("name").help("construction name, e.g. phenom_pyramid_code").required(true))
                .arg(
                    clap::Arg::new("diameter")
                        .long("diameter")
                        .short('d')
                        .help("code diameter")
                        .takes_value(true)
                        .default_value("3"),
                )
                .arg(
                    clap::Arg::new("rounds")
                        .long("rounds")
                        .short('r')
                        .help("syndrome extraction rounds (must be 1 for transit constructions)")
                        .takes_value(true)
                        .default_value("1"),
                )
                .arg(
                    clap::Arg::new("noise")
                        .long("noise")
                        .short('p')
                        .help("idle depolarization probability")
                        .takes_value(true)
                        .default_value("0.001"),
                )
                .arg(
                    clap::Arg::new("debug_out_dir")
                        .long("debug-out-dir")
                        .help("write debug patch visualizations into this directory")
                        .takes_value(true),
                ),
        )
        .subcommand(
            clap::Command::new("svg")
                .about("render the patch of a named construction into an SVG file")
                .arg(clap::Arg::new("name").help("construction name, e.g. phenom_pyramid_code").required(true))
                .arg(
                    clap::Arg::new("diameter")
                        .long("diameter")
                        .short('d')
                        .takes_value(true)
                        .default_value("3"),
                )
                .arg(
                    clap::Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("output filename, defaults to a timestamped name")
                        .takes_value(true),
                ),
        )
}

fn lookup_construction(name: &str) -> Construction {
    let constructions = make_named_pyramid_code_constructions();
    match constructions.get(name) {
        Some(construction) => *construction,
        None => panic!(
            "unknown construction `{}`, run `list` to see the available names",
            name
        ),
    }
}

fn parse_usize(matches: &clap::ArgMatches, name: &str) -> usize {
    matches
        .value_of(name)
        .unwrap()
        .parse()
        .unwrap_or_else(|_| panic!("{} must be a non-negative integer", name))
}

pub fn main() {
    let matches = create_clap_parser(clap::ColorChoice::Auto).get_matches();

    match matches.subcommand() {
        Some(("list", _)) => {
            for name in make_named_pyramid_code_constructions().keys() {
                println!("{}", name);
            }
        }
        Some(("generate", matches)) => {
            let name = matches.value_of("name").unwrap();
            let construction = lookup_construction(name);
            let noise: f64 = matches
                .value_of("noise")
                .unwrap()
                .parse()
                .unwrap_or_else(|_| panic!("noise must be a probability"));
            let mut params = Params::new(parse_usize(matches, "diameter"), parse_usize(matches, "rounds"), noise);
            if let Some(debug_out_dir) = matches.value_of("debug_out_dir") {
                params = params.with_debug_out_dir(PathBuf::from(debug_out_dir));
            }
            let circuit = construction.generate(&params);
            println!("{}", circuit.to_json());
        }
        Some(("svg", matches)) => {
            let name = matches.value_of("name").unwrap();
            let construction = lookup_construction(name);
            let code = construction.topology.make_layout(parse_usize(matches, "diameter"));
            let filename = match matches.value_of("output") {
                Some(output) => output.to_string(),
                None => auto_patch_svg_filename(),
            };
            code.patch
                .write_svg(
                    filename.as_ref(),
                    &[code.patch.with_only_x_tiles(), code.patch.with_only_z_tiles()],
                )
                .unwrap_or_else(|error| panic!("cannot write {}: {}", filename, error));
            println!("written {}", filename);
        }
        _ => unreachable!(),
    }
}
