// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate failure;
extern crate image;
extern crate seamaze;

use clap::{value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use seamaze::energy::{field_maximum, field_to_image, ENERGY_SCALE};
use seamaze::{
    Bias, CarveMode, Cell2D, Frontier, Maze, MazeConfig, Orientation, PixelGrid, SeamCarver,
    SeamFinder,
};
use std::collections::BTreeSet;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

fn load(path: &str) -> Result<PixelGrid, failure::Error> {
    let image = image::open(path)?.to_rgb();
    Ok(PixelGrid::from_image(&image)?)
}

fn carve(matches: &ArgMatches) -> Result<(), failure::Error> {
    let grid = load(matches.value_of("input").unwrap_or_default())?;
    let width = number_or(matches, "width", grid.width())?;
    let height = number_or(matches, "height", grid.height())?;
    let mut carver = SeamCarver::new(grid, CarveMode::Vertical, 0);
    carver.carve_to(width, height)?;
    let output = matches.value_of("output").unwrap_or_default();
    carver.grid().to_image().save(output)?;
    info!(width, height, output, "carved");
    Ok(())
}

fn energy(matches: &ArgMatches) -> Result<(), failure::Error> {
    let grid = load(matches.value_of("input").unwrap_or_default())?;
    let image = match matches.value_of("seams") {
        None => field_to_image(&seamaze::energy::energy_map(&grid), ENERGY_SCALE),
        Some(axis) => {
            let orientation = match axis {
                "horizontal" => Orientation::Horizontal,
                _ => Orientation::Vertical,
            };
            let field = grid.seam_costs(orientation).cost_field();
            field_to_image(&field, field_maximum(&field))
        }
    };
    let output = matches.value_of("output").unwrap_or_default();
    image.save(output)?;
    info!(output, "wrote energy map");
    Ok(())
}

/// An optional numeric flag, or `default` when it was not given.
fn number_or(matches: &ArgMatches, name: &str, default: u32) -> Result<u32, failure::Error> {
    if matches.is_present(name) {
        Ok(value_t!(matches, name, u32)?)
    } else {
        Ok(default)
    }
}

/// Draw the maze in ASCII, marking the cells of `path`.
fn render(maze: &Maze, path: &BTreeSet<Cell2D>) -> String {
    let mut out = String::new();
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            let above = y > 0 && maze.is_open(Cell2D::new(x, y - 1), Cell2D::new(x, y));
            out.push_str(if above { "+   " } else { "+---" });
        }
        out.push_str("+\n");
        for x in 0..maze.width() {
            let here = Cell2D::new(x, y);
            let left = x > 0 && maze.is_open(Cell2D::new(x - 1, y), here);
            out.push(if left { ' ' } else { '|' });
            out.push_str(if here == maze.start() {
                " S "
            } else if here == maze.goal() {
                " G "
            } else if path.contains(&here) {
                " * "
            } else {
                "   "
            });
        }
        out.push_str("|\n");
    }
    for _ in 0..maze.width() {
        out.push_str("+---");
    }
    out.push_str("+\n");
    out
}

fn maze(matches: &ArgMatches) -> Result<(), failure::Error> {
    let defaults = MazeConfig::default();
    let bias = match matches.value_of("bias") {
        Some("horizontal") => Bias::Horizontal,
        Some("vertical") => Bias::Vertical,
        _ => Bias::Normal,
    };
    let config = MazeConfig {
        width: number_or(matches, "width", defaults.width)?,
        height: number_or(matches, "height", defaults.height)?,
        bias,
        seed: if matches.is_present("seed") {
            value_t!(matches, "seed", u64)?
        } else {
            defaults.seed
        },
    };
    let frontier = match matches.value_of("search") {
        Some("dfs") => Frontier::Stack,
        _ => Frontier::Queue,
    };
    let maze = Maze::generate(config)?;
    let found = maze.search(frontier)?;
    let path: BTreeSet<Cell2D> = found.path.iter().cloned().collect();
    print!("{}", render(&maze, &path));
    println!(
        "path length: {}, cells visited: {}",
        found.path.len(),
        found.visited.len()
    );
    Ok(())
}

fn main() -> Result<(), failure::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let size = |name: &'static str, help: &'static str| {
        Arg::with_name(name)
            .long(name)
            .takes_value(true)
            .help(help)
    };

    let matches = App::new("seamaze")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Seam carving and spanning-tree mazes")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("carve")
                .about("Shrink an image by removing low-energy seams")
                .arg(Arg::with_name("input").required(true).index(1))
                .arg(Arg::with_name("output").required(true).index(2))
                .arg(size("width", "Target width in pixels"))
                .arg(size("height", "Target height in pixels")),
        )
        .subcommand(
            SubCommand::with_name("energy")
                .about("Render the energy map, or the seam costs, of an image")
                .arg(Arg::with_name("input").required(true).index(1))
                .arg(Arg::with_name("output").required(true).index(2))
                .arg(
                    Arg::with_name("seams")
                        .long("seams")
                        .takes_value(true)
                        .possible_values(&["vertical", "horizontal"])
                        .help("Render cumulative seam costs along this axis"),
                ),
        )
        .subcommand(
            SubCommand::with_name("maze")
                .about("Generate and solve a random maze")
                .arg(size("width", "Maze width in cells"))
                .arg(size("height", "Maze height in cells"))
                .arg(
                    Arg::with_name("bias")
                        .long("bias")
                        .takes_value(true)
                        .possible_values(&["normal", "horizontal", "vertical"]),
                )
                .arg(size("seed", "Seed for the random weights"))
                .arg(
                    Arg::with_name("search")
                        .long("search")
                        .takes_value(true)
                        .possible_values(&["bfs", "dfs"]),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("carve", Some(sub)) => carve(sub),
        ("energy", Some(sub)) => energy(sub),
        ("maze", Some(sub)) => maze(sub),
        _ => Ok(()),
    }
}
