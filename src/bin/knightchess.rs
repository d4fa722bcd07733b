// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io;
use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use knightchess::config::{Config, CONFIG_FILE};
use knightchess::history::write_history;
use knightchess::setup;
use knightchess::{perft, save, Board, Engine, GameMode, Session, Team};

fn main() {
    env_logger::init();
    let mode_arg = || {
        Arg::with_name("mode")
            .help("Game mode")
            .value_name("MODE")
            .short("-m")
            .long("--mode")
            .possible_values(&["standard", "knights"])
            .takes_value(true)
    };
    let tiles_arg = || {
        Arg::with_name("tiles")
            .help("Number of tiles on the board, a perfect square")
            .value_name("TILES")
            .short("-t")
            .long("--tiles")
            .takes_value(true)
    };

    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a hot-seat game on this terminal")
                .arg(mode_arg())
                .arg(tiles_arg())
                .arg(
                    Arg::with_name("load")
                        .help("Resume the game saved in this file")
                        .value_name("FILE")
                        .short("-l")
                        .long("--load")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("save")
                        .help("File the game is saved to")
                        .value_name("FILE")
                        .short("-s")
                        .long("--save")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("no-autosave")
                        .help("Do not save the game on exit")
                        .long("--no-autosave"),
                ),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("Count move tree leaves from a position")
                .arg(
                    Arg::with_name("DEPTH")
                        .help("Depth of move tree to search")
                        .required(true)
                        .index(1),
                )
                .arg(mode_arg())
                .arg(tiles_arg())
                .arg(
                    Arg::with_name("diagram")
                        .help("Placement diagram of the position, rows separated by '/'")
                        .value_name("DIAGRAM")
                        .short("-d")
                        .long("--diagram")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("black")
                        .help("Black moves first in the diagram position")
                        .short("-b")
                        .long("--black"),
                ),
        )
        .subcommand(
            SubCommand::with_name("history")
                .about("Print the moves of a saved game as CSV")
                .arg(
                    Arg::with_name("SAVE")
                        .help("Saved game")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let config = Config::load_or_default(CONFIG_FILE);
    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(config, matches),
        ("history", Some(matches)) => run_history(matches),
        ("play", Some(matches)) => run_play(config, matches),
        _ => run_play(config, &ArgMatches::default()),
    }
}

fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if matches.is_present("mode") {
        config.mode = value_t_or_exit!(matches, "mode", GameMode);
        if !matches.is_present("tiles") {
            config.tiles = config.mode.default_tiles();
        }
    }

    if matches.is_present("tiles") {
        config.tiles = value_t_or_exit!(matches, "tiles", usize);
    }
}

fn new_board(config: &Config) -> Board {
    match config.new_board() {
        Ok(board) => board,
        Err(err) => {
            println!("cannot start a {} game: {}", config.mode, err);
            process::exit(1);
        }
    }
}

fn run_play(mut config: Config, matches: &ArgMatches) -> ! {
    apply_overrides(&mut config, matches);
    if let Some(path) = matches.value_of("save") {
        config.save_path = path.into();
    }

    if matches.is_present("no-autosave") {
        config.autosave = false;
    }

    let board = match matches.value_of("load") {
        Some(path) => match save::load_from(path) {
            Ok(board) => board,
            Err(err) => {
                println!("cannot load {}: {}", path, err);
                process::exit(1);
            }
        },
        None => new_board(&config),
    };

    let session = Session::new(Engine::new(board), &config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    match session.run(stdin.lock(), stdout.lock()) {
        Ok(()) => process::exit(0),
        Err(err) => {
            println!("i/o error: {}", err);
            process::exit(1);
        }
    }
}

fn run_perft(mut config: Config, matches: &ArgMatches) -> ! {
    apply_overrides(&mut config, matches);
    let depth = value_t_or_exit!(matches, "DEPTH", u32);
    let board = match matches.value_of("diagram") {
        Some(diagram) => {
            let to_move = if matches.is_present("black") {
                Team::Black
            } else {
                Team::White
            };

            match setup::from_diagram(diagram, to_move) {
                Ok(board) => board,
                Err(err) => {
                    println!("invalid diagram: {}", err);
                    process::exit(1);
                }
            }
        }
        None => new_board(&config),
    };

    println!("depth: {}", depth);
    println!();
    println!("{}", board);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&board, i);
        let duration = start.elapsed();
        let nanos = duration.subsec_nanos() as u64;
        let ms = (1000 * 1000 * 1000 * duration.as_secs() + nanos) / (1000 * 1000);
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_history(matches: &ArgMatches) -> ! {
    let path = matches.value_of("SAVE").unwrap();
    let board = match save::load_from(path) {
        Ok(board) => board,
        Err(err) => {
            println!("cannot load {}: {}", path, err);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    if let Err(err) = write_history(&board, stdout.lock()) {
        println!("cannot write history: {}", err);
        process::exit(1);
    }

    process::exit(0);
}
