// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::board::Board;
use crate::error::BuildError;
use crate::setup::{self, GameMode, PLAYER_1, PLAYER_2};

/// Name of the optional configuration file read from the working directory.
pub const CONFIG_FILE: &str = "knightchess.json";

/// Game settings. Every field is optional in the configuration file; missing fields take
/// their default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: GameMode,
    pub tiles: usize,
    /// Names of the white and black players, in turn order.
    pub players: [String; 2],
    pub save_path: PathBuf,
    pub autosave: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            mode: GameMode::Standard,
            tiles: GameMode::Standard.default_tiles(),
            players: [PLAYER_1.to_owned(), PLAYER_2.to_owned()],
            save_path: PathBuf::from("save.cfg"),
            autosave: true,
        }
    }
}

impl Config {
    pub fn from_reader<R: Read>(reader: R) -> Result<Config, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Reads the configuration file at `path`, falling back to the defaults if it is missing
    /// or unreadable.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Config {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(_) => return Config::default(),
        };

        match Config::from_reader(file) {
            Ok(config) => {
                info!("read configuration from {}", path.display());
                config
            }
            Err(err) => {
                warn!("ignoring {}: {}", path.display(), err);
                Config::default()
            }
        }
    }

    /// Starts a new game with these settings.
    pub fn new_board(&self) -> Result<Board, BuildError> {
        setup::new_game(
            self.mode,
            self.tiles,
            [self.players[0].as_str(), self.players[1].as_str()],
        )
    }
}
