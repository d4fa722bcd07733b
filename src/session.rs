// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented front end for a game. Each input line is one command;
//! every command answers with the notifications or the error it produced,
//! one per line.
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::engine::{Engine, Notifications};
use crate::error::TurnError;
use crate::save;
use crate::space::Tiles;
use crate::types::{PieceId, SpaceId};

const HELP: &str = "\
commands:
  board              show the board
  select <piece>     select or deselect a piece, by name or by the space it stands on
  move <space>       move the selected piece
  moves              list the legal moves of the selected piece
  undo               take back the last move
  players            show players and points
  save [path]        save the game
  quit               leave the game";

pub struct Session {
    engine: Engine,
    save_path: PathBuf,
    autosave: bool,
}

impl Session {
    pub fn new(engine: Engine, config: &Config) -> Session {
        Session {
            engine,
            save_path: config.save_path.clone(),
            autosave: config.autosave,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn run<R, W>(mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(&mut writer, "{}", self.engine.board())?;
        writeln!(&mut writer, "{}'s turn", self.engine.current_player().name())?;
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            debug!("command: {}", line);
            let components: Vec<_> = line.split_whitespace().collect();
            match components.split_first().unwrap_or((&"", &[])) {
                (&"", []) => {}
                (&"board", []) => writeln!(&mut writer, "{}", self.engine.board())?,
                (&"select", [target]) => self.handle_select(&mut writer, target)?,
                (&"move", [target]) => self.handle_move(&mut writer, target)?,
                (&"moves", []) => self.handle_moves(&mut writer)?,
                (&"undo", []) => {
                    let result = self.engine.undo();
                    report(&mut writer, result)?;
                }
                (&"players", []) => self.handle_players(&mut writer)?,
                (&"save", []) => {
                    let path = self.save_path.clone();
                    self.handle_save(&mut writer, &path)?;
                }
                (&"save", [path]) => self.handle_save(&mut writer, Path::new(path))?,
                (&"help", []) => writeln!(&mut writer, "{}", HELP)?,
                (&"quit", []) => break,
                _ => writeln!(&mut writer, "unrecognized command")?,
            }
        }

        if self.autosave {
            let path = self.save_path.clone();
            self.handle_save(&mut writer, &path)?;
        }

        Ok(())
    }

    fn handle_select<W: Write>(&mut self, w: &mut W, target: &str) -> io::Result<()> {
        let id = match self.resolve_piece(target) {
            Some(id) => id,
            None => return writeln!(w, "there is no such piece"),
        };

        let result = self.engine.select_piece(id);
        let selected = result.is_ok() && self.engine.board().selected() == Some(id);
        report(w, result)?;
        if selected {
            let tiles = self.engine.tiles();
            let names: Vec<_> = self
                .engine
                .highlighted()
                .iter()
                .map(|&space| tiles.name(space))
                .collect();
            writeln!(w, "highlighted: {}", names.join(" "))?;
        }

        Ok(())
    }

    fn handle_move<W: Write>(&mut self, w: &mut W, target: &str) -> io::Result<()> {
        let to = match parse_space(self.engine.tiles(), target) {
            Some(to) => to,
            None => return writeln!(w, "there is no such space"),
        };

        let result = self.engine.attempt_move(to);
        let moved = result.is_ok();
        report(w, result)?;
        if moved {
            writeln!(w, "{}", self.engine.board())?;
        }

        Ok(())
    }

    fn handle_moves<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        let id = match self.engine.board().selected() {
            Some(id) => id,
            None => return writeln!(w, "no piece selected"),
        };

        let moves = self.engine.legal_moves_of(id);
        let tiles = self.engine.tiles();
        let names: Vec<_> = moves.iter().map(|&space| tiles.name(space)).collect();
        if names.is_empty() {
            writeln!(w, "no legal moves")
        } else {
            writeln!(w, "{}", names.join(" "))
        }
    }

    fn handle_players<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        for player in self.engine.players() {
            writeln!(w, "{}: {} points", player, player.points())?;
        }

        if let Some(winner) = self.engine.winner() {
            writeln!(w, "winner: {}", winner)?;
        }

        Ok(())
    }

    fn handle_save<W: Write>(&mut self, w: &mut W, path: &Path) -> io::Result<()> {
        match save::save_to(self.engine.board(), path) {
            Ok(()) => writeln!(w, "saved to {}", path.display()),
            Err(err) => {
                error!("failed to save {}: {}", path.display(), err);
                writeln!(w, "{}", err)
            }
        }
    }

    /// A piece by name, or the occupant of a space given by name or index.
    fn resolve_piece(&self, target: &str) -> Option<PieceId> {
        let board = self.engine.board();
        board.find_piece(target).or_else(|| {
            parse_space(board.tiles(), target).and_then(|space| board.tiles().occupant(space))
        })
    }
}

fn parse_space(tiles: &Tiles, target: &str) -> Option<SpaceId> {
    tiles.parse_name(target)
}

fn report<W: Write>(w: &mut W, result: Result<Notifications, TurnError>) -> io::Result<()> {
    match result {
        Ok(notes) => {
            for note in notes {
                writeln!(w, "{}", note)?;
            }

            Ok(())
        }
        Err(err) => writeln!(w, "{}", err),
    }
}
