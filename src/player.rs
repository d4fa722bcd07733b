// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::types::Team;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    team: Team,
    points: u32,
}

impl Player {
    pub fn new<S: Into<String>>(name: S, team: Team) -> Player {
        Player {
            name: name.into(),
            team,
            points: 0,
        }
    }

    pub fn with_points(mut self, points: u32) -> Player {
        self.points = points;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> Team {
        self.team
    }

    /// Sum of the point values of every piece this player has captured.
    pub fn points(&self) -> u32 {
        self.points
    }

    pub(crate) fn award(&mut self, points: u32) {
        self.points += points;
    }

    pub(crate) fn revoke(&mut self, points: u32) {
        assert!(
            self.points >= points,
            "revoking more points than {} was ever awarded",
            self.name
        );
        self.points -= points;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.team)
    }
}
