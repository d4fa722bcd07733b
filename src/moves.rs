// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module defines the records kept on a board's move stack.
//!
//! A record names pieces by their arena index, so a stack read front to back
//! replays the whole game from its initial setup, and the top record is all
//! that is needed to undo the last move exactly.
use std::fmt;

use crate::types::{PieceId, SpaceId};

/// A move that was applied to a board. Records are immutable once made.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    piece: PieceId,
    captured: Option<PieceId>,
    from: SpaceId,
    to: SpaceId,
}

impl MoveRecord {
    pub fn new(piece: PieceId, captured: Option<PieceId>, from: SpaceId, to: SpaceId) -> MoveRecord {
        MoveRecord {
            piece,
            captured,
            from,
            to,
        }
    }

    /// The piece that moved.
    pub fn piece(self) -> PieceId {
        self.piece
    }

    /// The piece captured by this move, if any.
    pub fn captured(self) -> Option<PieceId> {
        self.captured
    }

    pub fn origin(self) -> SpaceId {
        self.from
    }

    pub fn destination(self) -> SpaceId {
        self.to
    }

    pub fn is_capture(self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}-{}", self.piece, self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, "x{}", captured)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MoveRecord;
    use crate::types::{PieceId, SpaceId};

    #[test]
    fn quiet_move() {
        let mov = MoveRecord::new(PieceId(3), None, SpaceId(62), SpaceId(45));
        assert_eq!(PieceId(3), mov.piece());
        assert_eq!(SpaceId(62), mov.origin());
        assert_eq!(SpaceId(45), mov.destination());
        assert!(!mov.is_capture());
        assert_eq!("#3 62-45", mov.to_string());
    }

    #[test]
    fn capture() {
        let mov = MoveRecord::new(PieceId(0), Some(PieceId(9)), SpaceId(56), SpaceId(8));
        assert!(mov.is_capture());
        assert_eq!(Some(PieceId(9)), mov.captured());
        assert_eq!("#0 56-8x#9", mov.to_string());
    }
}
