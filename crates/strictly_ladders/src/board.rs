//! Board layout: tile numbering and grid coordinates.
//!
//! Tiles run 1..=100 in boustrophedon order: left to right on the bottom
//! row, right to left on the next, and so on. Position 0 means a player
//! has not entered the board yet.

use crate::obstacles::SpecialTile;
use crate::state::GameState;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// First playable tile.
pub const FIRST_TILE: u8 = 1;

/// Winning tile. Must be reached exactly.
pub const FINISH_TILE: u8 = 100;

/// Tiles per row and rows per board.
pub const BOARD_SIDE: u8 = 10;

/// Display coordinate of a tile; row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    /// Row from the top (0..10).
    pub row: u8,
    /// Column from the left (0..10).
    pub col: u8,
}

/// Maps a tile number to its grid coordinate.
///
/// Returns `None` for tiles outside 1..=100.
#[instrument]
pub fn tile_coordinate(tile: u8) -> Option<GridCoord> {
    if !(FIRST_TILE..=FINISH_TILE).contains(&tile) {
        return None;
    }
    let offset = tile - 1;
    let row = offset / BOARD_SIDE;
    let col = if row % 2 == 0 {
        offset % BOARD_SIDE
    } else {
        BOARD_SIDE - 1 - offset % BOARD_SIDE
    };
    Some(GridCoord {
        row: BOARD_SIDE - 1 - row,
        col,
    })
}

/// One rendered tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTile {
    /// Tile number.
    pub number: u8,
    /// Where to draw it.
    pub coord: GridCoord,
    /// Obstacles triggered here.
    pub special: SpecialTile,
    /// Players standing on the tile.
    pub players: Vec<PlayerId>,
}

/// Builds all 100 tiles of the current board in ascending order.
#[instrument(skip(state))]
pub fn layout(state: &GameState) -> Vec<BoardTile> {
    (FIRST_TILE..=FINISH_TILE)
        .filter_map(|number| {
            let coord = tile_coordinate(number)?;
            Some(BoardTile {
                number,
                coord,
                special: state.obstacles().special_tile(number),
                players: state
                    .players()
                    .iter()
                    .filter(|p| *p.position() == number)
                    .map(|p| *p.id())
                    .collect(),
            })
        })
        .collect()
}
