//! Static level geometry: tiles and doors
//!
//! The level collaborator supplies these once per room. Tiles are immutable
//! for the room's duration; a door's open flag is the one sanctioned
//! mutation, performed by the sim when the room clears.

use serde::{Deserialize, Serialize};

use super::collision::Collidable;
use super::rect::Rect;

/// A static level rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub rect: Rect,
    /// Whether the tile participates in collision
    pub solid: bool,
}

impl Tile {
    pub fn new(rect: Rect) -> Self {
        Self { rect, solid: true }
    }

    /// Decorative tile that entities pass through
    pub fn passable(rect: Rect) -> Self {
        Self { rect, solid: false }
    }
}

impl Collidable for Tile {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

/// A doorway tile; only closed doors block movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub id: u32,
    pub rect: Rect,
    pub open: bool,
}

impl Door {
    pub fn closed(id: u32, rect: Rect) -> Self {
        Self {
            id,
            rect,
            open: false,
        }
    }

    #[inline]
    pub fn blocks(&self) -> bool {
        !self.open
    }
}

impl Collidable for Door {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

/// Obstacle rects for the resolution pass: solid tiles plus closed doors
pub fn solid_rects<'a>(tiles: &'a [Tile], doors: &'a [Door]) -> impl Iterator<Item = Rect> + 'a {
    tiles
        .iter()
        .filter(|t| t.solid)
        .map(|t| t.rect)
        .chain(doors.iter().filter(|d| d.blocks()).map(|d| d.rect))
}
