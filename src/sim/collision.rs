//! Collision detection and positional correction
//!
//! The tile resolver is single-pass: it pushes an overlapping hitbox out
//! along the axis of least penetration. For the shallow edge penetrations
//! per-tick movement produces, one pass clears the pushed axis; an overlap
//! where one rect fully spans the other on that axis sheds one overlap
//! extent per call instead. The other axis is left to later frames,
//! matching how entities actually slide along walls.

use glam::Vec2;

use super::rect::Rect;

/// Anything exposing a collision hitbox derived from its current state.
///
/// The hitbox may be smaller than or offset from the visual bounds; it must
/// never be cached where it could drift from the owning position.
pub trait Collidable {
    fn hitbox(&self) -> Rect;
}

/// Strict hitbox overlap between two collidables
#[inline]
pub fn overlapping(a: &impl Collidable, b: &impl Collidable) -> bool {
    a.hitbox().overlaps(&b.hitbox())
}

/// Positional correction pushing `hitbox` out of `tile`.
///
/// Returns the delta to add to the owning position, or None when the rects
/// do not overlap. Axis choice: the thinner side of the overlap rect wins;
/// an exact tie alternates via the caller's persistent flag so equal
/// corrections cannot stutter between frames. Push direction is away from
/// the tile, decided by comparing the hitbox origin to the overlap origin.
///
/// The push length is the overlap extent on the chosen axis. That clears an
/// edge penetration in one call; when either rect fully spans the other on
/// that axis (deep containment, or a hitbox wider than the tile) the
/// correction walks the pair apart one extent per call.
pub fn tile_push_out(hitbox: Rect, tile: Rect, tie_flip: &mut bool) -> Option<Vec2> {
    let overlap = hitbox.intersection(&tile)?;

    let along_x = if overlap.size.x < overlap.size.y {
        true
    } else if overlap.size.x > overlap.size.y {
        false
    } else {
        *tie_flip = !*tie_flip;
        *tie_flip
    };

    let delta = if along_x {
        let push = if hitbox.pos.x < overlap.pos.x {
            -overlap.size.x
        } else {
            overlap.size.x
        };
        Vec2::new(push, 0.0)
    } else {
        let push = if hitbox.pos.y < overlap.pos.y {
            -overlap.size.y
        } else {
            overlap.size.y
        };
        Vec2::new(0.0, push)
    };

    Some(delta)
}
