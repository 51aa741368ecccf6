//! Axis-aligned collision detection and response.

pub mod camera;

use common::Entity;

pub use camera::Camera;

/// Something the player can bump into.
pub trait Collidable {
    fn body(&self) -> &Entity;

    /// Called after the mover has been pushed out of this object.
    fn on_collided(&mut self) {}
}

impl Collidable for Entity {
    fn body(&self) -> &Entity {
        self
    }
}

/// Returns `true` when the two boxes overlap. Touching edges do not count.
pub fn is_colliding(a: &Entity, b: &Entity) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Pushes `mover` out of `obstacle` along the axis of least overlap,
/// leaving exactly `clearance` units between them, and stops it.
///
/// Ties go to the vertical axis.
pub fn resolve(mover: &mut Entity, obstacle: &Entity, clearance: i32) {
    let overlap_x = (mover.x + mover.w - obstacle.x).min(obstacle.x + obstacle.w - mover.x);
    let overlap_y = (mover.y + mover.h - obstacle.y).min(obstacle.y + obstacle.h - mover.y);

    if overlap_x < overlap_y {
        if mover.x < obstacle.x {
            mover.x = obstacle.x - (mover.w + clearance);
        } else {
            mover.x = obstacle.x + obstacle.w + clearance;
        }
    } else if mover.y < obstacle.y {
        mover.y = obstacle.y - (mover.h + clearance);
    } else {
        mover.y = obstacle.y + obstacle.h + clearance;
    }
    // leftover velocity would push straight back in next tick
    mover.set_velocity(0, 0);
}

/// Resolves `mover` against one obstacle and fires its hook on contact.
pub fn collide<C: Collidable + ?Sized>(mover: &mut Entity, obstacle: &mut C, clearance: i32) -> bool {
    if !is_colliding(mover, obstacle.body()) {
        return false;
    }
    resolve(mover, obstacle.body(), clearance);
    obstacle.on_collided();
    true
}

/// Resolves `mover` against each obstacle in order.
///
/// Resolutions are applied one after another, so when several obstacles
/// overlap in the same tick the last one resolved decides where the mover
/// ends up. Returns the number of contacts.
pub fn collide_all<C: Collidable>(mover: &mut Entity, obstacles: &mut [C], clearance: i32) -> usize {
    let mut hits = 0;
    for obstacle in obstacles.iter_mut() {
        if collide(mover, obstacle, clearance) {
            hits += 1;
        }
    }
    if hits > 1 {
        tracing::trace!(hits, "multiple contacts resolved sequentially");
    }
    hits
}
