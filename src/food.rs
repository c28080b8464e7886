use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws attempted before falling back to a free-cell scan.
const SPAWN_RETRY_LIMIT: usize = 64;

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a uniformly chosen unoccupied cell.
    ///
    /// Returns `None` when the snake covers the whole grid.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::at)
    }
}

/// Picks a free cell not occupied by the snake.
///
/// First draws random cells for a bounded number of retries; on a mostly
/// empty board the first draw almost always lands. When every retry hits the
/// snake, falls back to collecting the free cells and choosing among them,
/// which terminates for any grid size and snake length. `None` only when no
/// free cell exists at all.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    for _ in 0..SPAWN_RETRY_LIMIT {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let mut candidates = Vec::new();
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
