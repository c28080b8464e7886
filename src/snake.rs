use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighboring cell one step along `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Snake body plus the current and pending movement directions.
///
/// `current` is the direction the snake actually moved along last tick;
/// `pending` is the latest validated input, applied at the start of the next
/// advance. Input between ticks only ever touches `pending`, so a tick always
/// moves along exactly one direction.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    current: Direction,
    pending: Direction,
}

impl Snake {
    /// Creates a two-segment snake with its head at `head`, the second
    /// segment trailing one cell opposite `direction`.
    #[must_use]
    pub fn new(head: Position, direction: Direction) -> Self {
        let mut body = VecDeque::with_capacity(2);
        body.push_front(head.stepped(direction.opposite()));
        body.push_front(head);

        Self {
            body,
            current: direction,
            pending: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        Self {
            body: VecDeque::from(segments),
            current: direction,
            pending: direction,
        }
    }

    /// Records a requested direction change.
    ///
    /// A request that reverses the *current* direction is dropped, so the
    /// head can never fold back onto the neck in a single tick. Repeated
    /// requests between two ticks overwrite each other; the latest valid one
    /// wins.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.current, direction) {
            self.pending = direction;
        }
    }

    /// Returns the cell the head will occupy on the next advance.
    #[must_use]
    pub fn next_head(&self) -> Position {
        self.head().stepped(self.pending)
    }

    /// Commits the pending direction and moves one cell.
    ///
    /// With `grow` the previous tail is kept and the snake gains a segment;
    /// otherwise length is unchanged. Collision checks are the caller's job
    /// and must happen against [`Self::next_head`] *before* advancing.
    pub fn advance(&mut self, grow: bool) {
        self.current = self.pending;
        let next = self.head().stepped(self.current);

        self.body.push_front(next);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body always holds at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction the snake last moved along.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.current
    }

    /// Returns the buffered direction for the next advance.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn new_snake_has_two_adjacent_segments() {
        let snake = Snake::new(Position { x: 10, y: 10 }, Direction::Right);

        let segments: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![Position { x: 10, y: 10 }, Position { x: 9, y: 10 }]
        );
    }

    #[test]
    fn advance_moves_head_one_cell_on_a_single_axis() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.advance(false);

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn advance_with_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.advance(true);

        assert_eq!(snake.len(), 3);
        assert!(snake.occupies(Position { x: 4, y: 5 }));
    }

    #[test]
    fn pending_direction_rejects_reversal_of_current() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Direction::Right);

        snake.set_pending_direction(Direction::Up);
        assert_eq!(snake.pending_direction(), Direction::Up);
    }

    #[test]
    fn latest_valid_pending_direction_wins() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Down);
        snake.advance(false);

        assert_eq!(snake.head(), Position { x: 5, y: 6 });
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn reversal_check_uses_current_not_pending() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        // Down is queued. Left reverses *current* (Right) and must still be
        // dropped even though it does not reverse the queued direction.
        snake.set_pending_direction(Direction::Down);
        snake.set_pending_direction(Direction::Left);

        assert_eq!(snake.pending_direction(), Direction::Down);
    }

    #[test]
    fn next_head_matches_advance_result() {
        let mut snake = Snake::new(Position { x: 3, y: 3 }, Direction::Up);
        snake.set_pending_direction(Direction::Left);

        let predicted = snake.next_head();
        snake.advance(false);

        assert_eq!(snake.head(), predicted);
        assert_eq!(predicted, Position { x: 2, y: 3 });
    }

    #[test]
    fn bounds_check_covers_all_four_walls() {
        let bounds = GridSize {
            width: 20,
            height: 20,
        };

        assert!(Position { x: 0, y: 0 }.is_within_bounds(bounds));
        assert!(Position { x: 19, y: 19 }.is_within_bounds(bounds));
        assert!(!Position { x: -1, y: 5 }.is_within_bounds(bounds));
        assert!(!Position { x: 5, y: -1 }.is_within_bounds(bounds));
        assert!(!Position { x: 20, y: 5 }.is_within_bounds(bounds));
        assert!(!Position { x: 5, y: 20 }.is_within_bounds(bounds));
    }
}
