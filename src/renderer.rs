use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    GridSize, Theme, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_SNAKE_TAIL,
};
use crate::engine::{Phase, Snapshot};
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from an immutable engine snapshot.
///
/// Pure with respect to game state: drawing commands only, no mutation.
pub fn render(
    frame: &mut Frame<'_>,
    snapshot: &Snapshot,
    grid: GridSize,
    theme: &Theme,
    hud_info: HudInfo,
) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, theme, &hud_info);

    let field = play_field_rect(play_area, grid);
    let block = Block::bordered().border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(field);
    frame.render_widget(block, field);

    render_food(frame, inner, snapshot, grid, theme);
    render_snake(frame, inner, snapshot, grid, theme);

    match snapshot.phase {
        Phase::Idle => render_start_menu(frame, play_area, hud_info.session_best, theme),
        Phase::Paused => render_pause_menu(frame, play_area, theme),
        Phase::GameOver => render_game_over_menu(
            frame,
            play_area,
            snapshot.score,
            hud_info.session_best,
            theme,
        ),
        Phase::Running => {}
    }
}

fn render_food(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &Snapshot,
    grid: GridSize,
    theme: &Theme,
) {
    let Some((x, y)) = logical_to_terminal(inner, grid, snapshot.food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &Snapshot,
    grid: GridSize,
    theme: &Theme,
) {
    let tail = snapshot.cells.last().copied();

    let buffer = frame.buffer_mut();
    for (index, segment) in snapshot.cells.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else if Some(*segment) == tail {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail));
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
        }
    }
}

/// Centers the bordered play field inside the available area.
fn play_field_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid.width.saturating_add(2).min(area.width);
    let height = grid.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::config::GridSize;
    use crate::snake::Position;

    use super::{logical_to_terminal, play_field_rect};

    #[test]
    fn play_field_is_centered_with_border_margin() {
        let area = Rect::new(0, 0, 80, 24);
        let grid = GridSize {
            width: 20,
            height: 20,
        };

        let field = play_field_rect(area, grid);

        assert_eq!(field.width, 22);
        assert_eq!(field.height, 22);
        assert_eq!(field.x, 29);
        assert_eq!(field.y, 1);
    }

    #[test]
    fn logical_cells_map_into_the_inner_rect() {
        let inner = Rect::new(10, 5, 20, 20);
        let grid = GridSize {
            width: 20,
            height: 20,
        };

        assert_eq!(
            logical_to_terminal(inner, grid, Position { x: 0, y: 0 }),
            Some((10, 5))
        );
        assert_eq!(
            logical_to_terminal(inner, grid, Position { x: 19, y: 19 }),
            Some((29, 24))
        );
        assert_eq!(
            logical_to_terminal(inner, grid, Position { x: 20, y: 0 }),
            None
        );
        assert_eq!(
            logical_to_terminal(inner, grid, Position { x: -1, y: 0 }),
            None
        );
    }
}
