use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::engine::Snapshot;

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    /// Best score reached this session; never persisted.
    pub session_best: u32,
}

/// Renders the single-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    theme: &Theme,
    info: &HudInfo,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(hud_line(snapshot, info, usize::from(hud_area.width), theme))
            .alignment(Alignment::Right),
        hud_area,
    );

    play_area
}

/// Builds `Length … | Score … | Best …` padded to the row width.
fn hud_line<'a>(
    snapshot: &Snapshot,
    info: &HudInfo,
    row_width: usize,
    theme: &'a Theme,
) -> Line<'a> {
    let label_style = Style::new().fg(theme.hud_text);
    let value_style = Style::new().fg(theme.hud_accent);

    let mut spans = vec![
        Span::styled("Length ", label_style),
        Span::styled(snapshot.cells.len().to_string(), value_style),
        Span::styled("  |  Score ", label_style),
        Span::styled(snapshot.score.to_string(), value_style),
        Span::styled("  |  Best ", label_style),
        Span::styled(info.session_best.to_string(), value_style),
        Span::styled(" ", label_style),
    ];

    // Left-pad so the row reads as a solid right-aligned band regardless of
    // how wide the values have grown.
    let content_width: usize = spans.iter().map(|span| span.content.width()).sum();
    if content_width < row_width {
        spans.insert(
            0,
            Span::styled(" ".repeat(row_width - content_width), label_style),
        );
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use crate::config::{EngineConfig, THEME_CLASSIC};
    use crate::engine::{Engine, Phase, Snapshot};

    use super::{hud_line, HudInfo};

    fn sample_snapshot() -> Snapshot {
        Engine::new_with_seed(EngineConfig::default(), 1).snapshot()
    }

    #[test]
    fn hud_line_contains_all_three_values() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.phase, Phase::Idle);

        let line = hud_line(
            &snapshot,
            &HudInfo { session_best: 120 },
            80,
            &THEME_CLASSIC,
        );
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(text.contains("Length 2"));
        assert!(text.contains("Score 0"));
        assert!(text.contains("Best 120"));
    }

    #[test]
    fn hud_line_pads_to_requested_width() {
        let snapshot = sample_snapshot();
        let line = hud_line(&snapshot, &HudInfo { session_best: 0 }, 60, &THEME_CLASSIC);

        let width: usize = line
            .spans
            .iter()
            .map(|s| unicode_width::UnicodeWidthStr::width(s.content.as_ref()))
            .sum();
        assert_eq!(width, 60);
    }
}
