use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameGrid};
use crate::metrics::GameMetrics;

/// Per-episode numbers drawn in the header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub steps: u32,
    pub total_reward: f32,
    pub game_over: bool,
}

/// Draws an observation grid; knows nothing about the engine
pub struct Renderer {
    /// Observation value to cell kind, taken from the grid legend
    key: [(&'static str, u8); 4],
}

impl Renderer {
    pub fn new(key: [(&'static str, u8); 4]) -> Self {
        Self { key }
    }

    pub fn render(&self, frame: &mut Frame, grid: &GameGrid, hud: &Hud, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(hud, metrics), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if hud.game_over {
            frame.render_widget(self.render_game_over(hud), game_area);
        } else {
            frame.render_widget(self.render_grid(grid), game_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Look a code up in the legend; unknown codes draw as empty
    fn cell_for(&self, code: u8) -> Cell {
        let name = self
            .key
            .iter()
            .find(|(_, value)| *value == code)
            .map(|(name, _)| *name);

        Cell::ALL
            .into_iter()
            .find(|cell| Some(cell.name()) == name)
            .unwrap_or(Cell::Empty)
    }

    fn span_for(&self, code: u8) -> Span<'static> {
        match self.cell_for(code) {
            Cell::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            Cell::Cherry => Span::styled(
                "● ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    fn render_grid(&self, grid: &GameGrid) -> Paragraph<'static> {
        let lines: Vec<Line> = grid
            .to_observation()
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|code| self.span_for(code))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, hud: &Hud, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(hud.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Reward: ", label),
            Span::styled(format!("{:.2}", hud.total_reward), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(hud.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, hud: &Hud) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    hud.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled("Total Reward: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{:.2}", hud.total_reward),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(GameGrid::legend())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_lookup() {
        let renderer = Renderer::default();
        assert_eq!(renderer.cell_for(0), Cell::Empty);
        assert_eq!(renderer.cell_for(1), Cell::Body);
        assert_eq!(renderer.cell_for(2), Cell::Head);
        assert_eq!(renderer.cell_for(3), Cell::Cherry);
        assert_eq!(renderer.cell_for(9), Cell::Empty);
    }

    #[test]
    fn test_custom_key() {
        // A host that swaps the codes for head and cherry
        let renderer = Renderer::new([
            ("NOTHING", 0),
            ("SNAKE_BODY", 1),
            ("SNAKE_HEAD", 3),
            ("CHERRY", 2),
        ]);
        assert_eq!(renderer.cell_for(3), Cell::Head);
        assert_eq!(renderer.cell_for(2), Cell::Cherry);
    }

    #[test]
    fn test_render_draws_grid_cells() {
        use crate::game::{GameConfig, SnakeEngine};
        use ratatui::{Terminal, backend::TestBackend};

        let mut engine = SnakeEngine::from_config(GameConfig::new(4, 5).with_seed(2)).unwrap();
        engine.reset();
        let hud = Hud {
            score: 0,
            steps: 0,
            total_reward: 0.0,
            game_over: false,
        };

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                Renderer::default().render(frame, engine.grid(), &hud, &GameMetrics::new())
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert_eq!(screen.matches('●').count(), 1);
        assert_eq!(screen.matches('□').count(), 1);
        assert_eq!(screen.matches('■').count(), 1);
    }
}
