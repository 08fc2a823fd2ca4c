use anyhow::{Context, Result};
use clap::ValueEnum;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::{Deserialize, Serialize};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Direction, EpisodeStatus, GameConfig, GameGrid, SnakeEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};

/// Game tick cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    Medium,
    #[default]
    Fast,
}

impl Speed {
    pub fn tick_interval(self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(100),
            Speed::Medium => Duration::from_millis(75),
            Speed::Fast => Duration::from_millis(50),
        }
    }
}

pub struct HumanMode {
    engine: SnakeEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    speed: Speed,
    should_quit: bool,
    /// Resubmitted every tick until another key is pressed
    next_action: Direction,
}

impl HumanMode {
    pub fn new(config: GameConfig, speed: Speed) -> Result<Self> {
        let mut engine = SnakeEngine::from_config(config).context("Invalid game configuration")?;
        engine.reset();

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(GameGrid::legend()),
            input_handler: InputHandler::new(),
            speed,
            should_quit: false,
            next_action: Direction::East,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.speed.tick_interval());
        // ~30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game()?;
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.grid(), &hud, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn hud(&self) -> Hud {
        Hud {
            score: self.engine.score(),
            steps: self.engine.steps(),
            total_reward: self.engine.total_reward(),
            game_over: self.engine.status() == EpisodeStatus::Terminated,
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => self.next_action = direction,
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) -> Result<()> {
        if self.engine.status() == EpisodeStatus::Terminated {
            return Ok(());
        }

        let result = self
            .engine
            .step(self.next_action)
            .context("Engine rejected a step")?;

        if result.done {
            self.metrics
                .on_game_over(result.info.score, result.info.total_reward);
        }

        Ok(())
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        self.metrics.on_game_start();
        self.next_action = self.engine.snake().heading();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::small().with_seed(4), Speed::Fast).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.engine.status(), EpisodeStatus::Active);
        assert_eq!(mode.engine.score(), 0);
        assert!(!mode.hud().game_over);
    }

    #[test]
    fn test_ticks_resubmit_last_direction() {
        let mut mode = mode();
        mode.next_action = Direction::South;

        mode.update_game().unwrap();
        mode.update_game().unwrap();

        assert_eq!(mode.engine.snake().heading(), Direction::South);
        assert_eq!(mode.engine.steps(), 2);
    }

    #[test]
    fn test_game_over_and_reset() {
        let mut mode = mode();
        mode.next_action = Direction::North;

        for _ in 0..10 {
            mode.update_game().unwrap();
        }
        assert!(mode.hud().game_over);
        assert_eq!(mode.metrics.games_played, 1);

        // Ticks after game over are ignored
        let steps = mode.engine.steps();
        mode.update_game().unwrap();
        assert_eq!(mode.engine.steps(), steps);

        mode.reset_game();
        assert!(!mode.hud().game_over);
        assert_eq!(mode.engine.steps(), 0);
        assert_eq!(mode.next_action, Direction::East);
    }

    #[test]
    fn test_speed_intervals() {
        assert_eq!(Speed::Slow.tick_interval(), Duration::from_millis(100));
        assert_eq!(Speed::Medium.tick_interval(), Duration::from_millis(75));
        assert_eq!(Speed::default(), Speed::Fast);
    }
}
