use std::time::{Duration, Instant};

/// Session-level numbers shown by the human mode
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub best_reward: Option<f32>,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            best_reward: None,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32, total_reward: f32) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
        self.best_reward = Some(match self.best_reward {
            Some(best) => best.max(total_reward),
            None => total_reward,
        });
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10, -3.0);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.best_reward, Some(-3.0));
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5, -8.0);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.best_reward, Some(-3.0));

        metrics.on_game_over(15, 20.0);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.best_reward, Some(20.0));
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(90);

        metrics.on_game_start();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
