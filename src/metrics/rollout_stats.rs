//! Episode statistics for agent rollouts
//!
//! Keeps rolling windows of episode reward, length and cherries eaten, plus
//! lifetime counters for how episodes ended.

use std::collections::VecDeque;

/// How an episode stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEnd {
    /// Wall or body collision
    Died,
    /// No free cell left for a cherry
    Completed,
    /// Cut off by the rollout's step limit
    TimedOut,
}

/// Rollout statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use grid_snake::metrics::{EpisodeEnd, RolloutStats};
///
/// let mut stats = RolloutStats::new(100);
/// stats.record_episode(15.5, 150, 5, EpisodeEnd::Died);
///
/// assert_eq!(stats.total_episodes(), 1);
/// assert_eq!(stats.best_score(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct RolloutStats {
    episode_rewards: VecDeque<f32>,
    episode_lengths: VecDeque<usize>,
    episode_scores: VecDeque<u32>,
    total_episodes: usize,
    total_steps: usize,
    deaths: usize,
    completions: usize,
    timeouts: usize,
    best_score: u32,
    window_size: usize,
}

impl RolloutStats {
    /// Create a tracker averaging over the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            deaths: 0,
            completions: 0,
            timeouts: 0,
            best_score: 0,
            window_size,
        }
    }

    /// Record the end of an episode
    pub fn record_episode(&mut self, reward: f32, length: usize, score: u32, end: EpisodeEnd) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        self.best_score = self.best_score.max(score);

        match end {
            EpisodeEnd::Died => self.deaths += 1,
            EpisodeEnd::Completed => self.completions += 1,
            EpisodeEnd::TimedOut => self.timeouts += 1,
        }
    }

    /// Mean episode reward over the window, 0.0 when empty
    pub fn mean_episode_reward(&self) -> f32 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f32>() / self.episode_rewards.len() as f32
        }
    }

    pub fn mean_episode_length(&self) -> f32 {
        let sum: usize = self.episode_lengths.iter().sum();
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_lengths.len() as f32
        }
    }

    /// Mean cherries eaten per episode over the window
    pub fn mean_episode_score(&self) -> f32 {
        let sum: u32 = self.episode_scores.iter().sum();
        if self.episode_scores.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_scores.len() as f32
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn deaths(&self) -> usize {
        self.deaths
    }

    pub fn completions(&self) -> usize {
        self.completions
    }

    pub fn timeouts(&self) -> usize {
        self.timeouts
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Score: {:.2} | Len: {:.1} | Best: {} | Died/Completed/Timed out: {}/{}/{}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.mean_episode_length(),
            self.best_score,
            self.deaths,
            self.completions,
            self.timeouts,
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
