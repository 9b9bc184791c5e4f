use chrono::{DateTime, Utc};

/// Characters per word in the WPM convention.
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveStats {
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_secs: f64,
}

impl Default for LiveStats {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            elapsed_secs: 0.0,
        }
    }
}

impl LiveStats {
    pub fn compute(correct: usize, typed_len: usize, elapsed_secs: f64) -> Self {
        Self {
            wpm: compute_wpm(correct, elapsed_secs),
            accuracy: compute_accuracy(correct, typed_len),
            elapsed_secs,
        }
    }
}

pub fn compute_wpm(correct: usize, elapsed_secs: f64) -> u32 {
    if elapsed_secs <= 0.0 {
        return 0;
    }
    ((correct as f64 / CHARS_PER_WORD) / elapsed_secs * 60.0)
        .round()
        .max(0.0) as u32
}

/// Clamped to 100: counters never go down on backspace, so `correct` can outgrow the buffer.
pub fn compute_accuracy(correct: usize, typed_len: usize) -> u32 {
    if typed_len == 0 {
        return 100;
    }
    (correct as f64 / typed_len as f64 * 100.0)
        .round()
        .clamp(0.0, 100.0) as u32
}

/// Final numbers of a finished typing session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionResult {
    pub level: u32,
    pub wpm: u32,
    pub accuracy: u32,
    pub correct: usize,
    pub errors: usize,
    pub typed_len: usize,
    pub elapsed_secs: f64,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wpm_is_zero_without_elapsed_time() {
        assert_eq!(compute_wpm(50, 0.0), 0);
        assert_eq!(compute_wpm(50, -1.0), 0);
    }

    #[test]
    fn wpm_uses_five_chars_per_word() {
        // 50 correct chars = 10 words in 30s = 20 wpm
        assert_eq!(compute_wpm(50, 30.0), 20);
        // 7 chars in 60s = 1.4 words -> 1
        assert_eq!(compute_wpm(7, 60.0), 1);
        // 8 chars in 60s = 1.6 words -> 2
        assert_eq!(compute_wpm(8, 60.0), 2);
    }

    #[test]
    fn accuracy_defaults_to_100_and_rounds() {
        assert_eq!(compute_accuracy(0, 0), 100);
        assert_eq!(compute_accuracy(2, 3), 67);
        assert_eq!(compute_accuracy(0, 4), 0);
    }

    #[test]
    fn accuracy_never_exceeds_100() {
        assert_eq!(compute_accuracy(5, 2), 100);
    }
}
