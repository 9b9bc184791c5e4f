use std::time::Instant;

use chrono::Utc;

use crate::generator::Lesson;
use crate::session::input::KeyInput;
use crate::session::result::{LiveStats, SessionResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Ready,
    Active,
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub enum KeyOutcome {
    Ignored,
    Typed { correct: bool },
    Erased,
    Completed(SessionResult),
}

/// Per-level typing run: buffer, counters and timing.
///
/// Counters only ever grow. Backspace shortens the buffer but keeps the
/// correct/error tallies, so fixing a typo still counts the typo.
#[derive(Clone, Debug)]
pub struct TypingSession {
    level: u32,
    target: Vec<char>,
    typed: Vec<char>,
    correct: usize,
    errors: usize,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    phase: SessionPhase,
    live: LiveStats,
}

impl Default for TypingSession {
    fn default() -> Self {
        Self {
            level: 0,
            target: Vec::new(),
            typed: Vec::new(),
            correct: 0,
            errors: 0,
            started_at: None,
            finished_at: None,
            phase: SessionPhase::Idle,
            live: LiveStats::default(),
        }
    }
}

impl TypingSession {
    pub fn new(lesson: &Lesson) -> Self {
        let mut session = Self::default();
        session.start(lesson);
        session
    }

    /// Load a lesson, discarding whatever was in progress.
    pub fn start(&mut self, lesson: &Lesson) {
        *self = Self {
            level: lesson.level,
            target: lesson.text.chars().collect(),
            phase: SessionPhase::Ready,
            ..Self::default()
        };
    }

    pub fn on_key_at(&mut self, key: KeyInput, now: Instant) -> KeyOutcome {
        if !matches!(self.phase, SessionPhase::Ready | SessionPhase::Active) {
            return KeyOutcome::Ignored;
        }

        let outcome = match key {
            KeyInput::Backspace => {
                if self.typed.pop().is_some() {
                    KeyOutcome::Erased
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyInput::Char(' ') if self.typed.len() >= self.target.len() => KeyOutcome::Ignored,
            KeyInput::Char(ch) => {
                if self.phase == SessionPhase::Ready {
                    self.phase = SessionPhase::Active;
                    self.started_at = Some(now);
                }
                let correct = self.target.get(self.typed.len()) == Some(&ch);
                if correct {
                    self.correct += 1;
                } else {
                    self.errors += 1;
                }
                self.typed.push(ch);
                KeyOutcome::Typed { correct }
            }
            KeyInput::Other => KeyOutcome::Ignored,
        };

        if outcome == KeyOutcome::Ignored {
            return outcome;
        }

        self.live = self.stats_at(now);

        if self.phase == SessionPhase::Active && self.typed.len() >= self.target.len() {
            self.finished_at = Some(now);
            self.phase = SessionPhase::Finished;
            self.live = self.stats_at(now);
            return KeyOutcome::Completed(self.result());
        }

        outcome
    }

    /// Periodic refresh while the clock runs.
    pub fn tick(&mut self, now: Instant) {
        if self.phase == SessionPhase::Active {
            self.live = self.stats_at(now);
        }
    }

    pub fn stats_at(&self, now: Instant) -> LiveStats {
        LiveStats::compute(self.correct, self.typed.len(), self.elapsed_secs_at(now))
    }

    pub fn elapsed_secs_at(&self, now: Instant) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start).as_secs_f64(),
            (Some(start), None) => now.saturating_duration_since(start).as_secs_f64(),
            _ => 0.0,
        }
    }

    fn result(&self) -> SessionResult {
        SessionResult {
            level: self.level,
            wpm: self.live.wpm,
            accuracy: self.live.accuracy,
            correct: self.correct,
            errors: self.errors,
            typed_len: self.typed.len(),
            elapsed_secs: self.live.elapsed_secs,
            finished_at: Utc::now(),
        }
    }

    pub fn live(&self) -> LiveStats {
        self.live
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn progress(&self) -> f64 {
        if self.target.is_empty() {
            return 0.0;
        }
        (self.typed.len() as f64 / self.target.len() as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn lesson(text: &str) -> Lesson {
        Lesson {
            level: 1,
            instructions: String::new(),
            text: text.to_string(),
            target_wpm: 1,
        }
    }

    fn type_str(session: &mut TypingSession, text: &str, t0: Instant) -> Vec<KeyOutcome> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| {
                session.on_key_at(KeyInput::Char(ch), t0 + Duration::from_millis(200 * i as u64))
            })
            .collect()
    }

    #[test]
    fn new_session_is_ready_and_not_timing() {
        let session = TypingSession::new(&lesson("abc"));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.live().accuracy, 100);
        assert_eq!(session.live().wpm, 0);
        assert_eq!(session.elapsed_secs_at(Instant::now()), 0.0);
    }

    #[test]
    fn idle_session_ignores_keys() {
        let mut session = TypingSession::default();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.on_key_at(KeyInput::Char('a'), Instant::now()), KeyOutcome::Ignored);
        assert!(session.typed().is_empty());
    }

    #[test]
    fn first_char_starts_the_clock() {
        let mut session = TypingSession::new(&lesson("abc"));
        let t0 = Instant::now();
        session.on_key_at(KeyInput::Other, t0);
        assert_eq!(session.phase(), SessionPhase::Ready);
        session.on_key_at(KeyInput::Char('a'), t0);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!((session.elapsed_secs_at(t0 + Duration::from_secs(2)) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn counters_track_buffer_without_backspace() {
        let mut session = TypingSession::new(&lesson("hello world"));
        let t0 = Instant::now();
        for (i, ch) in "hxllo w".chars().enumerate() {
            session.on_key_at(KeyInput::Char(ch), t0 + Duration::from_millis(i as u64 * 100));
            assert_eq!(
                session.correct_count() + session.error_count(),
                session.typed().len()
            );
        }
        assert_eq!(session.error_count(), 1);
        assert_eq!(session.correct_count(), 6);
    }

    #[test]
    fn backspace_keeps_counters() {
        let mut session = TypingSession::new(&lesson("abc"));
        let t0 = Instant::now();
        session.on_key_at(KeyInput::Char('x'), t0);
        assert_eq!(session.on_key_at(KeyInput::Backspace, t0), KeyOutcome::Erased);
        assert!(session.typed().is_empty());
        assert_eq!(session.error_count(), 1);
        session.on_key_at(KeyInput::Char('a'), t0);
        assert_eq!(session.error_count(), 1);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.live().accuracy, 100);
    }

    #[test]
    fn backspace_on_empty_buffer_is_ignored() {
        let mut session = TypingSession::new(&lesson("abc"));
        assert_eq!(session.on_key_at(KeyInput::Backspace, Instant::now()), KeyOutcome::Ignored);
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn accuracy_stays_in_range_after_corrections() {
        let mut session = TypingSession::new(&lesson("abcd"));
        let t0 = Instant::now();
        for _ in 0..5 {
            session.on_key_at(KeyInput::Char('a'), t0);
            session.on_key_at(KeyInput::Backspace, t0);
        }
        session.on_key_at(KeyInput::Char('a'), t0);
        assert!(session.live().accuracy <= 100);
    }

    #[test]
    fn completion_fires_once() {
        let mut session = TypingSession::new(&lesson("ab"));
        let t0 = Instant::now();
        let outcomes = type_str(&mut session, "ab", t0);
        assert!(matches!(outcomes[0], KeyOutcome::Typed { correct: true }));
        let KeyOutcome::Completed(result) = &outcomes[1] else {
            panic!("expected completion, got {:?}", outcomes[1]);
        };
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.errors, 0);
        assert_eq!(session.phase(), SessionPhase::Finished);

        assert_eq!(session.on_key_at(KeyInput::Char('c'), Instant::now()), KeyOutcome::Ignored);
        assert_eq!(session.on_key_at(KeyInput::Backspace, Instant::now()), KeyOutcome::Ignored);
    }

    #[test]
    fn wrong_chars_still_fill_the_buffer_and_finish() {
        let mut session = TypingSession::new(&lesson("ab"));
        let t0 = Instant::now();
        let outcomes = type_str(&mut session, "xy", t0);
        let KeyOutcome::Completed(result) = &outcomes[1] else {
            panic!("expected completion");
        };
        assert_eq!(result.accuracy, 0);
        assert_eq!(result.wpm, 0);
        assert_eq!(result.errors, 2);
    }

    #[test]
    fn final_wpm_uses_frozen_elapsed_time() {
        // 10 correct chars, last one at 1.8s -> (10/5)/1.8*60 = 66.67 -> 67
        let mut session = TypingSession::new(&lesson("abcdefghij"));
        let t0 = Instant::now();
        let outcomes = type_str(&mut session, "abcdefghij", t0);
        let Some(KeyOutcome::Completed(result)) = outcomes.last() else {
            panic!("expected completion");
        };
        assert_eq!(result.wpm, 67);
        assert!((result.elapsed_secs - 1.8).abs() < 1e-9);

        session.tick(t0 + Duration::from_secs(30));
        assert_eq!(session.live().wpm, 67);
    }

    #[test]
    fn tick_refreshes_live_stats_while_active() {
        let mut session = TypingSession::new(&lesson("abcdefghij"));
        let t0 = Instant::now();
        type_str(&mut session, "abcde", t0);
        session.tick(t0 + Duration::from_secs(60));
        // 5 chars in 60s = 1 word
        assert_eq!(session.live().wpm, 1);
        assert!((session.live().elapsed_secs - 60.0).abs() < 1e-9);
    }

    #[test]
    fn restart_discards_progress() {
        let mut session = TypingSession::new(&lesson("abc"));
        session.on_key_at(KeyInput::Char('a'), Instant::now());
        session.start(&lesson("xyz"));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.typed().is_empty());
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.target(), &['x', 'y', 'z']);
    }

    #[test]
    fn progress_reports_fraction_typed() {
        let mut session = TypingSession::new(&lesson("abcd"));
        assert_eq!(session.progress(), 0.0);
        session.on_key_at(KeyInput::Char('a'), Instant::now());
        assert!((session.progress() - 0.25).abs() < f64::EPSILON);
    }
}
