use rand::Rng;
use rand::seq::SliceRandom;

use crate::generator::words::{
    ADVANCED_SENTENCES, COMMON_WORDS, HOME_ROW, LONG_WORDS, PANGRAM, REACH_KEYS,
};

pub const MAX_LEVEL: u32 = 500;
pub const MAX_TARGET_WPM: u32 = 100;

/// WPM a run of `level` must reach to pass.
pub fn target_wpm(level: u32) -> u32 {
    (level / 5 + 1).min(MAX_TARGET_WPM)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonTier {
    Placement,
    HomeRow,
    ReachKeys,
    CommonWords,
    LongWords,
    Pangram,
    Advanced,
}

impl LessonTier {
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=3 => LessonTier::Placement,
            4..=9 => LessonTier::HomeRow,
            10..=19 => LessonTier::ReachKeys,
            20..=49 => LessonTier::CommonWords,
            50..=99 => LessonTier::LongWords,
            100..=199 => LessonTier::Pangram,
            _ => LessonTier::Advanced,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub level: u32,
    pub instructions: String,
    pub text: String,
    pub target_wpm: u32,
}

/// Static description of a level; the lesson text itself is drawn when the level starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelDescriptor {
    pub id: u32,
    pub target_wpm: u32,
    pub required_level: u32,
}

impl LevelDescriptor {
    pub fn new(id: u32) -> Self {
        let id = id.clamp(1, MAX_LEVEL);
        Self {
            id,
            target_wpm: target_wpm(id),
            required_level: id,
        }
    }

    pub fn is_unlocked(&self, profile_level: u32) -> bool {
        profile_level >= self.required_level
    }

    pub fn title(&self) -> String {
        format!("Level {} - Target WPM: {}", self.id, self.target_wpm)
    }
}

/// Levels up to `profile_level + window`, the ones worth listing.
pub fn visible_levels(profile_level: u32, window: u32) -> Vec<LevelDescriptor> {
    let last = profile_level.saturating_add(window).min(MAX_LEVEL);
    (1..=last).map(LevelDescriptor::new).collect()
}

pub struct LessonGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> LessonGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, level: u32) -> Lesson {
        let level = level.max(1);
        let (instructions, text) = match LessonTier::for_level(level) {
            LessonTier::Placement => placement_drill(level),
            LessonTier::HomeRow => {
                let keys = &HOME_ROW[..HOME_ROW.len().min(level as usize + 2)];
                let keys_list = keys.iter().map(|k| k.to_string()).collect::<Vec<_>>();
                (
                    format!("Practice home row keys: {}.", keys_list.join(", ")),
                    self.random_keys(keys, 20),
                )
            }
            LessonTier::ReachKeys => {
                let keys: Vec<char> = HOME_ROW.iter().chain(REACH_KEYS.iter()).copied().collect();
                (
                    "New keys: 'e', 'i', 'r', 'u'.".to_string(),
                    self.random_keys(&keys, 30),
                )
            }
            LessonTier::CommonWords => (
                "Practice common words.".to_string(),
                self.random_words(&COMMON_WORDS, 5),
            ),
            LessonTier::LongWords => (
                "Practice longer words.".to_string(),
                self.random_words(&LONG_WORDS, 7),
            ),
            LessonTier::Pangram => (
                "Focus on accuracy and special characters.".to_string(),
                self.pangram_excerpt(),
            ),
            LessonTier::Advanced => {
                let sentence = ADVANCED_SENTENCES
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(ADVANCED_SENTENCES[0]);
                (
                    "Advanced practice. Focus on flow and speed.".to_string(),
                    sentence.to_string(),
                )
            }
        };

        Lesson {
            level,
            instructions,
            text,
            target_wpm: target_wpm(level),
        }
    }

    fn random_keys(&mut self, keys: &[char], count: usize) -> String {
        (0..count)
            .map(|_| keys[self.rng.gen_range(0..keys.len())])
            .collect()
    }

    fn random_words(&mut self, pool: &[&str], count: usize) -> String {
        (0..count)
            .map(|_| pool[self.rng.gen_range(0..pool.len())])
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn pangram_excerpt(&mut self) -> String {
        let len = self.rng.gen_range(30..50).min(PANGRAM.len());
        let start = self.rng.gen_range(0..=PANGRAM.len() - len);
        // PANGRAM is ASCII, byte offsets are char offsets
        PANGRAM[start..start + len].trim().to_string()
    }
}

fn placement_drill(level: u32) -> (String, String) {
    match level {
        2 => (
            "Focus on 'f' and 'j'.".to_string(),
            "fff jjj fff jjj fj fj fj".to_string(),
        ),
        3 => (
            "Focus on 'd' and 'k'.".to_string(),
            "ddd kkk ddd kkk dk dk dk".to_string(),
        ),
        _ => (
            "Place your left index finger on 'f', middle on 'd', ring on 's', pinky on 'a'. \
             Place your right index finger on 'j', middle on 'k', ring on 'l', pinky on ';'. \
             Keep thumbs on the spacebar."
                .to_string(),
            "f d s a j k l ;".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn generator(seed: u64) -> LessonGenerator<SmallRng> {
        LessonGenerator::new(SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn target_wpm_formula_and_cap() {
        assert_eq!(target_wpm(1), 1);
        assert_eq!(target_wpm(4), 1);
        assert_eq!(target_wpm(5), 2);
        assert_eq!(target_wpm(10), 3);
        assert_eq!(target_wpm(495), 100);
        assert_eq!(target_wpm(500), 100);
    }

    #[test]
    fn target_wpm_is_monotonic() {
        let mut prev = 0;
        for level in 1..=MAX_LEVEL {
            let wpm = target_wpm(level);
            assert_eq!(wpm, (level / 5 + 1).min(100));
            assert!(wpm >= prev);
            prev = wpm;
        }
    }

    #[test]
    fn fixed_placement_levels() {
        let mut g = generator(1);
        assert_eq!(g.generate(1).text, "f d s a j k l ;");
        assert_eq!(g.generate(2).text, "fff jjj fff jjj fj fj fj");
        assert_eq!(g.generate(3).text, "ddd kkk ddd kkk dk dk dk");
    }

    #[test]
    fn level_zero_is_treated_as_one() {
        let lesson = generator(3).generate(0);
        assert_eq!(lesson.level, 1);
        assert_eq!(lesson.text, "f d s a j k l ;");
    }

    #[test]
    fn home_row_tier_widens_key_set() {
        let mut g = generator(7);
        for level in 4..=9u32 {
            let lesson = g.generate(level);
            let allowed = &HOME_ROW[..HOME_ROW.len().min(level as usize + 2)];
            assert_eq!(lesson.text.chars().count(), 20);
            assert!(lesson.text.chars().all(|c| allowed.contains(&c)), "{}", lesson.text);
        }
    }

    #[test]
    fn reach_tier_uses_new_keys_alphabet() {
        let lesson = generator(11).generate(15);
        assert_eq!(lesson.text.chars().count(), 30);
        assert!(
            lesson
                .text
                .chars()
                .all(|c| HOME_ROW.contains(&c) || REACH_KEYS.contains(&c))
        );
    }

    #[test]
    fn word_tiers_draw_from_their_pools() {
        let mut g = generator(5);
        let common = g.generate(20);
        let words: Vec<&str> = common.text.split(' ').collect();
        assert_eq!(words.len(), 5);
        assert!(words.iter().all(|w| COMMON_WORDS.contains(w)));

        let long = g.generate(99);
        let words: Vec<&str> = long.text.split(' ').collect();
        assert_eq!(words.len(), 7);
        assert!(words.iter().all(|w| LONG_WORDS.contains(w)));
    }

    #[test]
    fn pangram_tier_is_a_bounded_excerpt() {
        for seed in 0..200 {
            let lesson = generator(seed).generate(150);
            assert!(PANGRAM.contains(&lesson.text));
            assert!(!lesson.text.is_empty());
            assert!(lesson.text.len() <= 49);
            assert!(lesson.text.len() >= 28, "{:?}", lesson.text);
        }
    }

    #[test]
    fn advanced_tier_picks_a_known_sentence() {
        let mut g = generator(9);
        for level in [200, 350, 500] {
            let lesson = g.generate(level);
            assert!(ADVANCED_SENTENCES.contains(&lesson.text.as_str()));
        }
    }

    #[test]
    fn every_level_yields_text() {
        let mut g = generator(42);
        for level in 1..=MAX_LEVEL {
            let lesson = g.generate(level);
            assert!(!lesson.text.is_empty(), "level {level}");
            assert_eq!(lesson.target_wpm, target_wpm(level));
        }
    }

    #[test]
    fn visible_levels_respects_window_and_cap() {
        let levels = visible_levels(1, 10);
        assert_eq!(levels.len(), 11);
        assert!(levels[0].is_unlocked(1));
        assert!(!levels[1].is_unlocked(1));

        let levels = visible_levels(495, 10);
        assert_eq!(levels.last().map(|l| l.id), Some(MAX_LEVEL));
    }

    #[test]
    fn descriptor_title() {
        assert_eq!(LevelDescriptor::new(12).title(), "Level 12 - Target WPM: 3");
    }
}
