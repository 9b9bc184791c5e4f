use rand::SeedableRng;
use rand::rngs::SmallRng;
use regex::Regex;

use thundertype::generator::challenge::{ChallengeKind, generate_set};
use thundertype::generator::lesson::{LessonGenerator, MAX_LEVEL, target_wpm, visible_levels};

#[test]
fn every_level_produces_typeable_text() {
    let mut generator = LessonGenerator::new(SmallRng::seed_from_u64(42));
    let printable = Regex::new(r"^[\x20-\x7e]+$").unwrap();

    for level in 1..=MAX_LEVEL {
        let lesson = generator.generate(level);
        assert_eq!(lesson.level, level);
        assert_eq!(lesson.target_wpm, target_wpm(level));
        assert!(!lesson.instructions.is_empty(), "level {level} has no instructions");
        assert!(
            printable.is_match(&lesson.text),
            "level {level} text is not plain ascii: {:?}",
            lesson.text
        );
        assert_eq!(lesson.text.trim(), lesson.text, "level {level} has edge whitespace");
    }
}

#[test]
fn early_levels_stay_on_the_home_row() {
    let mut generator = LessonGenerator::new(SmallRng::seed_from_u64(7));
    let home_row = Regex::new(r"^[asdfjkl; ]+$").unwrap();
    for level in 1..=9 {
        let lesson = generator.generate(level);
        assert!(
            home_row.is_match(&lesson.text),
            "level {level} leaves the home row: {:?}",
            lesson.text
        );
    }
}

#[test]
fn word_levels_are_space_separated_words() {
    let mut generator = LessonGenerator::new(SmallRng::seed_from_u64(11));
    let words = Regex::new(r"^[a-z]+( [a-z]+)*$").unwrap();
    for level in [20, 35, 49, 50, 75, 99] {
        let lesson = generator.generate(level);
        assert!(words.is_match(&lesson.text), "level {level}: {:?}", lesson.text);
    }
}

#[test]
fn level_titles_follow_one_format() {
    let title = Regex::new(r"^Level (\d+) - Target WPM: (\d+)$").unwrap();
    for level in visible_levels(MAX_LEVEL, 0) {
        let text = level.title();
        let caps = title.captures(&text).unwrap();
        assert_eq!(caps[1].parse::<u32>().unwrap(), level.id);
        assert_eq!(caps[2].parse::<u32>().unwrap(), level.target_wpm);
    }
}

#[test]
fn challenge_questions_are_well_formed() {
    let math = Regex::new(r"^\d+ \+ \d+ = \?$").unwrap();
    let sequence = Regex::new(r"^Put these in order: ").unwrap();
    let word = Regex::new(r"^Type the word: [A-Z]( [A-Z])*$").unwrap();

    let mut rng = SmallRng::seed_from_u64(5);
    for _ in 0..50 {
        for challenge in generate_set(&mut rng) {
            let re = match challenge.kind {
                ChallengeKind::Math => &math,
                ChallengeKind::Sequence => &sequence,
                ChallengeKind::Word => &word,
            };
            assert!(re.is_match(&challenge.question), "{:?}", challenge.question);
        }
    }
}
