use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use thundertype::generator::LessonGenerator;
use thundertype::generator::lesson::visible_levels;
use thundertype::session::input::KeyInput;
use thundertype::session::typing::TypingSession;

fn bench_keystrokes(c: &mut Criterion) {
    let mut generator = LessonGenerator::new(SmallRng::seed_from_u64(1));
    let lesson = generator.generate(250);
    let keys: Vec<KeyInput> = lesson
        .text
        .chars()
        .enumerate()
        // every 9th key is a typo
        .map(|(i, ch)| if i % 9 == 0 { KeyInput::Char('#') } else { KeyInput::Char(ch) })
        .collect();

    c.bench_function("typing session (full advanced lesson)", |b| {
        b.iter(|| {
            let start = Instant::now();
            let mut session = TypingSession::new(&lesson);
            for (i, key) in keys.iter().enumerate() {
                black_box(session.on_key_at(*key, start + Duration::from_millis(i as u64 * 120)));
            }
            session
        })
    });
}

fn bench_lesson_generation(c: &mut Criterion) {
    let mut generator = LessonGenerator::new(SmallRng::seed_from_u64(2));

    c.bench_function("generate lessons (levels 1-500)", |b| {
        b.iter(|| {
            for level in 1..=500 {
                black_box(generator.generate(black_box(level)));
            }
        })
    });
}

fn bench_level_listing(c: &mut Criterion) {
    c.bench_function("visible_levels (level 480, window 20)", |b| {
        b.iter(|| visible_levels(black_box(480), black_box(20)))
    });
}

criterion_group!(
    benches,
    bench_keystrokes,
    bench_lesson_generation,
    bench_level_listing
);
criterion_main!(benches);
