use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use thundertype::engine::evaluate;
use thundertype::generator::LessonGenerator;
use thundertype::session::input::KeyInput;
use thundertype::session::typing::{KeyOutcome, TypingSession};
use thundertype::store::schema::{ProfileUpdate, ReactionKind, UserProfile};
use thundertype::store::{AccountService, LocalBackend, PostStore, ProfileStore};

fn type_all(session: &mut TypingSession, text: &str, start: Instant, step: Duration) -> KeyOutcome {
    let mut outcome = KeyOutcome::Ignored;
    for (i, ch) in text.chars().enumerate() {
        outcome = session.on_key_at(KeyInput::Char(ch), start + step * i as u32);
    }
    outcome
}

#[test]
fn clean_run_unlocks_next_level_and_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut backend = LocalBackend::open(dir.path()).unwrap();
    let id = backend.register("typist@example.com", "secret1", "typist").unwrap();
    let profile = backend
        .initialize_profile(&id, UserProfile::new("typist"))
        .unwrap();
    assert_eq!(profile.level, 1);

    let mut generator = LessonGenerator::new(SmallRng::seed_from_u64(3));
    let lesson = generator.generate(1);
    let mut session = TypingSession::new(&lesson);
    let outcome = type_all(&mut session, &lesson.text, Instant::now(), Duration::from_millis(400));

    let KeyOutcome::Completed(result) = outcome else {
        panic!("session did not complete: {outcome:?}");
    };
    assert_eq!(result.accuracy, 100);
    assert_eq!(result.errors, 0);

    let verdict = evaluate(&profile, &result);
    assert!(verdict.passed);
    assert_eq!(verdict.next_level, Some(2));
    let update = verdict.update.unwrap();
    backend.write_profile(&id, &update).unwrap();
    drop(backend);

    let reopened = LocalBackend::open(dir.path()).unwrap();
    let stored = reopened.read_profile(&id).unwrap();
    assert_eq!(stored.level, 2);
    assert!(stored.completed_levels.contains(&1));
    assert_eq!(stored.wpm, result.wpm);
    assert_eq!(reopened.current_session().map(|s| s.account_id), Some(id));
}

#[test]
fn sloppy_run_keeps_level() {
    let mut generator = LessonGenerator::new(SmallRng::seed_from_u64(9));
    let lesson = generator.generate(2);
    let profile = UserProfile::new("typist");
    let mut session = TypingSession::new(&lesson);

    let sloppy: String = lesson.text.chars().map(|_| 'x').collect();
    let KeyOutcome::Completed(result) =
        type_all(&mut session, &sloppy, Instant::now(), Duration::from_millis(100))
    else {
        panic!("session did not complete");
    };
    assert_eq!(result.accuracy, 0);

    let verdict = evaluate(&profile, &result);
    assert!(!verdict.passed);
    assert!(verdict.update.is_none());
    assert!(verdict.message.contains("90%+ accuracy"));
}

#[test]
fn replaying_an_unlocked_level_only_records_best_speed() {
    let mut profile = UserProfile::new("typist");
    profile.apply(&ProfileUpdate {
        level: Some(10),
        wpm: Some(500),
        ..Default::default()
    });

    let mut generator = LessonGenerator::new(SmallRng::seed_from_u64(1));
    let lesson = generator.generate(1);
    let mut session = TypingSession::new(&lesson);
    let KeyOutcome::Completed(result) =
        type_all(&mut session, &lesson.text, Instant::now(), Duration::from_millis(300))
    else {
        panic!("session did not complete");
    };

    let verdict = evaluate(&profile, &result);
    assert!(verdict.passed);
    assert!(!verdict.advance);
    let update = verdict.update.unwrap();
    assert_eq!(update.level, None);
    assert_eq!(update.wpm, Some(500));
}

#[test]
fn posts_and_reactions_persist_between_opens() {
    let dir = TempDir::new().unwrap();
    let post_id = {
        let mut backend = LocalBackend::open(dir.path()).unwrap();
        let amy = backend.register("amy@example.com", "secret1", "amy").unwrap();
        let post = backend.create_post(&amy, "amy", "first!").unwrap();
        assert!(backend.toggle_reaction(&post.id, ReactionKind::Hearts, &amy).unwrap());
        post.id
    };

    let backend = LocalBackend::open(dir.path()).unwrap();
    let feed = backend.feed();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].id, post_id);
    assert_eq!(feed[0].content, "first!");
    assert_eq!(feed[0].hearts.len(), 1);
    assert!(feed[0].likes.is_empty());
}
