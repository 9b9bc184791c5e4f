use crate::generator::lesson::{MAX_LEVEL, target_wpm};
use crate::session::result::SessionResult;
use crate::store::schema::{ProfileUpdate, UserProfile};

pub const PASS_ACCURACY: u32 = 90;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Verdict on one finished session against the stored profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progression {
    pub passed: bool,
    pub advance: bool,
    pub next_level: Option<u32>,
    pub update: Option<ProfileUpdate>,
    pub message: String,
    pub kind: ToastKind,
}

pub fn passes(level: u32, wpm: u32, accuracy: u32) -> bool {
    wpm >= target_wpm(level) && accuracy >= PASS_ACCURACY
}

pub fn evaluate(profile: &UserProfile, result: &SessionResult) -> Progression {
    let level = result.level.max(1);
    let target = target_wpm(level);
    let mut message = format!(
        "Level Completed! WPM: {}, Accuracy: {}%. Errors: {}.",
        result.wpm, result.accuracy, result.errors
    );

    if !passes(level, result.wpm, result.accuracy) {
        message.push_str(&format!(
            " Keep practicing to reach the target WPM of {target} and {PASS_ACCURACY}%+ accuracy!"
        ));
        let wpm_gap = target.saturating_sub(result.wpm);
        let accuracy_gap = PASS_ACCURACY.saturating_sub(result.accuracy);
        if wpm_gap > 0 {
            message.push_str(&format!(" {wpm_gap} WPM short."));
        }
        if accuracy_gap > 0 {
            message.push_str(&format!(" {accuracy_gap}% accuracy short."));
        }
        return Progression {
            passed: false,
            advance: false,
            next_level: None,
            update: None,
            message,
            kind: ToastKind::Warning,
        };
    }

    let best_wpm = profile.wpm.max(result.wpm);
    let next = level + 1;

    if next > MAX_LEVEL {
        message.push_str(" You've completed all available levels! Amazing!");
        return Progression {
            passed: true,
            advance: false,
            next_level: None,
            update: Some(ProfileUpdate {
                wpm: Some(best_wpm),
                accuracy: Some(result.accuracy),
                complete_level: Some(level),
                ..Default::default()
            }),
            message,
            kind: ToastKind::Success,
        };
    }

    message.push_str(&format!(" Great job! Unlocked Level {next}!"));
    let advance = next > profile.level;
    let update = if advance {
        ProfileUpdate {
            level: Some(next),
            wpm: Some(best_wpm),
            accuracy: Some(result.accuracy),
            complete_level: Some(level),
            ..Default::default()
        }
    } else {
        // replaying an already unlocked level
        ProfileUpdate {
            wpm: Some(best_wpm),
            accuracy: Some(result.accuracy),
            ..Default::default()
        }
    };

    Progression {
        passed: true,
        advance,
        next_level: Some(next),
        update: Some(update),
        message,
        kind: ToastKind::Success,
    }
}
