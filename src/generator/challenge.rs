use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::ValidationError;
use crate::generator::words::CHALLENGE_WORDS;

pub const CHALLENGES_PER_REGISTRATION: usize = 3;

const SEQUENCE: [&str; 4] = ["A", "B", "C", "D"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChallengeKind {
    Math,
    Sequence,
    Word,
}

const KINDS: [ChallengeKind; 3] = [
    ChallengeKind::Math,
    ChallengeKind::Sequence,
    ChallengeKind::Word,
];

/// A human-check puzzle shown on the registration form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub kind: ChallengeKind,
    pub question: String,
    answer: String,
}

impl Challenge {
    pub fn generate<R: Rng>(kind: ChallengeKind, rng: &mut R) -> Self {
        match kind {
            ChallengeKind::Math => {
                let a = rng.gen_range(0..10);
                let b = rng.gen_range(0..10);
                Self {
                    kind,
                    question: format!("{a} + {b} = ?"),
                    answer: (a + b).to_string(),
                }
            }
            ChallengeKind::Sequence => {
                let mut shuffled = SEQUENCE.to_vec();
                shuffled.shuffle(rng);
                Self {
                    kind,
                    question: format!("Put these in order: {}", shuffled.join(", ")),
                    answer: SEQUENCE.join(","),
                }
            }
            ChallengeKind::Word => {
                let word = CHALLENGE_WORDS[rng.gen_range(0..CHALLENGE_WORDS.len())];
                let spelled = word
                    .chars()
                    .map(|c| c.to_ascii_uppercase().to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                Self {
                    kind,
                    question: format!("Type the word: {spelled}"),
                    answer: word.to_string(),
                }
            }
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let kind = KINDS[rng.gen_range(0..KINDS.len())];
        Self::generate(kind, rng)
    }

    pub fn is_answered_by(&self, answer: &str) -> bool {
        normalize(self.kind, answer) == normalize(self.kind, &self.answer)
    }
}

fn normalize(kind: ChallengeKind, answer: &str) -> String {
    let answer = answer.trim().to_lowercase();
    match kind {
        ChallengeKind::Sequence => answer
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(","),
        _ => answer,
    }
}

pub fn generate_set<R: Rng>(rng: &mut R) -> Vec<Challenge> {
    (0..CHALLENGES_PER_REGISTRATION)
        .map(|_| Challenge::random(rng))
        .collect()
}

/// Every challenge must have a matching answer at the same position.
pub fn verify_all(challenges: &[Challenge], answers: &[&str]) -> Result<(), ValidationError> {
    if challenges.is_empty() || answers.len() != challenges.len() {
        return Err(ValidationError::ChallengeFailed);
    }
    if challenges
        .iter()
        .zip(answers)
        .all(|(challenge, answer)| challenge.is_answered_by(answer))
    {
        Ok(())
    } else {
        Err(ValidationError::ChallengeFailed)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn solve(challenge: &Challenge) -> String {
        challenge.answer.clone()
    }

    #[test]
    fn math_answer_matches_question() {
        let mut rng = SmallRng::seed_from_u64(3);
        let c = Challenge::generate(ChallengeKind::Math, &mut rng);
        let (lhs, _) = c.question.split_once(" = ").unwrap();
        let sum: u32 = lhs.split(" + ").map(|n| n.parse::<u32>().unwrap()).sum();
        assert!(c.is_answered_by(&sum.to_string()));
        assert!(!c.is_answered_by(&(sum + 1).to_string()));
    }

    #[test]
    fn sequence_accepts_spacing_and_case_variants() {
        let mut rng = SmallRng::seed_from_u64(8);
        let c = Challenge::generate(ChallengeKind::Sequence, &mut rng);
        assert!(c.is_answered_by("A,B,C,D"));
        assert!(c.is_answered_by(" a, b ,c,d "));
        assert!(!c.is_answered_by("D,C,B,A"));
    }

    #[test]
    fn word_challenge_is_case_insensitive() {
        let mut rng = SmallRng::seed_from_u64(1);
        let c = Challenge::generate(ChallengeKind::Word, &mut rng);
        assert!(c.question.starts_with("Type the word: "));
        assert!(c.is_answered_by(&c.answer.to_uppercase()));
    }

    #[test]
    fn verify_all_requires_every_answer() {
        let mut rng = SmallRng::seed_from_u64(21);
        let set = generate_set(&mut rng);
        assert_eq!(set.len(), CHALLENGES_PER_REGISTRATION);

        let good: Vec<String> = set.iter().map(solve).collect();
        let good_refs: Vec<&str> = good.iter().map(String::as_str).collect();
        assert_eq!(verify_all(&set, &good_refs), Ok(()));

        let mut bad = good_refs.clone();
        bad[1] = "nope";
        assert_eq!(verify_all(&set, &bad), Err(ValidationError::ChallengeFailed));
        assert_eq!(
            verify_all(&set, &good_refs[..2]),
            Err(ValidationError::ChallengeFailed)
        );
    }

    #[test]
    fn no_challenges_never_verifies() {
        assert_eq!(verify_all(&[], &[]), Err(ValidationError::ChallengeFailed));
    }
}
