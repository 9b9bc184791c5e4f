//! Fixed word and sentence pools the lesson tiers draw from.

pub const HOME_ROW: [char; 8] = ['a', 's', 'd', 'f', 'j', 'k', 'l', ';'];

pub const REACH_KEYS: [char; 4] = ['e', 'i', 'r', 'u'];

pub const COMMON_WORDS: [&str; 12] = [
    "the", "and", "but", "for", "with", "you", "are", "not", "that", "this", "can", "have",
];

pub const LONG_WORDS: [&str; 10] = [
    "apple", "banana", "cherry", "grape", "house", "jungle", "keyboard", "lemon", "mountain",
    "ocean",
];

pub const PANGRAM: &str = "The quick brown fox jumps over the lazy dog. How quickly you type!";

pub const ADVANCED_SENTENCES: [&str; 9] = [
    "The early bird catches the worm, but the second mouse gets the cheese.",
    "Technology has advanced at an incredible pace, changing our lives dramatically.",
    "Learning a new skill requires dedication, patience, and consistent practice.",
    "The sun always shines brightest after the rain, bringing hope and new beginnings.",
    "To improve your typing speed, focus on rhythm and try not to look at the keyboard.",
    "Practice makes perfect, especially when it comes to mastering touch typing.",
    "The swift brown fox jumps over the lazy dog and then takes a nap.",
    "Efficient communication relies on clear, concise, and accurate typing skills.",
    "Developing good typing habits early on will benefit you throughout your life.",
];

/// Tips shown on the loading screen.
pub const TIPS: [&str; 5] = [
    "Keep your fingers on the home row for better typing speed",
    "Practice regularly to improve your muscle memory",
    "Try to type without looking at your keyboard",
    "Focus on accuracy before speed",
    "Use all your fingers, not just two!",
];

pub const CHALLENGE_WORDS: [&str; 5] = ["apple", "banana", "cherry", "grape", "kiwi"];
