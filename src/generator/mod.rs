pub mod challenge;
pub mod lesson;
pub mod words;

pub use lesson::{Lesson, LessonGenerator, LevelDescriptor, MAX_LEVEL, target_wpm};
