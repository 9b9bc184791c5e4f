pub mod progression;

pub use progression::{Progression, ToastKind, evaluate};
