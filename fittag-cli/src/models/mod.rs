pub mod day;
pub mod routine;
pub mod tag;

pub use day::{ParseDayError, TrainingDay};
pub use routine::{BodyFocus, Routine, RoutineArt, SkillLevel};
pub use tag::{Tag, UserStatus};
