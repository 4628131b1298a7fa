pub mod assignment;
pub mod climber;
pub mod runner;

pub use self::assignment::SlotAssignment;
pub use self::climber::Climber;
pub use self::runner::{
    Optimizer, Progress, ProgressCallback, SearchOptions, SearchResult, Silent, StopReason,
};
