pub mod clock;
pub mod stopwatch;

pub use clock::{Clock, ManualClock, SystemClock};
pub use stopwatch::Stopwatch;
