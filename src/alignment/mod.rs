pub mod item;
pub mod loader;
pub mod merge;
pub mod region;
pub mod source;
pub mod textgrid;

pub use item::{AlignmentItem, Seconds};
pub use loader::{load, load_optional};
pub use merge::MergeMode;
pub use region::Region;
pub use source::AlignmentSource;
