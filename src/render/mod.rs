pub mod assets;
pub mod command;
pub mod sink;
pub mod slot;
pub mod template;

pub use assets::WidgetAssets;
pub use command::WidgetCommand;
pub use sink::{DisplayId, NotebookSink, RecordingSink, RenderEvent, RenderSink};
pub use slot::DisplaySlot;
pub use template::render_widget;
