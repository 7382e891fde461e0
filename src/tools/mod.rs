mod format;
mod locator;
mod video_attr;

pub use format::{clean_decimals, format_seconds};
pub use locator::ToolLocator;
pub use video_attr::VideoAttr;
