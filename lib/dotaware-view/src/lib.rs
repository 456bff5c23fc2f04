pub use html::page;
pub use live::{HtmlSnapshot, LiveView, Render};
pub use node::{Element, Node};
pub use overlay::overlay;
pub use projection::{project, ProjectionOptions};

pub mod html;
pub mod live;
pub mod node;
pub mod overlay;
pub mod projection;
