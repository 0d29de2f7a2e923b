pub mod layout;
pub mod stats;
pub mod widgets;

pub use layout::WidgetLayout;
pub use widgets::WidgetKind;
