/// The closed set of dashboard panels. Persisted configurations may carry
/// keys this build does not know (written by a newer build); those map to
/// `None` and render nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Summary,
    Event,
    User,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 3] = [WidgetKind::Summary, WidgetKind::Event, WidgetKind::User];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "summary" => Some(WidgetKind::Summary),
            "event" => Some(WidgetKind::Event),
            "user" => Some(WidgetKind::User),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            WidgetKind::Summary => "summary",
            WidgetKind::Event => "event",
            WidgetKind::User => "user",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WidgetKind::Summary => "Summary",
            WidgetKind::Event => "Event analytics",
            WidgetKind::User => "User analytics",
        }
    }
}
