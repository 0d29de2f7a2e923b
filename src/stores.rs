use crate::api::auth::Profile;
use crate::api::events::{Event, FilterOptions};
use crate::api::resources::ExternalResource;
use crate::api::users::User;
use crate::api::widgets::WidgetItem;
use crate::api::Page;
use crate::cache::QueryCache;

/// The remote query caches, one per resource, keyed by query descriptor.
/// Mutations invalidate the caches of the entity type they touched (plus the
/// unpaginated projections derived from it) so the next render refetches
/// with the current query state.
#[derive(Default)]
pub struct Stores {
    pub users: QueryCache<Page<User>>,
    pub events: QueryCache<Page<Event>>,
    pub resources: QueryCache<Page<ExternalResource>>,
    pub all_users: QueryCache<Vec<User>>,
    pub all_events: QueryCache<Vec<Event>>,
    pub event_filters: QueryCache<FilterOptions>,
    pub role_access: QueryCache<bool>,
    pub profile: QueryCache<Profile>,
    pub widgets: QueryCache<Vec<WidgetItem>>,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate_users(&self) {
        self.users.invalidate();
        self.all_users.invalidate();
    }

    pub fn invalidate_events(&self) {
        self.events.invalidate();
        self.all_events.invalidate();
        self.event_filters.invalidate();
    }

    pub fn invalidate_resources(&self) {
        self.resources.invalidate();
    }

    pub fn invalidate_widgets(&self) {
        self.widgets.invalidate();
    }

    /// Forget everything; used on logout so nothing fetched under one
    /// session leaks into the next.
    pub fn clear_all(&self) {
        self.users.invalidate();
        self.events.invalidate();
        self.resources.invalidate();
        self.all_users.invalidate();
        self.all_events.invalidate();
        self.event_filters.invalidate();
        self.role_access.invalidate();
        self.profile.invalidate();
        self.widgets.invalidate();
    }
}
