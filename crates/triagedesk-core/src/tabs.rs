//! Tab routing between the dashboard sections.

/// A visible section of the dashboard. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Email list and status counters.
    #[default]
    Emails,
    /// Knowledge-base document list and upload.
    Knowledge,
    /// Connector/AI settings form.
    Settings,
}

/// Keeps exactly one active tab identifier.
///
/// Switching away does not cancel in-flight requests; late completions
/// land in controller state and are simply not projected while the owning
/// tab is inactive.
#[derive(Debug, Default)]
pub struct TabRouter {
    active: Tab,
}

impl TabRouter {
    /// Creates a router with the email tab active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates `tab` and returns it so the caller can trigger the
    /// section's initial load.
    pub const fn activate(&mut self, tab: Tab) -> Tab {
        self.active = tab;
        tab
    }

    /// Currently active tab.
    #[must_use]
    pub const fn active(&self) -> Tab {
        self.active
    }

    /// Whether `tab` is the active one.
    #[must_use]
    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }
}
