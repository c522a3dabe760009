/// What [`CompositeAdapter::register`](crate::CompositeAdapter::register)
/// does once the composite already has observers.
///
/// A host that is already displaying the composite has not seen the new
/// provider's items arrive through any event, so its view of the list is
/// stale after a late registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LateRegistration {
    /// Register anyway and log a warning.
    #[default]
    Warn,
    /// Refuse with [`AdapterError::LateRegistration`](crate::AdapterError::LateRegistration).
    Reject,
}

/// Tunables for a [`CompositeAdapter`](crate::CompositeAdapter).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeConfig {
    pub late_registration: LateRegistration,
    /// Warn when a provider reports a kind already routed elsewhere.
    pub log_kind_collisions: bool,
}

impl CompositeConfig {
    pub fn with_late_registration(mut self, policy: LateRegistration) -> Self {
        self.late_registration = policy;
        self
    }

    pub fn with_kind_collision_logging(mut self, enabled: bool) -> Self {
        self.log_kind_collisions = enabled;
        self
    }
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            late_registration: LateRegistration::Warn,
            log_kind_collisions: true,
        }
    }
}
