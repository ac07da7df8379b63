use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Sole owner of all persisted collections; handlers only call its
    /// operation methods and receive copies.
    pub store: Arc<Store>,
    /// Pluggable delivery backend. `ResendNotifier` when email is configured,
    /// `NoopNotifier` otherwise.
    pub notifier: Arc<dyn Notifier>,
    pub config: Config,
}
