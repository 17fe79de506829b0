use std::sync::Arc;

use services::WorkflowService;

pub trait UiApp: Send + Sync {
    fn workflow(&self) -> Arc<WorkflowService>;
}

#[derive(Clone)]
pub struct AppContext {
    workflow: Arc<WorkflowService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            workflow: app.workflow(),
        }
    }

    #[must_use]
    pub fn workflow(&self) -> Arc<WorkflowService> {
        Arc::clone(&self.workflow)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
