use std::sync::Arc;

use tasklens_service::TasklensService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<TasklensService>,
}

impl AppState {
	pub fn new(config: tasklens_config::Config) -> Self {
		Self { service: Arc::new(TasklensService::new(config)) }
	}

	pub fn with_service(service: TasklensService) -> Self {
		Self { service: Arc::new(service) }
	}
}
