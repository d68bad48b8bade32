//! Business logic services

pub mod hal;
pub mod publications;
pub mod students;

use std::sync::Arc;

use crate::config::AppConfig;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub publications: publications::PublicationsService,
    pub students: students::StudentsService,
}

impl Services {
    /// Create all services around the given publication source
    pub fn new(config: &AppConfig, source: Arc<dyn hal::PublicationSource>) -> Self {
        Self {
            publications: publications::PublicationsService::new(source),
            students: students::StudentsService::new(config.students.clone()),
        }
    }
}
