//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, ActorResolver, ComplaintCommand, ComplaintQuery, MaintenanceQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub actors: Arc<dyn ActorResolver>,
    pub complaints: Arc<dyn ComplaintCommand>,
    pub complaints_query: Arc<dyn ComplaintQuery>,
    pub maintenance: Arc<dyn MaintenanceQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub actors: Arc<dyn ActorResolver>,
    pub complaints: Arc<dyn ComplaintCommand>,
    pub complaints_query: Arc<dyn ComplaintQuery>,
    pub maintenance: Arc<dyn MaintenanceQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            actors,
            complaints,
            complaints_query,
            maintenance,
        } = ports;
        Self {
            accounts,
            actors,
            complaints,
            complaints_query,
            maintenance,
        }
    }
}
