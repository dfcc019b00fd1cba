//! Service container for dependency injection
//!
//! Wires the booking service onto a transport built from settings.

use std::sync::Arc;

use crate::application::services::IOfficeService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::Transport;
use crate::infrastructure::UreqTransport;

/// Container holding the loaded settings and the services built on them.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Domain mapper for the booking API
    pub ioffice: IOfficeService,
}

impl ServiceContainer {
    /// Create a container with the real HTTPS transport.
    ///
    /// Fails on missing hostname or credentials; performs no network I/O.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        let hostname = settings.require_hostname()?.to_string();
        let credentials = settings.credentials()?;
        let transport = UreqTransport::new(&hostname, credentials)?;
        Ok(Self::with_deps(settings, Arc::new(transport)))
    }

    /// Create a container with a custom transport (for testing).
    pub fn with_deps(settings: Settings, transport: Arc<dyn Transport>) -> Self {
        let settings = Arc::new(settings);
        let ioffice = IOfficeService::new(transport);

        Self { settings, ioffice }
    }
}
