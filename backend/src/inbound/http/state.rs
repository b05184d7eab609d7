//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, Backgrounds, BrandKits, CanvaService, DesignFiles, TemplatesCommand,
    TemplatesQuery,
};

/// Parameter object bundling every port the handlers use.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub templates: Arc<dyn TemplatesQuery>,
    pub templates_command: Arc<dyn TemplatesCommand>,
    pub design_files: Arc<dyn DesignFiles>,
    pub backgrounds: Arc<dyn Backgrounds>,
    pub brand_kits: Arc<dyn BrandKits>,
    pub canva: Arc<dyn CanvaService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub templates: Arc<dyn TemplatesQuery>,
    pub templates_command: Arc<dyn TemplatesCommand>,
    pub design_files: Arc<dyn DesignFiles>,
    pub backgrounds: Arc<dyn Backgrounds>,
    pub brand_kits: Arc<dyn BrandKits>,
    pub canva: Arc<dyn CanvaService>,
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
            templates,
            templates_command,
            design_files,
            backgrounds,
            brand_kits,
            canva,
        } = ports;
        Self {
            accounts,
            templates,
            templates_command,
            design_files,
            backgrounds,
            brand_kits,
            canva,
        }
    }
}
