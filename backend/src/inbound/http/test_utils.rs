//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockAccountService, MockBackgrounds, MockBrandKits, MockCanvaService, MockDesignFiles,
    MockTemplatesCommand, MockTemplatesQuery,
};
use crate::domain::{Email, Plan, SessionClaims, UserId};
use crate::inbound::http::error::{json_error_handler, query_error_handler};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Token accepted by [`TestPorts::authenticating`].
pub const TEST_TOKEN: &str = "test-token";

/// Mock for every port; set expectations on the fields, then call
/// [`TestPorts::into_state`].
#[derive(Default)]
pub struct TestPorts {
    pub accounts: MockAccountService,
    pub templates: MockTemplatesQuery,
    pub templates_command: MockTemplatesCommand,
    pub design_files: MockDesignFiles,
    pub backgrounds: MockBackgrounds,
    pub brand_kits: MockBrandKits,
    pub canva: MockCanvaService,
}

impl TestPorts {
    /// Ports whose account mock accepts [`TEST_TOKEN`] for `claims`.
    pub fn authenticating(claims: SessionClaims) -> Self {
        let mut ports = Self::default();
        ports
            .accounts
            .expect_authenticate()
            .withf(|token: &str| token == TEST_TOKEN)
            .returning(move |_| Ok(claims.clone()));
        ports
    }

    /// Wrap the mocks as handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            templates: Arc::new(self.templates),
            templates_command: Arc::new(self.templates_command),
            design_files: Arc::new(self.design_files),
            backgrounds: Arc::new(self.backgrounds),
            brand_kits: Arc::new(self.brand_kits),
            canva: Arc::new(self.canva),
        })
    }
}

/// Claims for a caller on `plan`.
pub fn caller(plan: Plan) -> SessionClaims {
    SessionClaims {
        user_id: UserId::random(),
        email: Email::new("agent@example.com").expect("fixture email"),
        plan,
    }
}

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {TEST_TOKEN}"))
}

/// App with `ports` registered and the JSON error handlers installed.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
}
