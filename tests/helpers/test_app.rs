// Test Application Helpers
//
// Builds the application with the same routes and middleware as
// src/main.rs, over any repository.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use parking_control::middleware::{ErrorHandler, RequestId};
use parking_control::modules::{self, health};
use parking_control::parking_spots::{
    MySqlParkingSpotRepository, ParkingSpotRepository, ParkingSpotService,
};

pub use actix_test::TestServer;

use super::test_database::create_test_pool;

pub const BASE_PATH: &str = "/rest/api/v1";

/// `/rest/api/v1/parking-spot` plus an optional suffix
pub fn spot_url(suffix: &str) -> String {
    format!("{}/parking-spot{}", BASE_PATH, suffix)
}

/// Application wired like production, without a database pool
pub fn build_app(
    repository: Arc<dyn ParkingSpotRepository>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let service = Arc::new(ParkingSpotService::new(repository));

    App::new()
        .wrap(ErrorHandler)
        .wrap(RequestId)
        .app_data(web::Data::new(service))
        .service(modules::api_scope(BASE_PATH))
}

/// Spawn a real HTTP server backed by the test database
///
/// Server stops automatically when the returned `TestServer` drops.
pub async fn spawn_test_server() -> TestServer {
    let pool = create_test_pool().await;
    let repository = Arc::new(MySqlParkingSpotRepository::new(pool.clone()));
    let service = Arc::new(ParkingSpotService::new(repository));

    actix_test::start(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(pool.clone()))
            .configure(health::configure)
            .service(modules::api_scope(BASE_PATH))
    })
}
