use actix_web::web;

pub mod health;
pub mod parking_spots;

/// Every REST resource, mounted under the configured base path
pub fn api_scope(base_path: &str) -> actix_web::Scope {
    web::scope(base_path).configure(parking_spots::configure)
}
