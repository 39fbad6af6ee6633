use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::core::PageRequest;
use crate::middleware::{json_error_handler, path_error_handler, query_error_handler};
use crate::modules::parking_spots::models::ParkingSpotRequest;
use crate::modules::parking_spots::services::ParkingSpotService;

/// Query parameters for listing parking spots
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// `property` or `property,asc|desc`
    pub sort: Option<String>,
}

impl PageQuery {
    pub fn to_page_request(&self) -> Result<PageRequest, AppError> {
        PageRequest::from_query(self.page, self.size, self.sort.as_deref())
    }
}

/// Register a parking spot
/// POST /parking-spot
pub async fn save_parking_spot(
    service: web::Data<Arc<ParkingSpotService>>,
    request: web::Json<ParkingSpotRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let spot = service.create(request).await?;

    Ok(HttpResponse::Created().json(spot))
}

/// List parking spots, one page at a time
/// GET /parking-spot?page=&size=&sort=
pub async fn get_all_parking_spots(
    service: web::Data<Arc<ParkingSpotService>>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page_request = query.to_page_request()?;
    let page = service.find_all(page_request).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /parking-spot/{id}
pub async fn get_parking_spot_by_id(
    service: web::Data<Arc<ParkingSpotService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let spot = service.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(spot))
}

/// DELETE /parking-spot/{id}
pub async fn delete_parking_spot(
    service: web::Data<Arc<ParkingSpotService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    service.delete_by_id(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Replace all fields of a parking spot
/// PUT /parking-spot/{id}
pub async fn update_parking_spot(
    service: web::Data<Arc<ParkingSpotService>>,
    path: web::Path<Uuid>,
    request: web::Json<ParkingSpotRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let spot = service.update(path.into_inner(), request).await?;

    Ok(HttpResponse::Ok().json(spot))
}

/// Configure parking spot routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/parking-spot")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route("", web::post().to(save_parking_spot))
            .route("", web::get().to(get_all_parking_spots))
            .route("/{id}", web::get().to(get_parking_spot_by_id))
            .route("/{id}", web::put().to(update_parking_spot))
            .route("/{id}", web::delete().to(delete_parking_spot)),
    );
}
