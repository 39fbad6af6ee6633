use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{JsonPayloadError, PathError, QueryPayloadError},
    Error, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::core::AppError;
use crate::middleware::request_id::CorrelationId;

/// Middleware for consistent error response formatting
///
/// Re-renders `AppError` responses that carry `{status, error}` so the body
/// also names the request path. Field validation bodies pass through.
pub struct ErrorHandler;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandler
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorHandlerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorHandlerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorHandlerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let res = service.call(req).await?;

            let rendered = res
                .response()
                .error()
                .and_then(|err| err.as_error::<AppError>())
                .map(|app_err| {
                    let request = res.request();
                    let path = request.path();
                    let request_id = request
                        .extensions()
                        .get::<CorrelationId>()
                        .map(|id| id.0.clone());
                    log_error(app_err, path, request_id.as_deref());
                    (app_err.carries_status(), app_err.to_body(Some(path)))
                });

            match rendered {
                Some((true, body)) => {
                    let status = res.status();
                    Ok(res.into_response(HttpResponse::build(status).json(body)))
                }
                _ => Ok(res.map_into_boxed_body()),
            }
        })
    }
}

/// Log a failed request; server-side failures keep their full detail here
pub fn log_error(err: &AppError, path: &str, request_id: Option<&str>) {
    let request_id = request_id.unwrap_or("-");
    match err {
        AppError::Database(_) | AppError::Configuration(_) | AppError::Internal(_) => {
            tracing::error!(request_id = %request_id, path = %path, error = %err, "Request failed");
        }
        _ => {
            tracing::debug!(request_id = %request_id, path = %path, error = %err, "Request rejected");
        }
    }
}

/// Malformed or unreadable JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    AppError::bad_request(format!("Malformed JSON request: {}", err)).into()
}

/// Path segments that do not parse (e.g. a non-UUID id)
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    AppError::bad_request(format!("Invalid path parameter: {}", err)).into()
}

/// Query strings that do not parse (e.g. `page=abc`)
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    AppError::bad_request(format!("Invalid query parameter: {}", err)).into()
}
