use actix_web::{HttpResponse, Responder};

/// Liveness probe for deployment checks.
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

pub async fn check_version() -> impl Responder {
    HttpResponse::Ok().body(env!("CARGO_PKG_VERSION"))
}
