//! HTTP surface of the relay.
//!
//! One route does the work: `GET /compile?data=<escaped source>` decodes the
//! query, hands the source to the dispatcher, and serializes the verdict.
//! Everything else is plumbing for the collaborating front end: the embedded
//! submission page, liveness probes, and the public asset directory, mounted
//! after the routes so routes win.

use std::net::Ipv4Addr;

use actix_files::Files;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use log::{error, info, warn};
use serde_json::json;

use crate::api::{check_version, health_check};
use crate::config::Config;
use crate::decoder::decode;
use crate::dispatcher::{CompileDispatcher, CompileError};
use crate::types::CompileQuery;

async fn compile_source(
    query: web::Query<CompileQuery>,
    dispatcher: web::Data<CompileDispatcher>,
) -> impl Responder {
    let source = decode(&query.data);
    info!("received compile request, {} bytes of source", source.len());

    match dispatcher.compile(&source).await {
        Ok(result) => {
            info!("compile succeeded: {:?}", result.text);
            HttpResponse::Ok().json(result.text)
        }
        Err(CompileError::ArtifactWrite { path, source }) => {
            error!("failed to stage submission at {}: {}", path.display(), source);
            HttpResponse::InternalServerError().json(json!({
                "error": "artifact write failed",
            }))
        }
        Err(CompileError::ProcessFailed { output }) => {
            // The raw compiler text goes back verbatim; the front end shows a
            // generic message, but operators and logs get the real diagnostic.
            error!("compiler rejected submission: {output:?}");
            HttpResponse::BadRequest().json(json!({
                "error": "compilation failed",
                "output": output,
            }))
        }
        Err(CompileError::Timeout { limit }) => {
            warn!("compiler killed after exceeding {limit:?}");
            HttpResponse::GatewayTimeout().json(json!({
                "error": "compile timed out",
            }))
        }
    }
}

async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("index.html"))
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let server_address = (Ipv4Addr::UNSPECIFIED, config.port);
    let dispatcher = web::Data::new(CompileDispatcher::new(&config));
    let public_dir = config.public_dir;

    HttpServer::new(move || {
        App::new()
            .app_data(dispatcher.clone())
            .route("/compile", web::get().to(compile_source))
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health_check))
            .route("/version", web::get().to(check_version))
            .service(Files::new("/", public_dir.clone()))
    })
    .bind(server_address)?
    .run()
    .await
}
