mod api;
mod config;
mod decoder;
mod dispatcher;
mod types;
mod web;

use log::info;

use crate::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    info!(
        "starting cll_relay on port {}: compiler `{} {}`, scratch dir {}, timeout {:?}",
        config.port,
        config.compiler.interpreter,
        config.compiler.script.display(),
        config.scratch_dir.display(),
        config.compile_timeout,
    );

    web::run_server(config).await
}
