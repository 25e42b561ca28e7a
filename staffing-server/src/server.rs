use std::sync::Arc;

use colored::Colorize;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::{
    api,
    infrastructure::{
        config::build_config, telemetry::initialize_telemetry, BackgroundService, ServiceProvider,
        StaffingConfig,
    },
};

pub fn run() {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(x) => x,
        Err(e) => return eprintln!("{}: {}", "Cannot build tokio runtime".red(), e),
    };
    runtime.block_on(async_run());
}

pub async fn async_run() {
    let config = match build_config().and_then(|c| Ok(c.try_deserialize::<StaffingConfig>()?)) {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build config".red(), e);
        }
    };
    if let Err(e) = initialize_telemetry(config.telemetry()) {
        return eprintln!("{}: {}", "Cannot build logger".red(), e);
    };
    let (service_provider, tasks) = match ServiceProvider::build(config).await {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build Service Provider".red(), e);
        }
    };
    let handles = tasks
        .into_iter()
        .map(|x: Arc<dyn BackgroundService>| tokio::spawn(async move { x.run().await }))
        .collect::<Vec<JoinHandle<()>>>();
    tokio::select! {
        _ = initialize_web_host(Arc::new(service_provider)) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Stopping Services (ctrl-c handling).");
            for handle in handles {
                handle.abort()
            }
        }
    }
}

pub async fn initialize_web_host(sp: Arc<ServiceProvider>) {
    let host = sp.config.host().clone();
    let server = actix_web::HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allow_any_origin()
            .allow_any_header()
            .allow_any_method()
            .max_age(86400);
        let sp = sp.clone();
        actix_web::App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(cors)
            .configure(move |cfg| api::configure(cfg, &sp))
    })
    .bind((host.bind_address().to_owned(), *host.bind_port()));
    let server = match server {
        Ok(x) => x,
        Err(e) => {
            error!("Cannot bind {}:{}: {e}", host.bind_address(), host.bind_port());
            return;
        }
    };
    info!(
        "Listening on {}:{}.",
        host.bind_address(),
        host.bind_port()
    );
    match server.disable_signals().run().await {
        Ok(_) => info!("Web server stopped successfully."),
        Err(e) => error!("Web server into error: {}", e),
    }
}
