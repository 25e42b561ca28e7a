pub mod background_service;
pub mod config;
pub mod database;
pub mod notifier;
pub mod service_provider;
pub mod signature_store;
pub mod telemetry;

#[rustfmt::skip]
pub use {
    background_service::BackgroundService,
    config::StaffingConfig,
    service_provider::{Repositories, ServiceProvider},
};
