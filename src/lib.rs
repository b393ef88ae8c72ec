pub mod config;
mod debounce;
pub mod domain;
mod routes;
pub mod signup_controller;
mod startup;
pub mod subscription_client;
pub mod success_panel;
pub mod telemetry;
pub mod templates;
mod util;

pub use startup::run;
