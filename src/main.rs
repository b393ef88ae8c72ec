use std::net::TcpListener;

use actix_web::web;
use anyhow::Context;
use broadcast_signup::{subscription_client::SubscriptionClient, telemetry, templates};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::get_subscriber("broadcast_signup", "info", std::io::stdout);
    telemetry::init_subscriber(subscriber);

    let config = broadcast_signup::config::get_config().context("failed to read config.yaml.")?;
    let listener = TcpListener::bind(config.web.server_address())
        .context("failed to bind web port.")?;
    tracing::info!("listening on {}.", config.web.server_address());

    let client = web::Data::new(
        SubscriptionClient::from_config(&config).context("failed to build subscription client.")?,
    );
    let signup_config = web::Data::new(config.signup);
    let templates = web::Data::new(templates::build().context("failed to load templates.")?);

    broadcast_signup::run(listener, client, signup_config, templates)?.await?;
    Ok(())
}
