use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tera::Tera;
use tracing_actix_web::TracingLogger;

use crate::{config::SignupConfig, routes, subscription_client::SubscriptionClient};

pub fn run(
    listener: TcpListener,
    client: web::Data<SubscriptionClient>,
    config: web::Data<SignupConfig>,
    templates: web::Data<Tera>,
) -> Result<Server, std::io::Error> {
    let vcard_path = config.vcard_path.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(client.clone())
            .app_data(config.clone())
            .app_data(templates.clone())
            .route("/", web::get().to(routes::signup_form))
            .route("/signup", web::post().to(routes::signup))
            .route("/email-suggestion", web::get().to(routes::email_suggestion))
            .route(&vcard_path, web::get().to(routes::contact_card))
            .route("/health_check", web::get().to(routes::health_check))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
