use std::net::TcpListener;

use actix_web::web;
use broadcast_signup::{
    config::get_config,
    subscription_client::SubscriptionClient,
    telemetry::{get_subscriber, init_subscriber},
    templates,
};
use once_cell::sync::Lazy;
use reqwest::Response;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber("test", "debug", std::io::stdout));
    } else {
        init_subscriber(get_subscriber("test", "debug", std::io::sink));
    }
});

pub struct TestApp {
    pub address: String,
    pub api_server: MockServer,
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let api_server = MockServer::start().await;

    let mut config = get_config().expect("failed to read config.yaml.");
    config.web.port = 0;
    config.subscription_api.base_url = api_server.uri();

    let listener = TcpListener::bind(config.web.server_address()).expect("failed to bind web port.");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://{}:{}", &config.web.host, port);

    let client = web::Data::new(
        SubscriptionClient::from_config(&config).expect("failed to build subscription client."),
    );
    let signup_config = web::Data::new(config.signup);
    let templates = web::Data::new(templates::build().expect("failed to load templates."));

    let server = broadcast_signup::run(listener, client, signup_config, templates)
        .expect("failed to start server.");
    tokio::spawn(server);

    TestApp {
        address,
        api_server,
    }
}

impl TestApp {
    pub async fn post_signup(&self, body: String) -> Response {
        reqwest::Client::new()
            .post(format!("{}/signup", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> Response {
        reqwest::Client::new()
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("failed to execute request.")
    }
}

/// Every http(s) link in a rendered page.
pub fn links(html: &str) -> Vec<String> {
    linkify::LinkFinder::new()
        .links(html)
        .filter(|l| *l.kind() == linkify::LinkKind::Url)
        .map(|l| l.as_str().to_owned())
        .collect()
}
