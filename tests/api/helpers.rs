//! tests/api/helpers.rs
use quiet_atlas::configuration::get_configuration;
use quiet_atlas::startup::Application;
use quiet_atlas::telemetry::{get_subscriber, init_subscriber};
use std::sync::LazyLock;
use wiremock::MockServer;

static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact_multipart(
        &self,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// The JSON body of the first (and only) request the provider mock saw.
    pub async fn first_delivery_request(&self) -> serde_json::Value {
        let requests = self.email_server.received_requests().await.unwrap();
        serde_json::from_slice(&requests[0].body).unwrap()
    }
}

#[allow(clippy::let_underscore_future)]
pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);
    let email_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = 0;
        c.email_client.base_url = email_server.uri();
        c
    };

    let app = Application::build(&configuration).expect("Failed to build application server.");
    let address = format!("http://127.0.0.1:{}", app.port());
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address,
        email_server,
        api_client: reqwest::Client::new(),
    }
}
