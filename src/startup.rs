//! src/startup.rs
use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::routes::{health_check, submit_contact};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(configuration: &Settings) -> Result<Self, anyhow::Error> {
        let email_client = EmailClient::new(
            configuration.email_client.base_url.clone(),
            configuration.email_client.sender_name.clone(),
            configuration.email_client.sender_email.clone(),
            configuration.email_client.recipient_email.clone(),
            configuration.email_client.api_key.clone(),
            configuration.email_client.timeout(),
        );

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, email_client)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, email_client: EmailClient) -> Result<Server, anyhow::Error> {
    let email_client = web::Data::new(email_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/api/contact", web::post().to(submit_contact))
            .app_data(email_client.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
