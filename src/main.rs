//! main.rs

use quiet_atlas::configuration::get_configuration;
use quiet_atlas::startup::Application;
use quiet_atlas::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("quiet-atlas".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration file.");
    let application = Application::build(&configuration)?;
    application.run_until_stopped().await?;
    Ok(())
}
