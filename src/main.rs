use newsletter_signup::configuration::get_configuration;
use newsletter_signup::startup::Application;
use newsletter_signup::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // telemetry setup
    let subscriber = get_subscriber("newsletter_signup".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration()?;
    let application = Application::build(config).await?;
    application.run_until_stopped().await?;
    Ok(())
}
