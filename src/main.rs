use std::net::TcpListener;

use portfolio_api::configuration::get_configuration;
use portfolio_api::email_client::EmailClient;
use portfolio_api::startup::run;
use portfolio_api::storage;
use portfolio_api::telemetry::{get_tracing_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let subscriber = get_tracing_subscriber("portfolio-api", "info", std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");

    let recipient = configuration
        .email_client
        .recipient()
        .expect("Invalid recipient email address.");
    let email_client = EmailClient::new(
        configuration.email_client.base_url.clone(),
        configuration.email_client.sender.clone(),
        recipient,
        configuration.email_client.api_key.clone(),
        configuration.email_client.timeout(),
    );

    let user_storage = storage::user_storage(configuration.supabase.as_ref());

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;
    run(listener, email_client, user_storage)?.await
}
