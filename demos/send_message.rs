use std::io;

use telnyx::resources::{MessageType, SendMessageParams};
use telnyx::{RawPhoneNumber, TelnyxClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let from = std::env::var("TELNYX_FROM").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELNYX_FROM environment variable is required",
        )
    })?;
    let to = std::env::var("TELNYX_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELNYX_TO environment variable is required",
        )
    })?;
    let text = std::env::var("TELNYX_TEXT")
        .unwrap_or_else(|_| "Hello from the telnyx demo.".to_owned());

    let client = TelnyxClientBuilder::from_env()?.build()?;
    let params = SendMessageParams::new(RawPhoneNumber::new(to)?)
        .with_from(RawPhoneNumber::new(from)?)
        .with_text(text)
        .with_type(MessageType::Sms);

    let message = client.messages().send(params).await?;
    println!(
        "id: {}, parts: {:?}, cost: {:?}",
        message.id, message.parts, message.cost
    );

    Ok(())
}
