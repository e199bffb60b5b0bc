use std::io::{self, BufRead, Write};

use telnyx::resources::{CreateVerifiedNumberParams, VerificationMethod, VerifyCodeParams};
use telnyx::{PhoneNumber, RawPhoneNumber, TelnyxClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let raw = std::env::var("TELNYX_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELNYX_PHONE environment variable is required",
        )
    })?;
    let phone: RawPhoneNumber = PhoneNumber::parse(None, raw)?.into();

    let client = TelnyxClientBuilder::from_env()?.build()?;
    let requested = client
        .verified_numbers()
        .create(CreateVerifiedNumberParams::new(
            phone.clone(),
            VerificationMethod::Sms,
        ))
        .await?;
    println!("verification code sent to {}", requested.phone_number);

    print!("code: ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin().lock().read_line(&mut code)?;

    let verified = client
        .verified_numbers()
        .verify(&phone, VerifyCodeParams::new(code.trim())?)
        .await?;
    println!(
        "{} verified at {:?}",
        verified.phone_number, verified.verified_at
    );

    Ok(())
}
