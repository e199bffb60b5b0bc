use telnyx::resources::{ListPhoneNumbersParams, PhoneNumberFilter, PhoneNumberSort};
use telnyx::{PageParams, TelnyxClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = TelnyxClientBuilder::from_env()?.build()?;

    let mut filter = PhoneNumberFilter::new();
    if let Ok(tag) = std::env::var("TELNYX_TAG") {
        filter = filter.with_tag(tag);
    }
    let params = ListPhoneNumbersParams::new()
        .with_page(PageParams::new(1, 50)?)
        .with_filter(filter)?
        .with_sort(PhoneNumberSort::PurchasedAtDesc);

    let numbers = client.phone_numbers().list(params).await?.collect_all().await?;
    for number in &numbers {
        let status = number
            .status
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("{} {:<16} {}", number.id, number.phone_number, status);
    }
    println!("{} number(s)", numbers.len());

    Ok(())
}
