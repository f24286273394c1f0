use std::io;

use smsgate::{HandlerFactory, Overrides, UserData};
use tracing_subscriber::EnvFilter;

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn init_logging() {
    // RUST_LOG wins over the default.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,smsgate=debug,sqlx=warn,reqwest=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let provider = std::env::var("SMSGATE_PROVIDER").unwrap_or_else(|_| "smsc.ru".to_owned());
    let logger = std::env::var("SMSGATE_LOGGER").unwrap_or_else(|_| "text".to_owned());

    let mut overrides = Overrides::new();
    overrides.insert("login".to_owned(), required("SMSGATE_LOGIN")?);
    overrides.insert("password".to_owned(), required("SMSGATE_PASSWORD")?);
    if let Ok(db_uri) = std::env::var("SMSGATE_DB_URI") {
        overrides.insert("db_uri".to_owned(), db_uri);
    }

    let phone = required("SMSGATE_PHONE")?;
    let message = std::env::var("SMSGATE_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsgate demo.".to_owned());

    let handler = HandlerFactory::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?
        .create(&provider, &logger, &overrides)
        .await?;

    let mut user_data = UserData::new();
    user_data.insert("phone".to_owned(), phone.clone());
    user_data.insert("phones".to_owned(), phone);
    user_data.insert("mes".to_owned(), message);
    handler.send(&user_data).await?;

    if let Some(store) = handler.records() {
        for row in store.results().await? {
            println!(
                "success: {}, phone: {}, error_code: {:?}, error_msg: {:?}",
                row.success, row.phone, row.error_code, row.error_msg
            );
        }
    }

    Ok(())
}
