use nectar::app;
use nectar::error::RelayError;

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    app::run().await
}
