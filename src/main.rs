use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(error) = qrcode_registry::run().await {
        error!("qrcode-registry exited with error: {:#}", error);
        std::process::exit(1);
    }
}
