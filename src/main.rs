#[tokio::main]
async fn main() {
    if let Err(e) = fiscus::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
