#[tokio::main]
async fn main() {
    calshare_backend::run().await;
}
