use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    routerchat::run().await
}
