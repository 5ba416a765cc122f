#[tokio::main]
async fn main() -> anyhow::Result<()> {
    signal_desk_lib::run().await
}
