#[tokio::main]
async fn main() -> anyhow::Result<()> {
    folium::tui::run().await
}
