#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = taskcast_server::config::Config::from_env()?;
    taskcast_server::web::start_web_server(config).await
}
