use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "extratos={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server_settings) = settings.server else {
        tracing::error!("no server settings found; nothing to run");
        return Ok(());
    };

    let db = parse_database(&server_settings.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let bind = server_settings
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server_settings.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, settings.messages, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    sea_orm::Database::connect(url).await
}
