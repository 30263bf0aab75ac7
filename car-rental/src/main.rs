use anyhow::Context;
use car_rental::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    init_tracing(&config)?;

    let pool = create_pool(&config.database)
        .await
        .context("opening the database")?;

    if config.database.run_migrations {
        run_migrations(&pool).await.context("applying migrations")?;
    } else {
        tracing::info!("Skipping migrations (database.run_migrations = false)");
    }

    let state = AppState::new(pool.clone(), config.clone())?;
    seed(&pool, &config.seed, state.hasher())
        .await
        .context("seeding roles and administrator")?;

    Server::new(config).serve(router(state)).await?;

    pool.close().await;
    Ok(())
}
