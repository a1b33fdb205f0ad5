use prest_todo::*;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let _log_guard = init_tracing_subscriber(&config);

    match &config.env_file {
        Some(path) => info!("Loaded env vars from {}", path.display()),
        None => info!(".env not used"),
    }
    info!(target: "store", "Keeping todos in {}", config.data_file.display());

    app(TodoStore::new(&config.data_file)).run(&config)?;
    Ok(())
}
