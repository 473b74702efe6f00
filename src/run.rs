//! Application run modes: logger init, one-shot commands, TUI launch.

use std::io;
use std::sync::Arc;

use crate::cli::{Args, Commands};
use crate::core;
use crate::core::config::Config;

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_tui() {
        let log_path = core::paths::cache_dir().and_then(|d| {
            std::fs::create_dir_all(&d).ok()?;
            Some(d.join(format!("{}.log", core::app::NAME)))
        });
        if let Some(path) = log_path
            && let Ok(file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

/// Run a one-shot subcommand against the endpoint and print its outcome.
pub async fn run_command(command: &Commands, config: &Config, api_key: Option<&str>) {
    match command {
        Commands::Models => core::cli::run_models(config, api_key).await,
        Commands::Load {
            name,
            max_seq_len,
            cache_mode,
        } => core::cli::run_load(config, api_key, name, *max_seq_len, *cache_mode).await,
        Commands::Unload => core::cli::run_unload(config, api_key).await,
        Commands::Config { .. } => core::cli::run_config(config, api_key),
        // Handled before config is loaded.
        Commands::Completions { .. } => {}
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        format!("{:?}", panic)
    }
}

/// Launch the control panel in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    match tokio::task::spawn_blocking(move || crate::tui::run(config)).await {
        Ok(io_result) => Ok(io_result?),
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                eprintln!("TUI panic: {}", panic_message(panic));
            }
            Err(Box::new(io::Error::other("TUI thread panicked")))
        }
    }
}
