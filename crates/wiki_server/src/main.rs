use std::process::ExitCode;

use log::{error, info};
use wiki_core::{core_version, init_logging};
use wiki_server::{start_server, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("wiki_server: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, config.log_destination()) {
        eprintln!("wiki_server: {err}");
        return ExitCode::FAILURE;
    }

    info!(
        "event=startup module=main status=ok core_version={} store={} address={} log_level={}",
        core_version(),
        config.store,
        config.bind_address(),
        config.log_level
    );
    info!(
        "event=config_loaded module=main status=ok entries_dir={} db_path={} sections_file={}",
        config.entries_dir.display(),
        config.db_path.display(),
        config
            .sections_file
            .as_deref()
            .map_or_else(|| "builtin".to_string(), |path| path.display().to_string())
    );

    match start_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=startup module=main status=error error={err}");
            eprintln!("wiki_server: {err}");
            ExitCode::FAILURE
        }
    }
}
