mod app;
mod cli;

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arcnav::{Config, IconCache, Navigator};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use app::App;

fn init_logging(path: &Path) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(path) {
        Ok(log_file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
        }
        Err(e) => eprintln!("failed to open log file {}: {e}", path.display()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = cli::parse_args();

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("failed to load config: {e}");
        std::process::exit(1);
    });
    if let Some(limit) = options.history_limit {
        config.history_limit = limit;
    }
    if let Some(log_file) = options.log_file.as_deref().or(config.log_file.as_deref()) {
        init_logging(log_file);
    }

    log::info!("browsing {}", options.path.display());
    let tree = arcnav::load_directory(&options.path)?;

    let icons = Arc::new(IconCache::with_mime_types());
    let mut navigator = Navigator::new(icons, &config);
    navigator.open_archive(tree)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    App::new(navigator).run(stdin.lock(), stdout.lock())?;
    Ok(())
}
