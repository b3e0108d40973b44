// YAC8 Emulator - Main Entry Point
//
// Resolves the configuration from the command line, opens the window and
// runs the main loop until the window is closed or Escape is pressed.

use std::process::ExitCode;
use yac8::{Config, Emulator, IdleExecutor, LoopStats, StartupError, WinitBackend};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("YAC8 Emulator v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_args(std::env::args_os());
    let (width, height) = config.physical_size();
    log::info!(
        "Resolution: {}x{}, window size: {}x{}",
        config.window_width,
        config.window_height,
        width,
        height
    );

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<LoopStats, StartupError> {
    let backend = WinitBackend::init()?;
    let emulator = Emulator::start(backend, config, IdleExecutor)?;
    Ok(emulator.run())
}
