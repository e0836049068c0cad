use king_capture_chess::config::EngineConfig;

fn main() {
    env_logger::init();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    log::info!("King Capture Chess - {}s per player", config.clock_seconds);

    king_capture_chess::mock::run_interactive_terminal(config);
}
