use guardrail_snake::bot::Bot;
use guardrail_snake::config::Config;
use guardrail_snake::debug_logger::DebugLogger;
use guardrail_snake::handler;
use log::{error, info};
use std::env;
use std::process;

fn main() {
    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable. However, Rocket looks at the `ROCKET_PORT` environment variable.
    // If we find a value for `PORT`, we set `ROCKET_PORT` to that value.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Battlesnake Server...");

    // Load configuration once at startup
    let config = Config::load_or_default();

    // The environment is settled; only now start the async runtime
    if let Err(e) = rocket::execute(serve(config)) {
        error!("Server stopped with an error: {}", e);
        process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), rocket::Error> {
    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let bot = Bot::with_logger(config, debug_logger);

    handler::build(bot).launch().await?;
    Ok(())
}
