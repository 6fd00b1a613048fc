use dotenv::dotenv;
use intel_sync::config::Config;
use intel_sync::server;
use intel_sync::server::storage::Storage;

#[rocket::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let storage = Storage::from_config();

    log::info!("Serving JSON data from {}", storage.json_path().display());

    let app = server::build(rocket::custom(Config::rocket_figment()), storage);

    if let Err(err) = app.launch().await {
        log::error!("Couldn't start the server: {}", err);

        std::process::exit(1);
    }
}
