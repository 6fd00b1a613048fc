use intel_sync::server;
use intel_sync::server::storage::Storage;
use rocket::data::{Limits, ToByteUnit};
use rocket::local::blocking::Client;
use tempfile::TempDir;

pub struct TestServer {
    pub client: Client,
    pub dir: TempDir,
}

pub fn test_server() -> TestServer {
    let dir = tempfile::tempdir().expect("temporary upload directory");
    let client = Client::tracked(server::rocket(test_storage(&dir))).expect("valid rocket instance");

    TestServer { client, dir }
}

pub fn test_server_with_json_limit(bytes: u64) -> TestServer {
    let dir = tempfile::tempdir().expect("temporary upload directory");
    let limits = Limits::default().limit("json", bytes.bytes());
    let figment = rocket::Config::figment().merge(("limits", limits));
    let app = server::build(rocket::custom(figment), test_storage(&dir));
    let client = Client::tracked(app).expect("valid rocket instance");

    TestServer { client, dir }
}

fn test_storage(dir: &TempDir) -> Storage {
    Storage::new(dir.path().join("uploads"), "data.json".to_string())
}
