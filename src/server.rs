use crate::config::Config;
use crate::server::storage::Storage;
use log::{error, info};
use rocket::form::{Form, FromForm};
use rocket::fs::TempFile;
use rocket::http::{ContentType, Status};
use rocket::serde::json::Json;
use rocket::{catch, catchers, get, post, routes, Build, Request, Rocket, State};
use serde_json::{json, Value};

pub mod storage;

type JsonResponse = (Status, Json<Value>);

#[derive(FromForm)]
pub struct Upload<'r> {
    file: TempFile<'r>,
}

#[get("/get/data")]
async fn get_data(storage: &State<Storage>) -> Result<(ContentType, Vec<u8>), JsonResponse> {
    match storage.load_json().await {
        Ok(Some(data)) => Ok((ContentType::JSON, data)),
        Ok(None) => Err(error_response(Status::NotFound, "No data available")),
        Err(err) => {
            error!("Failed to read {}: {}", storage.json_path().display(), err);

            Err(error_response(
                Status::InternalServerError,
                "Failed to read data",
            ))
        }
    }
}

#[post("/add/data", format = "json", data = "<payload>", rank = 1)]
async fn add_json(storage: &State<Storage>, payload: Json<Value>) -> JsonResponse {
    match storage.save_json(&payload).await {
        Ok(()) => {
            info!("Saved JSON data to {}", storage.json_path().display());

            message_response("JSON data saved successfully")
        }
        Err(err) => {
            error!("Failed to save {}: {}", storage.json_path().display(), err);

            error_response(Status::InternalServerError, "Failed to save data")
        }
    }
}

#[post("/add/data", format = "multipart/form-data", data = "<upload>", rank = 2)]
async fn add_file(storage: &State<Storage>, upload: Form<Upload<'_>>) -> JsonResponse {
    let mut file = upload.into_inner().file;

    let file_name = match json_file_name(&file) {
        Some(file_name) => file_name,
        None => return invalid_data_format(),
    };

    match storage.save_upload(&mut file, &file_name).await {
        Ok(path) => {
            info!("Saved uploaded file to {}", path.display());

            message_response("File uploaded successfully")
        }
        Err(err) => {
            error!("Failed to save uploaded file {}: {}", file_name, err);

            error_response(Status::InternalServerError, "Failed to save file")
        }
    }
}

#[post("/add/data", rank = 3)]
fn add_unsupported() -> JsonResponse {
    invalid_data_format()
}

#[catch(400)]
fn bad_request() -> JsonResponse {
    invalid_data_format()
}

#[catch(422)]
fn unprocessable_entity() -> JsonResponse {
    invalid_data_format()
}

#[catch(413)]
fn payload_too_large() -> JsonResponse {
    error_response(Status::PayloadTooLarge, "Data too large")
}

#[catch(404)]
fn not_found(_request: &Request) -> JsonResponse {
    error_response(Status::NotFound, "Not found")
}

#[catch(500)]
fn internal_error() -> JsonResponse {
    error_response(Status::InternalServerError, "Internal server error")
}

// sanitized name of an uploaded `.json` file
fn json_file_name(file: &TempFile<'_>) -> Option<String> {
    let raw_name = file.raw_name()?.dangerous_unsafe_unsanitized_raw().as_str();

    if !raw_name.to_ascii_lowercase().ends_with(".json") {
        return None;
    }

    file.name().map(|name| format!("{name}.json"))
}

fn message_response(message: &str) -> JsonResponse {
    (Status::Ok, Json(json!({ "message": message })))
}

fn error_response(status: Status, message: &str) -> JsonResponse {
    (status, Json(json!({ "error": message })))
}

fn invalid_data_format() -> JsonResponse {
    error_response(Status::BadRequest, "Invalid data format")
}

pub fn build(base: Rocket<Build>, storage: Storage) -> Rocket<Build> {
    base.manage(storage)
        .mount(
            Config::api_prefix(),
            routes![get_data, add_json, add_file, add_unsupported],
        )
        .register(
            "/",
            catchers![
                bad_request,
                unprocessable_entity,
                payload_too_large,
                not_found,
                internal_error
            ],
        )
}

pub fn rocket(storage: Storage) -> Rocket<Build> {
    build(rocket::build(), storage)
}
