use crate::config::Config;
use rocket::fs::TempFile;
use rocket::tokio::fs;
use serde_json::Value;
use std::io;
use std::path::PathBuf;

/// Files kept by the server: the served JSON document and uploaded files,
/// all under one upload directory.
#[derive(Debug, Clone)]
pub struct Storage {
    upload_dir: PathBuf,
    json_file: String,
}

impl Storage {
    pub fn new(upload_dir: PathBuf, json_file: String) -> Self {
        Self {
            upload_dir,
            json_file,
        }
    }

    pub fn from_config() -> Self {
        Self::new(Config::upload_dir(), Config::json_file())
    }

    pub fn json_path(&self) -> PathBuf {
        self.upload_dir.join(&self.json_file)
    }

    pub fn upload_path(&self, file_name: &str) -> PathBuf {
        self.upload_dir.join(file_name)
    }

    pub async fn load_json(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.json_path()).await {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn save_json(&self, value: &Value) -> io::Result<()> {
        fs::create_dir_all(&self.upload_dir).await?;

        let data = serde_json::to_vec(value)?;
        let path = self.json_path();
        let tmp_path = self.upload_dir.join(format!("{}.tmp", self.json_file));

        fs::write(&tmp_path, data).await?;
        fs::rename(&tmp_path, &path).await
    }

    pub async fn save_upload(&self, file: &mut TempFile<'_>, file_name: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.upload_dir).await?;

        let path = self.upload_path(file_name);
        file.copy_to(&path).await?;

        Ok(path)
    }
}
