#![allow(dead_code)]

pub const APPLICATION_NAME: &str = "plate-lens";
pub const APPLICATION_TITLE: &str = "Plate Lens";

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://127.0.0.1:5000";

pub const UPLOAD_ENDPOINT: &str = "/upload";
pub const UPLOAD_FIELD_NAME: &str = "file";

pub const UPLOADED_IMAGE_BASE_PATH: &str = "/static/upload/";
pub const PROCESSED_IMAGE_BASE_PATH: &str = "/static/predict/";
pub const PLATE_CROP_BASE_PATH: &str = "/static/roi/";

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const CONFIG_DIR_NAME: &str = "plate-lens";
