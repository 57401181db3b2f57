mod http_recognition_backend;

pub use http_recognition_backend::HttpRecognitionBackend;
