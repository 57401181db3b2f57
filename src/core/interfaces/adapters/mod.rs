mod recognition_backend;

pub use recognition_backend::RecognitionBackend;
