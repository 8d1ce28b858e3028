pub mod image_request;
pub mod transcript;
