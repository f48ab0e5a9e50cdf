//! Desktop client that uploads a PDF to a question-generation server and
//! shows the questions it produces.

pub mod app;
pub mod config;
pub mod error;
pub mod headless;
pub mod upload;
pub mod utils;

pub use error::{Result, UploadError};
