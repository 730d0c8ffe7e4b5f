pub mod backend;
pub mod colorizer;
pub mod enums;
pub mod errors;
pub mod inpainter;
pub mod models;
pub mod remote;
pub mod service;
