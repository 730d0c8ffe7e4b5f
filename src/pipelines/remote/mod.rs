pub mod codec;
pub mod models;
pub mod service;
pub mod structs;
