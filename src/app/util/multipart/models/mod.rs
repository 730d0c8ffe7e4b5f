pub mod file_properties;
pub mod multipart_form;
