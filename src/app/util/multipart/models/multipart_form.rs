use std::collections::HashMap;

use super::file_properties::FileProperties;

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub files: Vec<FileProperties>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    pub fn file(&self, field_name: &str) -> Option<&FileProperties> {
        self.files.iter().find(|f| f.field_name == field_name)
    }

    pub fn field(&self, field_name: &str) -> Option<&str> {
        self.fields.get(field_name).map(|value| value.trim())
    }
}
