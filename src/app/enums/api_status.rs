#[derive(Clone)]
pub enum ApiStatus {
    Healthy,
}

impl ApiStatus {
    pub fn value(&self) -> String {
        match *self {
            Self::Healthy => "healthy".to_string(),
        }
    }
}
