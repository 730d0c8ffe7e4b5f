#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskCoordinates {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for MaskCoordinates {
    fn default() -> Self {
        Self {
            top: 0.1,
            bottom: 0.9,
            left: 0.1,
            right: 0.9,
        }
    }
}
