#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    ImageToImage,
    Inpaint,
}

impl PipelineKind {
    pub fn value(&self) -> String {
        match *self {
            Self::ImageToImage => "img2img".to_string(),
            Self::Inpaint => "inpaint".to_string(),
        }
    }
}
