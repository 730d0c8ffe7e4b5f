#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineHandle {
    pub id: String,
    pub model: String,
}
