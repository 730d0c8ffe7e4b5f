pub mod device;
pub mod pipeline_kind;
