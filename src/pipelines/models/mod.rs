pub mod load_spec;
pub mod pipeline_handle;
pub mod pipeline_input;
