use crate::pipelines::errors::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cuda,
    Cpu,
}

impl Device {
    pub fn resolve(configured: Option<&str>, cuda_available: bool) -> Result<Self, PipelineError> {
        let Some(configured) = configured.map(str::trim).filter(|d| !d.is_empty()) else {
            return Ok(if cuda_available { Self::Cuda } else { Self::Cpu });
        };

        match configured.to_ascii_lowercase().as_str() {
            "cuda" => {
                if !cuda_available {
                    tracing::warn!("device forced to cuda but backend reports no cuda support");
                }
                Ok(Self::Cuda)
            }
            "cpu" => Ok(Self::Cpu),
            _ => Err(PipelineError::UnsupportedDevice(configured.to_string())),
        }
    }

    pub fn value(&self) -> String {
        match *self {
            Self::Cuda => "cuda".to_string(),
            Self::Cpu => "cpu".to_string(),
        }
    }

    pub fn torch_dtype(&self) -> String {
        match *self {
            Self::Cuda => "float16".to_string(),
            Self::Cpu => "float32".to_string(),
        }
    }

    pub fn memory_optimizations(&self) -> bool {
        matches!(self, Self::Cuda)
    }
}
