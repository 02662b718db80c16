use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No image loaded: {0}")]
    NoImageLoaded(&'static str),

    #[error("Invalid angle {0}: must be within [-360, 360] degrees")]
    InvalidAngle(f64),

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Resize to {requested} px exceeds the {ceiling} px limit")]
    ResizeTooLarge { requested: u32, ceiling: u32 },

    #[error("Resize percentage {0}% is out of range (1-100)")]
    InvalidPercentage(u32),

    #[error("Failed to save image: {0}")]
    SaveFailed(String),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
