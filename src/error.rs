use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown {kind} shape `{name}`")]
    UnknownShape { kind: &'static str, name: String },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("datum `{date}` has no numeric field `{field}`")]
    MissingField { date: String, field: String },

    #[error("category `{0}` is not part of the view data")]
    UnknownCategory(String),

    #[error("chart has no view at index {0}")]
    MissingView(usize),

    #[error("active dataset is empty")]
    EmptyDataset,

    #[error("component holds no mounted chart")]
    NotMounted,

    #[error("component is already mounted")]
    AlreadyMounted,
}
