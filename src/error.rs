use thiserror::Error;

#[derive(Error, Debug)]
pub enum DdashError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Goal item not found: {0}")]
    ItemNotFound(String),

    #[error("Sub-task not found: {0}")]
    SubItemNotFound(String),

    #[error("D-Day not found: {0}")]
    DDayNotFound(String),

    #[error("At least one project must exist; refusing to delete the last one")]
    LastProject,

    #[error("Something went wrong rendering the dashboard; your data file is intact")]
    RenderFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DdashError>;
