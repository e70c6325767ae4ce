use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookyError {
    #[error("not initialized: run 'booky init'")]
    NotInitialized,

    #[error("unknown view: {0}")]
    UnknownView(String),

    #[error("unknown reports view: {0}")]
    UnknownReportsView(String),

    #[error("unknown template tag: {0}")]
    UnknownTag(String),

    #[error("invalid navigation step '{step}': {reason}")]
    InvalidStep { step: String, reason: String },

    #[error("cadence not found: {0}")]
    CadenceNotFound(String),

    #[error("prospect not found: {0}")]
    ProspectNotFound(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("please enter a valid email address: {0}")]
    InvalidEmail(String),

    #[error("name is required")]
    EmptyName,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookyError>;
