use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported date kind: {0}")]
    UnsupportedDateKind(String),

    #[error("Predicate failed on headline \"{node}\": {source}")]
    Predicate {
        node: String,
        #[source]
        source: Box<AgendaError>,
    },

    #[error("Invalid query: {0}")]
    Query(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgendaError {
    /// Strips any headline context, returning the error that started it all.
    pub fn root_cause(&self) -> &AgendaError {
        match self {
            AgendaError::Predicate { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn at_node(self, node: &str) -> Self {
        AgendaError::Predicate {
            node: node.to_string(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AgendaError>;
