use std::string::FromUtf8Error;

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Failed to read manifest source {name}: {cause}")]
    Resolve {
        name: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("Manifest source {name} is not valid UTF-8: {cause}")]
    Decode {
        name: String,
        #[source]
        cause: FromUtf8Error,
    },

    #[error("Malformed manifest {name}: {cause}")]
    Xml {
        name: String,
        #[source]
        cause: roxmltree::Error,
    },

    #[error("Invalid classpath pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PluginError {
    /// Name of the manifest source the error refers to, if any.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::Resolve { name, .. } | Self::Decode { name, .. } | Self::Xml { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }
}
