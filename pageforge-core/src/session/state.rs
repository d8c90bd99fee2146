use serde::Serialize;

/// Lifecycle of a single generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed {
        message: String,
    },
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// `Loaded` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded | Self::Failed { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed { .. } => "failed",
        }
    }
}
