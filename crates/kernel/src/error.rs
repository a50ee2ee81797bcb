use flightsim_input::BindingError;

/// Errors from the flight kernel.
#[derive(Debug, thiserror::Error)]
pub enum FlightError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid key binding: {0}")]
    Binding(#[from] BindingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
