use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
///
/// Per-symbol failures are not `CliError`s; they are rendered inline and turn
/// the exit code to 3.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("symbol task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Task(_) => 6,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_from_partial_failure() {
        let io = CliError::from(std::io::Error::other("broken pipe"));
        assert_eq!(io.exit_code(), 10);

        let json = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert_eq!(CliError::from(json).exit_code(), 4);
    }
}
