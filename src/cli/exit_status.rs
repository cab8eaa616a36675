use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): the command completed and produced output.
/// - `Error` (1): the command failed (compile error, bad config, I/O error).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(1),
        }
    }
}
