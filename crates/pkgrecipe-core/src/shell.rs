//! Shared pieces of the standalone command-line mode

use std::process::ExitCode;

/// Outcome of a standalone run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStatus {
    /// Everything ran and the output document was written
    Success,
    /// A processor or output handler error was reported on the diagnostic stream
    Reported,
}

impl ShellStatus {
    pub const fn code(self) -> u8 {
        match self {
            ShellStatus::Success => 0,
            ShellStatus::Reported => 10,
        }
    }
}

impl From<ShellStatus> for ExitCode {
    fn from(status: ShellStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Split a `key=value` argument at its first `=`
pub fn split_argument(arg: &str) -> Option<(&str, &str)> {
    arg.split_once('=')
}
