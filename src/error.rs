//! Process-level error type.
//!
//! Exit codes used by the `eed` binary:
//!
//! - 2: bad invocation or local I/O (export paths, session links)
//! - 4: fetch failure (network, non-2xx, malformed feed document)
//! - 5: parse failure inside a draw record (names the field + record)
//! - 6: contract violation (a date-index lookup missed)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Bad invocation or local I/O.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Network failure, non-2xx status, or a feed body of the wrong shape.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    /// Malformed field inside an otherwise well-shaped record.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(5, message)
    }

    /// An internal invariant was broken upstream; fail fast.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::new(6, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
