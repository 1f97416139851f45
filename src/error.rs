//! Application error with a process exit code attached.
//!
//! The calendar core is total and never returns this type; it is only produced
//! by the I/O edges (config, holiday sources, exports).

/// Bad CLI input, config file or local file I/O.
pub const EXIT_USAGE: u8 = 2;
/// Remote source or data-shape failures.
pub const EXIT_DATA: u8 = 4;

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

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::new(EXIT_DATA, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_exit_codes() {
        assert_eq!(AppError::usage("bad flag").exit_code(), EXIT_USAGE);
        assert_eq!(AppError::data("empty page").exit_code(), EXIT_DATA);
        assert_eq!(AppError::new(7, "x").exit_code(), 7);
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::data("Holiday API returned status 503.");
        assert_eq!(err.to_string(), "Holiday API returned status 503.");
        assert_eq!(err.message(), "Holiday API returned status 503.");
    }
}
