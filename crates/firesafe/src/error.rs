use crate::api::ApiError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::booking::{BookingId, FetchError, LifecycleError, SchedulingError};
use crate::workflows::buildings::RegistrationError;
use crate::workflows::inspection::SubmissionError;
use std::fmt;

/// Coarse classification callers use to decide how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    SubmissionFailed,
    FetchFailed,
    InvalidStateTransition,
    Registration,
    Scheduling,
    NotFound,
    Configuration,
}

impl ErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::SubmissionFailed => "submission_failed",
            Self::FetchFailed => "fetch_failed",
            Self::InvalidStateTransition => "invalid_state_transition",
            Self::Registration => "registration",
            Self::Scheduling => "scheduling",
            Self::NotFound => "not_found",
            Self::Configuration => "configuration",
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Api(ApiError),
    Fetch(FetchError),
    UnknownBooking(BookingId),
    Submission(SubmissionError),
    Registration(RegistrationError),
    Scheduling(SchedulingError),
    Report(csv::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) | AppError::Telemetry(_) => ErrorKind::Configuration,
            AppError::Io(_) | AppError::Api(_) | AppError::Report(_) => ErrorKind::Configuration,
            AppError::Fetch(_) => ErrorKind::FetchFailed,
            AppError::UnknownBooking(_) => ErrorKind::NotFound,
            AppError::Submission(err) => match err {
                SubmissionError::Validation(_) => ErrorKind::Validation,
                SubmissionError::Lifecycle(LifecycleError::Validation(_)) => {
                    ErrorKind::Validation
                }
                SubmissionError::Lifecycle(_) => ErrorKind::InvalidStateTransition,
                SubmissionError::Rejected { .. } | SubmissionError::Unreachable(_) => {
                    ErrorKind::SubmissionFailed
                }
            },
            AppError::Registration(_) => ErrorKind::Registration,
            AppError::Scheduling(_) => ErrorKind::Scheduling,
        }
    }

    /// Whether repeating the same action unchanged may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::SubmissionFailed | ErrorKind::FetchFailed
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Api(err) => write!(f, "api client error: {}", err),
            AppError::Fetch(err) => write!(f, "{}", err),
            AppError::UnknownBooking(id) => write!(f, "booking {} is not in your listing", id),
            AppError::Submission(err) => write!(f, "{}", err),
            AppError::Registration(err) => write!(f, "{}", err),
            AppError::Scheduling(err) => write!(f, "{}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Api(err) => Some(err),
            AppError::Fetch(err) => Some(err),
            AppError::UnknownBooking(_) => None,
            AppError::Submission(err) => Some(err),
            AppError::Registration(err) => Some(err),
            AppError::Scheduling(err) => Some(err),
            AppError::Report(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ApiError> for AppError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<FetchError> for AppError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<SubmissionError> for AppError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<LifecycleError> for AppError {
    fn from(value: LifecycleError) -> Self {
        Self::Submission(SubmissionError::Lifecycle(value))
    }
}

impl From<RegistrationError> for AppError {
    fn from(value: RegistrationError) -> Self {
        Self::Registration(value)
    }
}

impl From<SchedulingError> for AppError {
    fn from(value: SchedulingError) -> Self {
        Self::Scheduling(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Report(value)
    }
}
