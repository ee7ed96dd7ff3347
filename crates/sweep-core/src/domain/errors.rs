use std::path::PathBuf;

pub type SweepResult<T> = Result<T, SweepError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepErrorCategory {
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl SweepErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }
}

/// Domain failure reported by an evaluator for a single input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EvaluationFailure {
    message: String,
}

impl EvaluationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SweepError {
    #[error("invalid sample range [{start}, {end}] with {count} samples; need count >= 2 and end > start")]
    InvalidRange { start: f64, end: f64, count: usize },

    #[error(
        "cannot partition {samples} samples across {workers} workers; need samples >= 1 and 1 <= workers <= {}",
        crate::partition::MAX_WORKERS
    )]
    InvalidPartition { samples: usize, workers: usize },

    #[error("evaluation failed for sample {index} (input {input}): {cause}")]
    Evaluation {
        index: usize,
        input: f64,
        #[source]
        cause: EvaluationFailure,
    },

    #[error("aggregated results are missing {} indices (first missing: {})", missing.len(), missing.first().copied().unwrap_or_default())]
    IncompleteResult { missing: Vec<usize> },

    #[error("sample index {index} was reported more than once")]
    DuplicateResult { index: usize },

    #[error("result index {index} is outside the sweep of {count} samples")]
    OutOfRangeResult { index: usize, count: usize },

    #[error("{0}")]
    Config(String),

    #[error("failed to write '{}': {message}", path.display())]
    Sink { path: PathBuf, message: String },

    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}

impl SweepError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn sink(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Sink {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub const fn category(&self) -> SweepErrorCategory {
        match self {
            Self::InvalidRange { .. } | Self::InvalidPartition { .. } | Self::Config(_) => {
                SweepErrorCategory::InputValidationError
            }
            Self::Sink { .. } => SweepErrorCategory::IoSystemError,
            Self::Evaluation { .. } => SweepErrorCategory::ComputationError,
            Self::IncompleteResult { .. }
            | Self::DuplicateResult { .. }
            | Self::OutOfRangeResult { .. }
            | Self::WorkerPool(_) => SweepErrorCategory::InternalError,
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INPUT.RANGE",
            Self::InvalidPartition { .. } => "INPUT.PARTITION",
            Self::Config(_) => "INPUT.CONFIG",
            Self::Sink { .. } => "IO.SINK",
            Self::Evaluation { .. } => "RUN.EVALUATION",
            Self::IncompleteResult { .. } => "SYS.INCOMPLETE_RESULT",
            Self::DuplicateResult { .. } => "SYS.DUPLICATE_RESULT",
            Self::OutOfRangeResult { .. } => "SYS.RESULT_INDEX",
            Self::WorkerPool(_) => "SYS.WORKER_POOL",
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder(), self)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}
