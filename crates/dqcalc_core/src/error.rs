use std::fmt;

use crate::model::InputField;
use crate::validation::PercentRange;

/// Why an input field was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    OutOfRange { value: f64, range: PercentRange },
    NotFinite { value: f64 },
    ZeroSampleSize,
    UnsupportedConfidence { value: f64 },
}

/// An input field outside its declared range. Raised before any computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: InputField,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: InputField, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field.path();
        match &self.kind {
            ValidationErrorKind::OutOfRange { value, range } => {
                write!(f, "{field} = {value} is outside {range}")
            }
            ValidationErrorKind::NotFinite { value } => {
                write!(f, "{field} must be a finite number (got {value})")
            }
            ValidationErrorKind::ZeroSampleSize => {
                write!(f, "{field} must be at least 1 user")
            }
            ValidationErrorKind::UnsupportedConfidence { value } => {
                write!(f, "{field} = {value} is not one of 90, 95, 99")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Inputs that pass validation but combine into an undefined metric
#[derive(Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    /// Observed control conversion is zero, so lift is undefined
    ZeroControlRate,
    /// No users survive attrition in a group
    ZeroEffectiveSample,
    /// An intermediate quantity became NaN or infinite
    NonFinite { quantity: &'static str },
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::ZeroControlRate => {
                write!(f, "observed control conversion is zero, lift is undefined")
            }
            ArithmeticError::ZeroEffectiveSample => {
                write!(f, "effective sample size is zero")
            }
            ArithmeticError::NonFinite { quantity } => {
                write!(f, "{quantity} is not a finite number")
            }
        }
    }
}

impl std::error::Error for ArithmeticError {}

/// Failure of a single engine computation
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Validation(ValidationError),
    Arithmetic(ArithmeticError),
}

impl EngineError {
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Validation(e) => write!(f, "input out of range: {e}"),
            EngineError::Arithmetic(e) => {
                write!(f, "inputs combine to make the metric undefined: {e}")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Validation(e) => Some(e),
            EngineError::Arithmetic(e) => Some(e),
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        EngineError::Validation(err)
    }
}

impl From<ArithmeticError> for EngineError {
    fn from(err: ArithmeticError) -> Self {
        EngineError::Arithmetic(err)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors in a sensitivity sweep configuration
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    NoParameters,
    ZeroSteps { field: InputField },
    /// Confidence is categorical and cannot be swept numerically
    UnsweepableField(InputField),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::NoParameters => write!(f, "sweep has no parameters"),
            AnalysisError::ZeroSteps { field } => {
                write!(f, "sweep over {} has zero steps", field.path())
            }
            AnalysisError::UnsweepableField(field) => {
                write!(f, "{} cannot be swept", field.path())
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
