//! Input form: field bounds and the in-progress edit buffer.

use dqcalc_core::{ExperimentInput, InputField, ValidationError};

use crate::util::format::format_count;

/// Bounds and step size of one form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub field: InputField,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Decimal places shown and kept when stepping
    pub decimals: usize,
}

impl FieldSpec {
    const fn new(field: InputField, min: f64, max: f64, step: f64, decimals: usize) -> Self {
        Self {
            field,
            min,
            max,
            step,
            decimals,
        }
    }

    const fn error_rate(field: InputField) -> Self {
        Self::new(field, 0.0, 50.0, 0.5, 1)
    }

    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// `current` moved by `steps` increments, rounded and clamped to bounds
    pub fn stepped(&self, current: f64, steps: i32) -> f64 {
        let factor = 10f64.powi(self.decimals as i32);
        let moved = current + self.step * f64::from(steps);
        ((moved * factor).round() / factor).clamp(self.min, self.max)
    }

    pub fn format(&self, value: f64) -> String {
        match self.field {
            InputField::SampleSize => format_count(value),
            InputField::Confidence => format!("{value:.0}%"),
            _ => format!("{:.*}", self.decimals, value),
        }
    }
}

/// Form layout, in display order
pub const FORM_FIELDS: [FieldSpec; 12] = [
    FieldSpec::new(InputField::SampleSize, 100.0, 1_000_000.0, 1000.0, 0),
    FieldSpec::new(InputField::BaselineConversion, 0.1, 99.9, 0.1, 1),
    FieldSpec::new(InputField::ExpectedLift, -50.0, 100.0, 0.5, 1),
    FieldSpec::new(InputField::Confidence, 90.0, 99.0, 0.0, 0),
    FieldSpec::error_rate(InputField::ControlEventLoss),
    FieldSpec::error_rate(InputField::ControlIdError),
    FieldSpec::error_rate(InputField::ControlPartialData),
    FieldSpec::error_rate(InputField::VariationEventLoss),
    FieldSpec::error_rate(InputField::VariationIdError),
    FieldSpec::error_rate(InputField::VariationPartialData),
    FieldSpec::error_rate(InputField::SegmentationError),
    FieldSpec::error_rate(InputField::TimeframeBias),
];

pub fn spec_for(field: InputField) -> Option<&'static FieldSpec> {
    FORM_FIELDS.iter().find(|spec| spec.field == field)
}

/// Why an edit was not applied
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    NotANumber(String),
    OutOfBounds { field: InputField, value: f64 },
    Invalid(ValidationError),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::NotANumber(text) => write!(f, "'{}' is not a number", text),
            FormError::OutOfBounds { field, value } => match spec_for(*field) {
                Some(spec) => write!(
                    f,
                    "{} must be between {} and {} (got {})",
                    field.label(),
                    spec.format(spec.min),
                    spec.format(spec.max),
                    value
                ),
                None => write!(f, "{} is out of bounds (got {})", field.label(), value),
            },
            FormError::Invalid(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for FormError {}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        FormError::Invalid(err)
    }
}

#[derive(Debug, Default)]
pub struct FormState {
    pub selected: usize,
    /// Text typed since editing began; `None` when not editing
    pub buffer: Option<String>,
}

impl FormState {
    pub fn selected_spec(&self) -> &'static FieldSpec {
        &FORM_FIELDS[self.selected % FORM_FIELDS.len()]
    }

    pub fn is_editing(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn select_next(&mut self) {
        self.buffer = None;
        self.selected = (self.selected + 1) % FORM_FIELDS.len();
    }

    pub fn select_prev(&mut self) {
        self.buffer = None;
        self.selected = (self.selected + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
    }

    /// Start editing the selected field with an empty buffer
    pub fn begin_edit(&mut self) {
        self.buffer = Some(String::new());
    }

    /// Append a typed character. Only digits and '.' are accepted.
    pub fn push_char(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || c == '.') {
            return false;
        }
        self.buffer.get_or_insert_with(String::new).push(c);
        true
    }

    /// Flip the sign of the value being typed
    pub fn toggle_sign(&mut self) {
        let buffer = self.buffer.get_or_insert_with(String::new);
        if buffer.starts_with('-') {
            buffer.remove(0);
        } else {
            buffer.insert(0, '-');
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = &mut self.buffer {
            buffer.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.buffer = None;
    }

    /// Apply the edit buffer to `input`.
    ///
    /// Returns `Ok(false)` when nothing was being edited. The buffer is
    /// cleared whether or not the value was accepted.
    pub fn commit(&mut self, input: &mut ExperimentInput) -> Result<bool, FormError> {
        let Some(text) = self.buffer.take() else {
            return Ok(false);
        };
        let spec = self.selected_spec();

        let value: f64 = text
            .trim()
            .parse()
            .map_err(|_| FormError::NotANumber(text.clone()))?;
        if !spec.contains(value) {
            return Err(FormError::OutOfBounds {
                field: spec.field,
                value,
            });
        }

        spec.field.set_value(input, value)?;
        Ok(true)
    }

    /// Step the selected field. Confidence cycles through its levels.
    pub fn step(&mut self, input: &mut ExperimentInput, steps: i32) -> Result<bool, FormError> {
        self.buffer = None;
        let spec = self.selected_spec();

        if spec.field == InputField::Confidence {
            input.confidence = if steps >= 0 {
                input.confidence.next()
            } else {
                input.confidence.prev()
            };
            return Ok(true);
        }

        let current = spec.field.value(input);
        let next = spec.stepped(current, steps);
        if next == current {
            return Ok(false);
        }
        spec.field.set_value(input, next)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqcalc_core::ConfidenceLevel;

    fn select(form: &mut FormState, field: InputField) {
        form.selected = FORM_FIELDS
            .iter()
            .position(|spec| spec.field == field)
            .unwrap();
    }

    #[test]
    fn test_form_covers_every_field_once() {
        for field in InputField::ALL {
            assert_eq!(FORM_FIELDS.iter().filter(|s| s.field == field).count(), 1);
        }
    }

    #[test]
    fn test_stepping_clamps_and_rounds() {
        let baseline = spec_for(InputField::BaselineConversion).unwrap();
        assert_eq!(baseline.stepped(10.0, 1), 10.1);
        assert_eq!(baseline.stepped(99.9, 1), 99.9);
        assert_eq!(baseline.stepped(0.1, -5), 0.1);

        let sample = spec_for(InputField::SampleSize).unwrap();
        assert_eq!(sample.stepped(10_000.0, 1), 11_000.0);
        assert_eq!(sample.stepped(500.0, -1), 100.0);
    }

    #[test]
    fn test_step_updates_input() {
        let mut form = FormState::default();
        let mut input = ExperimentInput::default();

        select(&mut form, InputField::VariationPartialData);
        assert_eq!(form.step(&mut input, 2), Ok(true));
        assert_eq!(input.variation.partial_data, 8.0);

        // Already at the floor
        select(&mut form, InputField::ControlIdError);
        input.control.id_error = 0.0;
        assert_eq!(form.step(&mut input, -1), Ok(false));
    }

    #[test]
    fn test_step_cycles_confidence() {
        let mut form = FormState::default();
        let mut input = ExperimentInput::default();
        select(&mut form, InputField::Confidence);

        form.step(&mut input, 1).unwrap();
        assert_eq!(input.confidence, ConfidenceLevel::NinetyNine);
        form.step(&mut input, 1).unwrap();
        assert_eq!(input.confidence, ConfidenceLevel::Ninety);
        form.step(&mut input, -1).unwrap();
        assert_eq!(input.confidence, ConfidenceLevel::NinetyNine);
    }

    #[test]
    fn test_commit_typed_value() {
        let mut form = FormState::default();
        let mut input = ExperimentInput::default();
        select(&mut form, InputField::ExpectedLift);

        form.begin_edit();
        for c in "12.5".chars() {
            assert!(form.push_char(c));
        }
        assert!(!form.push_char('x'));
        form.toggle_sign();
        assert_eq!(form.buffer.as_deref(), Some("-12.5"));
        assert!(form.is_editing());

        assert_eq!(form.commit(&mut input), Ok(true));
        assert_eq!(input.expected_lift, -12.5);
        assert!(!form.is_editing());
        assert_eq!(form.commit(&mut input), Ok(false));
    }

    #[test]
    fn test_commit_rejections() {
        let mut form = FormState::default();
        let mut input = ExperimentInput::default();

        select(&mut form, InputField::SampleSize);
        form.buffer = Some("50".to_string());
        assert_eq!(
            form.commit(&mut input),
            Err(FormError::OutOfBounds {
                field: InputField::SampleSize,
                value: 50.0
            })
        );
        assert_eq!(input.sample_size, 10_000);

        form.buffer = Some("1.2.3".to_string());
        assert!(matches!(form.commit(&mut input), Err(FormError::NotANumber(_))));

        select(&mut form, InputField::Confidence);
        form.buffer = Some("97".to_string());
        assert!(matches!(form.commit(&mut input), Err(FormError::Invalid(_))));
        assert_eq!(input.confidence, ConfidenceLevel::NinetyFive);
    }

    #[test]
    fn test_backspace_and_cancel() {
        let mut form = FormState::default();
        form.toggle_sign();
        form.toggle_sign();
        assert_eq!(form.buffer.as_deref(), Some(""));
        form.push_char('4');
        form.push_char('2');
        form.backspace();
        assert_eq!(form.buffer.as_deref(), Some("4"));

        form.cancel_edit();
        assert!(!form.is_editing());
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = FormError::OutOfBounds {
            field: InputField::SampleSize,
            value: 50.0,
        };
        assert_eq!(
            err.to_string(),
            "Sample Size (users) must be between 100 and 1,000,000 (got 50)"
        );
    }
}
