//! Numeric form state and keystroke sanitizing.

/// Keeps only ASCII digits and `.` from a keystroke.
///
/// Repeated decimal points are kept as typed; such values become NaN when the
/// form is converted to an input vector.
pub fn sanitize_numeric_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Converts a sanitized field value the way a JavaScript `Number()` call would:
/// blank is zero, anything that is not a single well-formed decimal is NaN.
pub fn to_number(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    if !value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return f64::NAN;
    }
    value.parse::<f64>().unwrap_or(f64::NAN)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericField {
    label: &'static str,
    value: String,
}

impl NumericField {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_filled(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Ordered field values of one numeric screen. The order is the order of the
/// endpoint's input vector and never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: Vec<NumericField>,
}

impl FormState {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            fields: labels
                .iter()
                .map(|&label| NumericField {
                    label,
                    value: String::new(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[NumericField] {
        &self.fields
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(NumericField::value)
    }

    /// Stores the sanitized form of `raw` in field `index`. Returns `false` when
    /// the index is out of range.
    pub fn set(&mut self, index: usize, raw: &str) -> bool {
        match self.fields.get_mut(index) {
            Some(field) => {
                field.value = sanitize_numeric_input(raw);
                true
            }
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(NumericField::is_filled)
    }

    pub fn missing_labels(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|field| !field.is_filled())
            .map(NumericField::label)
            .collect()
    }

    pub fn input_vector(&self) -> Vec<f64> {
        self.fields
            .iter()
            .map(|field| to_number(&field.value))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
