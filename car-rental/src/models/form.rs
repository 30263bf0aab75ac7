//! Form input handling shared by the entity pages
//!
//! Forms arrive as raw strings so that rejected input can be shown back to
//! the user unchanged. Each form validates into a typed input value, or into
//! [`FieldErrors`] keyed by the form field name.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

/// Date format used by `<input type="date">`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation messages for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: Vec<(&'static str, String)>,
    form: Vec<String>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A form-level error that is not tied to one field.
    #[must_use]
    pub fn form_error(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add_form(message);
        errors
    }

    /// Record a message for `field`; the first message per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.fields.push((field, message.into()));
        }
    }

    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn form_errors(&self) -> &[String] {
        &self.form
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len() + self.form.len()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// One `<option>` of a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A referenceable row offered in a select list.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub label: String,
}

/// Select-list contents for the forms that reference other rows.
///
/// Only the lists a form needs are loaded; the rest stay empty.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    pub car_classes: Vec<Choice>,
    pub cars: Vec<Choice>,
    pub clients: Vec<Choice>,
    pub roles: Vec<String>,
}

/// One rendered form input.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Form field name, e.g. `RentalCostPerDay`
    pub name: &'static str,
    pub label: &'static str,
    /// `text`, `number`, `date`, `email`, `password` or `select`
    pub input_type: &'static str,
    pub value: String,
    /// Step attribute for number inputs
    pub step: &'static str,
    pub options: Vec<SelectOption>,
    pub error: Option<String>,
}

impl FormField {
    fn build(
        name: &'static str,
        label: &'static str,
        input_type: &'static str,
        value: &str,
        errors: &FieldErrors,
    ) -> Self {
        Self {
            name,
            label,
            input_type,
            value: value.to_string(),
            step: "",
            options: Vec::new(),
            error: errors.get(name).map(str::to_string),
        }
    }

    #[must_use]
    pub fn text(name: &'static str, label: &'static str, value: &str, errors: &FieldErrors) -> Self {
        Self::build(name, label, "text", value, errors)
    }

    #[must_use]
    pub fn email(name: &'static str, label: &'static str, value: &str, errors: &FieldErrors) -> Self {
        Self::build(name, label, "email", value, errors)
    }

    /// Password inputs never echo the submitted value.
    #[must_use]
    pub fn password(name: &'static str, label: &'static str, errors: &FieldErrors) -> Self {
        Self::build(name, label, "password", "", errors)
    }

    #[must_use]
    pub fn date(name: &'static str, label: &'static str, value: &str, errors: &FieldErrors) -> Self {
        Self::build(name, label, "date", value, errors)
    }

    #[must_use]
    pub fn integer(
        name: &'static str,
        label: &'static str,
        value: &str,
        errors: &FieldErrors,
    ) -> Self {
        Self {
            step: "1",
            ..Self::build(name, label, "number", value, errors)
        }
    }

    #[must_use]
    pub fn money(name: &'static str, label: &'static str, value: &str, errors: &FieldErrors) -> Self {
        Self {
            step: "0.01",
            ..Self::build(name, label, "number", value, errors)
        }
    }

    /// Select list over referenceable rows; the current value is preselected.
    #[must_use]
    pub fn select(
        name: &'static str,
        label: &'static str,
        value: &str,
        choices: &[Choice],
        errors: &FieldErrors,
    ) -> Self {
        let options = choices
            .iter()
            .map(|choice| {
                let id = choice.id.to_string();
                SelectOption {
                    selected: id == value.trim(),
                    value: id,
                    label: choice.label.clone(),
                }
            })
            .collect();

        Self {
            options,
            ..Self::build(name, label, "select", value, errors)
        }
    }

    /// Select list over plain string values.
    #[must_use]
    pub fn select_values(
        name: &'static str,
        label: &'static str,
        value: &str,
        values: &[String],
        errors: &FieldErrors,
    ) -> Self {
        let options = values
            .iter()
            .map(|v| SelectOption {
                value: v.clone(),
                label: v.clone(),
                selected: v == value,
            })
            .collect();

        Self {
            options,
            ..Self::build(name, label, "select", value, errors)
        }
    }

    #[must_use]
    pub fn is_select(&self) -> bool {
        self.input_type == "select"
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A create/edit form bound to one entity type.
///
/// `Default` is the blank Create form.
pub trait EntityForm: DeserializeOwned + Default + Clone + Send + Sync + 'static {
    /// Stored record the Edit form starts from
    type Entity;
    /// Validated values handed to the store
    type Input: Send;

    /// Edit form prefilled from a stored record.
    fn from_entity(entity: &Self::Entity) -> Self;

    /// The hidden `Id` field, when present and numeric.
    fn id(&self) -> Option<i64>;

    /// Validate the raw input.
    fn validate(&self) -> Result<Self::Input, FieldErrors>;

    /// Inputs to render, with values and messages attached.
    fn fields(&self, options: &FormOptions, errors: &FieldErrors) -> Vec<FormField>;
}

/// Parse the hidden `Id` field.
#[must_use]
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Non-blank text, trimmed.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, format!("{label} is required."));
    }
    value.to_string()
}

/// A non-negative, finite amount.
pub fn amount(errors: &mut FieldErrors, field: &'static str, label: &str, raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, format!("{label} is required."));
        return 0.0;
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        Ok(value) if value.is_finite() => {
            errors.add(field, format!("{label} cannot be negative."));
            0.0
        }
        _ => {
            errors.add(field, format!("{label} must be a number."));
            0.0
        }
    }
}

/// Id of a referenced row; must be a positive integer.
pub fn reference(errors: &mut FieldErrors, field: &'static str, label: &str, raw: &str) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => id,
        _ => {
            errors.add(field, format!("Select a {}.", label.to_lowercase()));
            0
        }
    }
}

/// An integer within `range`.
pub fn integer_in(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &str,
    range: std::ops::RangeInclusive<i64>,
) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(value) if range.contains(&value) => value,
        Ok(_) => {
            errors.add(
                field,
                format!(
                    "{label} must be between {} and {}.",
                    range.start(),
                    range.end()
                ),
            );
            0
        }
        Err(_) => {
            errors.add(field, format!("{label} must be a whole number."));
            0
        }
    }
}

/// A `YYYY-MM-DD` date.
pub fn date(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, format!("{label} is required."));
        return None;
    }

    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, format!("{label} must be a date (YYYY-MM-DD)."));
            None
        }
    }
}

/// Record an error when `end` precedes `start`.
pub fn not_before(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.add(field, format!("{label} cannot be before the start date."));
        }
    }
}

/// Amount as shown in form inputs.
#[must_use]
pub fn format_amount(value: f64) -> String {
    value.to_string()
}

#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}
