//! Car classes (economy, SUV, ...)

use serde::Deserialize;

use super::form::{parse_id, required_text, EntityForm, FieldErrors, FormField, FormOptions};

/// A stored car class; it is also its own list row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CarClass {
    pub id: i64,
    pub name: String,
    pub description: String,
}

pub type CarClassRow = CarClass;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarClassInput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarClassForm {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl EntityForm for CarClassForm {
    type Entity = CarClass;
    type Input = CarClassInput;

    fn from_entity(class: &CarClass) -> Self {
        Self {
            id: class.id.to_string(),
            name: class.name.clone(),
            description: class.description.clone(),
        }
    }

    fn id(&self) -> Option<i64> {
        parse_id(&self.id)
    }

    fn validate(&self) -> Result<CarClassInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let input = CarClassInput {
            name: required_text(&mut errors, "Name", "Name", &self.name),
            description: required_text(&mut errors, "Description", "Description", &self.description),
        };
        errors.into_result(input)
    }

    fn fields(&self, _options: &FormOptions, errors: &FieldErrors) -> Vec<FormField> {
        vec![
            FormField::text("Name", "Name", &self.name, errors),
            FormField::text("Description", "Description", &self.description, errors),
        ]
    }
}
