//! Rental clients

use serde::Deserialize;

use super::form::{parse_id, required_text, EntityForm, FieldErrors, FormField, FormOptions};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Client {
    pub id: i64,
    pub full_name: String,
    pub license_number: String,
    pub phone_number: String,
}

pub type ClientRow = Client;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInput {
    pub full_name: String,
    pub license_number: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClientForm {
    pub id: String,
    pub full_name: String,
    pub license_number: String,
    pub phone_number: String,
}

impl EntityForm for ClientForm {
    type Entity = Client;
    type Input = ClientInput;

    fn from_entity(client: &Client) -> Self {
        Self {
            id: client.id.to_string(),
            full_name: client.full_name.clone(),
            license_number: client.license_number.clone(),
            phone_number: client.phone_number.clone(),
        }
    }

    fn id(&self) -> Option<i64> {
        parse_id(&self.id)
    }

    fn validate(&self) -> Result<ClientInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let input = ClientInput {
            full_name: required_text(&mut errors, "FullName", "Full name", &self.full_name),
            license_number: required_text(
                &mut errors,
                "LicenseNumber",
                "License number",
                &self.license_number,
            ),
            phone_number: required_text(
                &mut errors,
                "PhoneNumber",
                "Phone number",
                &self.phone_number,
            ),
        };
        errors.into_result(input)
    }

    fn fields(&self, _options: &FormOptions, errors: &FieldErrors) -> Vec<FormField> {
        vec![
            FormField::text("FullName", "Full name", &self.full_name, errors),
            FormField::text("LicenseNumber", "License number", &self.license_number, errors),
            FormField::text("PhoneNumber", "Phone number", &self.phone_number, errors),
        ]
    }
}
