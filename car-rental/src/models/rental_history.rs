//! Closed rentals kept for reference

use chrono::NaiveDate;
use serde::Deserialize;

use super::form::{
    amount, date, format_amount, format_date, not_before, parse_id, reference, EntityForm,
    FieldErrors, FormField, FormOptions,
};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RentalHistory {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub start_date: NaiveDate,
    pub actual_end_date: NaiveDate,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RentalHistoryRow {
    pub id: i64,
    pub full_name: String,
    pub license_number: String,
    pub phone_number: String,
    pub start_date: NaiveDate,
    pub actual_end_date: NaiveDate,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RentalHistoryInput {
    pub client_id: i64,
    pub start_date: NaiveDate,
    pub actual_end_date: NaiveDate,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RentalHistoryForm {
    pub id: String,
    pub client_id: String,
    pub start_date: String,
    pub actual_end_date: String,
    pub total_amount: String,
}

impl EntityForm for RentalHistoryForm {
    type Entity = RentalHistory;
    type Input = RentalHistoryInput;

    fn from_entity(history: &RentalHistory) -> Self {
        Self {
            id: history.id.to_string(),
            client_id: history.client_id.to_string(),
            start_date: format_date(history.start_date),
            actual_end_date: format_date(history.actual_end_date),
            total_amount: format_amount(history.total_amount),
        }
    }

    fn id(&self) -> Option<i64> {
        parse_id(&self.id)
    }

    fn validate(&self) -> Result<RentalHistoryInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let client_id = reference(&mut errors, "ClientId", "Client", &self.client_id);
        let start = date(&mut errors, "StartDate", "Start date", &self.start_date);
        let end = date(
            &mut errors,
            "ActualEndDate",
            "Actual end date",
            &self.actual_end_date,
        );
        let total_amount = amount(&mut errors, "TotalAmount", "Total amount", &self.total_amount);
        not_before(&mut errors, "ActualEndDate", "Actual end date", start, end);

        match (start, end) {
            (Some(start_date), Some(actual_end_date)) if errors.is_empty() => {
                Ok(RentalHistoryInput {
                    client_id,
                    start_date,
                    actual_end_date,
                    total_amount,
                })
            }
            _ => Err(errors),
        }
    }

    fn fields(&self, options: &FormOptions, errors: &FieldErrors) -> Vec<FormField> {
        vec![
            FormField::select("ClientId", "Client", &self.client_id, &options.clients, errors),
            FormField::date("StartDate", "Start date", &self.start_date, errors),
            FormField::date(
                "ActualEndDate",
                "Actual end date",
                &self.actual_end_date,
                errors,
            ),
            FormField::money("TotalAmount", "Total amount", &self.total_amount, errors),
        ]
    }
}
