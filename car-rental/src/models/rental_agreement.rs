//! Rental agreements between a client and a car

use chrono::NaiveDate;
use serde::Deserialize;

use super::form::{
    amount, date, format_amount, format_date, not_before, parse_id, reference, EntityForm,
    FieldErrors, FormField, FormOptions,
};

/// A stored agreement with its client's name and the car's brand and model.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RentalAgreement {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub car_id: i64,
    pub car_label: String,
    pub start_date: NaiveDate,
    pub planned_end_date: NaiveDate,
    pub actual_end_date: NaiveDate,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RentalAgreementRow {
    pub id: i64,
    pub full_name: String,
    pub license_number: String,
    pub phone_number: String,
    pub brand: String,
    pub model: String,
    pub start_date: NaiveDate,
    pub planned_end_date: NaiveDate,
    pub actual_end_date: NaiveDate,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RentalAgreementInput {
    pub client_id: i64,
    pub car_id: i64,
    pub start_date: NaiveDate,
    pub planned_end_date: NaiveDate,
    pub actual_end_date: NaiveDate,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RentalAgreementForm {
    pub id: String,
    pub client_id: String,
    pub car_id: String,
    pub start_date: String,
    pub planned_end_date: String,
    pub actual_end_date: String,
    pub total_amount: String,
}

impl EntityForm for RentalAgreementForm {
    type Entity = RentalAgreement;
    type Input = RentalAgreementInput;

    fn from_entity(agreement: &RentalAgreement) -> Self {
        Self {
            id: agreement.id.to_string(),
            client_id: agreement.client_id.to_string(),
            car_id: agreement.car_id.to_string(),
            start_date: format_date(agreement.start_date),
            planned_end_date: format_date(agreement.planned_end_date),
            actual_end_date: format_date(agreement.actual_end_date),
            total_amount: format_amount(agreement.total_amount),
        }
    }

    fn id(&self) -> Option<i64> {
        parse_id(&self.id)
    }

    fn validate(&self) -> Result<RentalAgreementInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let client_id = reference(&mut errors, "ClientId", "Client", &self.client_id);
        let car_id = reference(&mut errors, "CarId", "Car", &self.car_id);
        let start = date(&mut errors, "StartDate", "Start date", &self.start_date);
        let planned = date(
            &mut errors,
            "PlannedEndDate",
            "Planned end date",
            &self.planned_end_date,
        );
        let actual = date(
            &mut errors,
            "ActualEndDate",
            "Actual end date",
            &self.actual_end_date,
        );
        let total_amount = amount(&mut errors, "TotalAmount", "Total amount", &self.total_amount);

        not_before(&mut errors, "PlannedEndDate", "Planned end date", start, planned);
        not_before(&mut errors, "ActualEndDate", "Actual end date", start, actual);

        match (start, planned, actual) {
            (Some(start_date), Some(planned_end_date), Some(actual_end_date))
                if errors.is_empty() =>
            {
                Ok(RentalAgreementInput {
                    client_id,
                    car_id,
                    start_date,
                    planned_end_date,
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
            FormField::select("CarId", "Car", &self.car_id, &options.cars, errors),
            FormField::date("StartDate", "Start date", &self.start_date, errors),
            FormField::date(
                "PlannedEndDate",
                "Planned end date",
                &self.planned_end_date,
                errors,
            ),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RentalAgreementForm {
        RentalAgreementForm {
            client_id: "1".to_string(),
            car_id: "2".to_string(),
            start_date: "2024-06-01".to_string(),
            planned_end_date: "2024-06-05".to_string(),
            actual_end_date: "2024-06-06".to_string(),
            total_amount: "250".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_agreement() {
        let input = form().validate().unwrap();
        assert_eq!(input.client_id, 1);
        assert_eq!(input.car_id, 2);
        assert_eq!(input.total_amount, 250.0);
    }

    #[test]
    fn test_end_dates_cannot_precede_start() {
        let invalid = RentalAgreementForm {
            planned_end_date: "2024-05-30".to_string(),
            actual_end_date: "2024-05-31".to_string(),
            ..form()
        };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.get("PlannedEndDate").is_some());
        assert!(errors.get("ActualEndDate").is_some());
        assert!(errors.get("StartDate").is_none());
    }
}
