//! Maintenance records for cars

use chrono::NaiveDate;
use serde::Deserialize;

use super::form::{
    amount, date, format_amount, format_date, parse_id, reference, required_text, EntityForm,
    FieldErrors, FormField, FormOptions,
};

/// A stored maintenance record with the serviced car's brand and model.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Maintenance {
    pub id: i64,
    pub car_id: i64,
    pub car_label: String,
    pub maintenance_date: NaiveDate,
    pub description: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MaintenanceRow {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub maintenance_date: NaiveDate,
    pub description: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceInput {
    pub car_id: i64,
    pub maintenance_date: NaiveDate,
    pub description: String,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MaintenanceForm {
    pub id: String,
    pub car_id: String,
    pub maintenance_date: String,
    pub description: String,
    pub cost: String,
}

impl EntityForm for MaintenanceForm {
    type Entity = Maintenance;
    type Input = MaintenanceInput;

    fn from_entity(record: &Maintenance) -> Self {
        Self {
            id: record.id.to_string(),
            car_id: record.car_id.to_string(),
            maintenance_date: format_date(record.maintenance_date),
            description: record.description.clone(),
            cost: format_amount(record.cost),
        }
    }

    fn id(&self) -> Option<i64> {
        parse_id(&self.id)
    }

    fn validate(&self) -> Result<MaintenanceInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let car_id = reference(&mut errors, "CarId", "Car", &self.car_id);
        let maintenance_date = date(&mut errors, "MaintenanceDate", "Date", &self.maintenance_date);
        let description = required_text(&mut errors, "Description", "Description", &self.description);
        let cost = amount(&mut errors, "Cost", "Cost", &self.cost);

        match maintenance_date {
            Some(maintenance_date) if errors.is_empty() => Ok(MaintenanceInput {
                car_id,
                maintenance_date,
                description,
                cost,
            }),
            _ => Err(errors),
        }
    }

    fn fields(&self, options: &FormOptions, errors: &FieldErrors) -> Vec<FormField> {
        vec![
            FormField::select("CarId", "Car", &self.car_id, &options.cars, errors),
            FormField::date("MaintenanceDate", "Date", &self.maintenance_date, errors),
            FormField::text("Description", "Description", &self.description, errors),
            FormField::money("Cost", "Cost", &self.cost, errors),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() {
        let form = MaintenanceForm {
            car_id: "1".to_string(),
            maintenance_date: "2024-03-01".to_string(),
            description: "Brake pads".to_string(),
            cost: "100".to_string(),
            ..Default::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.maintenance_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(input.cost, 100.0);
    }

    #[test]
    fn test_bad_date() {
        let form = MaintenanceForm {
            car_id: "1".to_string(),
            maintenance_date: "yesterday".to_string(),
            description: "Tyres".to_string(),
            cost: "80".to_string(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("MaintenanceDate").is_some());
        assert_eq!(errors.len(), 1);
    }
}
