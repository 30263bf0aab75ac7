//! Cars in the fleet

use serde::Deserialize;

use super::form::{
    amount, format_amount, integer_in, parse_id, reference, required_text, EntityForm,
    FieldErrors, FormField, FormOptions,
};

/// Earliest and latest accepted model years.
pub const YEAR_RANGE: std::ops::RangeInclusive<i64> = 1900..=2100;

/// Status given to new cars.
pub const DEFAULT_STATUS: &str = "Available";

/// A stored car, with the name of its class for display.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Car {
    pub id: i64,
    pub car_class_id: i64,
    pub class_name: String,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub year: i64,
    pub rental_cost_per_day: f64,
    pub status: String,
}

/// A row of the car list.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CarRow {
    pub id: i64,
    pub class_name: String,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub year: i64,
    pub rental_cost_per_day: f64,
    pub status: String,
}

/// Validated car values.
#[derive(Debug, Clone, PartialEq)]
pub struct CarInput {
    pub car_class_id: i64,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub year: i64,
    pub rental_cost_per_day: f64,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarForm {
    pub id: String,
    pub car_class_id: String,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub year: String,
    pub rental_cost_per_day: String,
    pub status: String,
}

impl Default for CarForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            car_class_id: String::new(),
            brand: String::new(),
            model: String::new(),
            license_plate: String::new(),
            year: YEAR_RANGE.start().to_string(),
            rental_cost_per_day: String::new(),
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

impl EntityForm for CarForm {
    type Entity = Car;
    type Input = CarInput;

    fn from_entity(car: &Car) -> Self {
        Self {
            id: car.id.to_string(),
            car_class_id: car.car_class_id.to_string(),
            brand: car.brand.clone(),
            model: car.model.clone(),
            license_plate: car.license_plate.clone(),
            year: car.year.to_string(),
            rental_cost_per_day: format_amount(car.rental_cost_per_day),
            status: car.status.clone(),
        }
    }

    fn id(&self) -> Option<i64> {
        parse_id(&self.id)
    }

    fn validate(&self) -> Result<CarInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let input = CarInput {
            car_class_id: reference(&mut errors, "CarClassId", "Car class", &self.car_class_id),
            brand: required_text(&mut errors, "Brand", "Brand", &self.brand),
            model: required_text(&mut errors, "Model", "Model", &self.model),
            license_plate: required_text(
                &mut errors,
                "LicensePlate",
                "License plate",
                &self.license_plate,
            ),
            year: integer_in(&mut errors, "Year", "Year", &self.year, YEAR_RANGE),
            rental_cost_per_day: amount(
                &mut errors,
                "RentalCostPerDay",
                "Cost per day",
                &self.rental_cost_per_day,
            ),
            status: required_text(&mut errors, "Status", "Status", &self.status),
        };

        errors.into_result(input)
    }

    fn fields(&self, options: &FormOptions, errors: &FieldErrors) -> Vec<FormField> {
        vec![
            FormField::select(
                "CarClassId",
                "Car class",
                &self.car_class_id,
                &options.car_classes,
                errors,
            ),
            FormField::text("Brand", "Brand", &self.brand, errors),
            FormField::text("Model", "Model", &self.model, errors),
            FormField::text("LicensePlate", "License plate", &self.license_plate, errors),
            FormField::integer("Year", "Year", &self.year, errors),
            FormField::money(
                "RentalCostPerDay",
                "Cost per day",
                &self.rental_cost_per_day,
                errors,
            ),
            FormField::text("Status", "Status", &self.status, errors),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CarForm {
        CarForm {
            car_class_id: "2".to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            license_plate: "KA 1234".to_string(),
            year: "2021".to_string(),
            rental_cost_per_day: "45.5".to_string(),
            ..CarForm::default()
        }
    }

    #[test]
    fn test_blank_form_defaults() {
        let form = CarForm::default();
        assert_eq!(form.year, "1900");
        assert_eq!(form.status, "Available");
        assert_eq!(form.id(), None);
    }

    #[test]
    fn test_valid_form() {
        let input = valid_form().validate().unwrap();
        assert_eq!(input.car_class_id, 2);
        assert_eq!(input.year, 2021);
        assert_eq!(input.rental_cost_per_day, 45.5);
        assert_eq!(input.status, "Available");
    }

    #[test]
    fn test_invalid_form_collects_field_errors() {
        let form = CarForm {
            brand: "  ".to_string(),
            year: "1899".to_string(),
            rental_cost_per_day: "-3".to_string(),
            car_class_id: String::new(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("Brand").is_some());
        assert!(errors.get("Year").is_some());
        assert!(errors.get("RentalCostPerDay").is_some());
        assert!(errors.get("CarClassId").is_some());
        assert!(errors.get("Model").is_none());
    }

    #[test]
    fn test_form_deserializes_pascal_case_fields() {
        let form: CarForm = serde_urlencoded::from_str(
            "Id=4&CarClassId=1&Brand=Kia&Model=Rio&LicensePlate=X1&Year=2019&RentalCostPerDay=30&Status=Rented&_csrf=t",
        )
        .unwrap();
        assert_eq!(form.id(), Some(4));
        assert_eq!(form.brand, "Kia");
        assert_eq!(form.status, "Rented");
    }

    #[test]
    fn test_fields_carry_errors_and_values() {
        let form = CarForm {
            brand: String::new(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        let fields = form.fields(&FormOptions::default(), &errors);
        let brand = fields.iter().find(|f| f.name == "Brand").unwrap();
        assert!(brand.has_error());
        let model = fields.iter().find(|f| f.name == "Model").unwrap();
        assert_eq!(model.value, "Corolla");
        assert!(!model.has_error());
    }
}
