//! Entities, list rows and form inputs

pub mod car;
pub mod car_class;
pub mod client;
pub mod form;
pub mod maintenance;
pub mod rental_agreement;
pub mod rental_history;
pub mod user;

pub use car::{Car, CarForm, CarInput, CarRow};
pub use car_class::{CarClass, CarClassForm, CarClassInput, CarClassRow};
pub use client::{Client, ClientForm, ClientInput, ClientRow};
pub use form::{Choice, EntityForm, FieldErrors, FormField, FormOptions, SelectOption};
pub use maintenance::{Maintenance, MaintenanceForm, MaintenanceInput, MaintenanceRow};
pub use rental_agreement::{
    RentalAgreement, RentalAgreementForm, RentalAgreementInput, RentalAgreementRow,
};
pub use rental_history::{RentalHistory, RentalHistoryForm, RentalHistoryInput, RentalHistoryRow};
pub use user::{User, UserForm, UserInput, UserRow, DEFAULT_ROLE};
