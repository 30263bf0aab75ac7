//! The six entity pages

use sqlx::SqlitePool;

use super::crud::PageController;
use crate::models::{
    Car, CarClass, CarClassForm, CarForm, CarRow, Client, ClientForm, FormOptions, Maintenance,
    MaintenanceForm, MaintenanceRow, RentalAgreement, RentalAgreementForm, RentalAgreementRow,
    RentalHistory, RentalHistoryForm, RentalHistoryRow,
};
use crate::query::{tables, ListDefinition};
use crate::repository::RepositoryResult;
use crate::stores::{
    car_choices, car_class_choices, client_choices, CarClassStore, CarStore, ClientStore,
    MaintenanceStore, RentalAgreementStore, RentalHistoryStore,
};
use crate::templates::{money, short_date, truncate, Detail, ListRow};

const DESCRIPTION_WIDTH: usize = 60;

pub struct Cars;

impl PageController for Cars {
    type Entity = Car;
    type Row = CarRow;
    type Form = CarForm;
    type Store = CarStore;

    const NAME: &'static str = "Car";

    fn list() -> &'static ListDefinition {
        &tables::CARS
    }

    fn store(pool: SqlitePool) -> CarStore {
        CarStore::new(pool)
    }

    async fn options(pool: &SqlitePool) -> RepositoryResult<FormOptions> {
        Ok(FormOptions {
            car_classes: car_class_choices(pool).await?,
            ..FormOptions::default()
        })
    }

    fn details(car: &Car) -> Vec<Detail> {
        vec![
            Detail::new("Class", &car.class_name),
            Detail::new("Brand", &car.brand),
            Detail::new("Model", &car.model),
            Detail::new("License plate", &car.license_plate),
            Detail::new("Year", car.year.to_string()),
            Detail::new("Cost per day", money(car.rental_cost_per_day)),
            Detail::new("Status", &car.status),
        ]
    }
}

impl ListRow for CarRow {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.class_name.clone(),
            self.brand.clone(),
            self.model.clone(),
            self.license_plate.clone(),
            self.year.to_string(),
            money(self.rental_cost_per_day),
            self.status.clone(),
        ]
    }
}

pub struct CarClasses;

impl PageController for CarClasses {
    type Entity = CarClass;
    type Row = CarClass;
    type Form = CarClassForm;
    type Store = CarClassStore;

    const NAME: &'static str = "Car class";

    fn list() -> &'static ListDefinition {
        &tables::CAR_CLASSES
    }

    fn store(pool: SqlitePool) -> CarClassStore {
        CarClassStore::new(pool)
    }

    fn details(class: &CarClass) -> Vec<Detail> {
        vec![
            Detail::new("Name", &class.name),
            Detail::new("Description", &class.description),
        ]
    }
}

impl ListRow for CarClass {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            truncate(&self.description, DESCRIPTION_WIDTH),
        ]
    }
}

pub struct Clients;

impl PageController for Clients {
    type Entity = Client;
    type Row = Client;
    type Form = ClientForm;
    type Store = ClientStore;

    const NAME: &'static str = "Client";

    fn list() -> &'static ListDefinition {
        &tables::CLIENTS
    }

    fn store(pool: SqlitePool) -> ClientStore {
        ClientStore::new(pool)
    }

    fn details(client: &Client) -> Vec<Detail> {
        vec![
            Detail::new("Full name", &client.full_name),
            Detail::new("License number", &client.license_number),
            Detail::new("Phone number", &client.phone_number),
        ]
    }
}

impl ListRow for Client {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.license_number.clone(),
            self.phone_number.clone(),
        ]
    }
}

pub struct Maintenances;

impl PageController for Maintenances {
    type Entity = Maintenance;
    type Row = MaintenanceRow;
    type Form = MaintenanceForm;
    type Store = MaintenanceStore;

    const NAME: &'static str = "Maintenance record";

    fn list() -> &'static ListDefinition {
        &tables::MAINTENANCES
    }

    fn store(pool: SqlitePool) -> MaintenanceStore {
        MaintenanceStore::new(pool)
    }

    async fn options(pool: &SqlitePool) -> RepositoryResult<FormOptions> {
        Ok(FormOptions {
            cars: car_choices(pool).await?,
            ..FormOptions::default()
        })
    }

    fn details(maintenance: &Maintenance) -> Vec<Detail> {
        vec![
            Detail::new("Car", &maintenance.car_label),
            Detail::new("Date", short_date(maintenance.maintenance_date)),
            Detail::new("Description", &maintenance.description),
            Detail::new("Cost", money(maintenance.cost)),
        ]
    }
}

impl ListRow for MaintenanceRow {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.brand.clone(),
            self.model.clone(),
            short_date(self.maintenance_date),
            truncate(&self.description, DESCRIPTION_WIDTH),
            money(self.cost),
        ]
    }
}

pub struct RentalAgreements;

impl PageController for RentalAgreements {
    type Entity = RentalAgreement;
    type Row = RentalAgreementRow;
    type Form = RentalAgreementForm;
    type Store = RentalAgreementStore;

    const NAME: &'static str = "Rental agreement";

    fn list() -> &'static ListDefinition {
        &tables::RENTAL_AGREEMENTS
    }

    fn store(pool: SqlitePool) -> RentalAgreementStore {
        RentalAgreementStore::new(pool)
    }

    async fn options(pool: &SqlitePool) -> RepositoryResult<FormOptions> {
        Ok(FormOptions {
            clients: client_choices(pool).await?,
            cars: car_choices(pool).await?,
            ..FormOptions::default()
        })
    }

    fn details(agreement: &RentalAgreement) -> Vec<Detail> {
        vec![
            Detail::new("Client", &agreement.client_name),
            Detail::new("Car", &agreement.car_label),
            Detail::new("Start", short_date(agreement.start_date)),
            Detail::new("Planned end", short_date(agreement.planned_end_date)),
            Detail::new("Actual end", short_date(agreement.actual_end_date)),
            Detail::new("Total amount", money(agreement.total_amount)),
        ]
    }
}

impl ListRow for RentalAgreementRow {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.license_number.clone(),
            self.phone_number.clone(),
            self.brand.clone(),
            self.model.clone(),
            short_date(self.start_date),
            short_date(self.planned_end_date),
            short_date(self.actual_end_date),
            money(self.total_amount),
        ]
    }
}

pub struct RentalHistories;

impl PageController for RentalHistories {
    type Entity = RentalHistory;
    type Row = RentalHistoryRow;
    type Form = RentalHistoryForm;
    type Store = RentalHistoryStore;

    const NAME: &'static str = "Rental history record";

    fn list() -> &'static ListDefinition {
        &tables::RENTAL_HISTORIES
    }

    fn store(pool: SqlitePool) -> RentalHistoryStore {
        RentalHistoryStore::new(pool)
    }

    async fn options(pool: &SqlitePool) -> RepositoryResult<FormOptions> {
        Ok(FormOptions {
            clients: client_choices(pool).await?,
            ..FormOptions::default()
        })
    }

    fn details(history: &RentalHistory) -> Vec<Detail> {
        vec![
            Detail::new("Client", &history.client_name),
            Detail::new("Start", short_date(history.start_date)),
            Detail::new("Actual end", short_date(history.actual_end_date)),
            Detail::new("Total amount", money(history.total_amount)),
        ]
    }
}

impl ListRow for RentalHistoryRow {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.license_number.clone(),
            self.phone_number.clone(),
            short_date(self.start_date),
            short_date(self.actual_end_date),
            money(self.total_amount),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_match_columns() {
        fn check<C: PageController>(row: C::Row) {
            assert_eq!(row.cells().len(), C::list().columns.len(), "{}", C::NAME);
        }

        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        check::<Cars>(CarRow {
            id: 1,
            class_name: "Economy".to_string(),
            brand: "Fiat".to_string(),
            model: "Panda".to_string(),
            license_plate: "F 1".to_string(),
            year: 2020,
            rental_cost_per_day: 30.0,
            status: "Available".to_string(),
        });
        check::<CarClasses>(CarClass {
            id: 1,
            name: "Economy".to_string(),
            description: String::new(),
        });
        check::<Clients>(Client {
            id: 1,
            full_name: "Ann Lee".to_string(),
            license_number: "L1".to_string(),
            phone_number: "555".to_string(),
        });
        check::<Maintenances>(MaintenanceRow {
            id: 1,
            brand: "Fiat".to_string(),
            model: "Panda".to_string(),
            maintenance_date: date,
            description: "Oil".to_string(),
            cost: 100.0,
        });
        check::<RentalAgreements>(RentalAgreementRow {
            id: 1,
            full_name: "Ann Lee".to_string(),
            license_number: "L1".to_string(),
            phone_number: "555".to_string(),
            brand: "Fiat".to_string(),
            model: "Panda".to_string(),
            start_date: date,
            planned_end_date: date,
            actual_end_date: date,
            total_amount: 90.0,
        });
        check::<RentalHistories>(RentalHistoryRow {
            id: 1,
            full_name: "Ann Lee".to_string(),
            license_number: "L1".to_string(),
            phone_number: "555".to_string(),
            start_date: date,
            actual_end_date: date,
            total_amount: 90.0,
        });
    }
}
