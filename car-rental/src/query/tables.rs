//! List definitions for every entity page.

use super::definition::{Column, Comparison, FilterField, ListDefinition, SortColumn};
use super::sort::{SortField, SortState};

pub static CARS: ListDefinition = ListDefinition {
    entity: "Car",
    route: "Cars",
    title: "Cars",
    source: "cars c JOIN car_classes cc ON cc.id = c.car_class_id",
    projection: "c.id, cc.name AS class_name, c.brand, c.model, c.license_plate, c.year, \
                 c.rental_cost_per_day, c.status",
    columns: &[
        Column::plain("Class"),
        Column::plain("Brand"),
        Column::plain("Model"),
        Column::plain("License plate"),
        Column::plain("Year"),
        Column::sortable("Cost per day"),
        Column::plain("Status"),
    ],
    filter: FilterField {
        param: "RentalCostPerDay",
        cookie: "CarRentalCostPerDay",
        column: "c.rental_cost_per_day",
        comparison: Comparison::Equal,
        label: "Cost per day",
        all_label: "All costs",
    },
    sort: Some(SortColumn {
        cookie: "CarSortOrder",
        field: SortField::RentalCostPerDay,
        column: "c.rental_cost_per_day",
    }),
    default_sort: SortState::RentalCostPerDayAsc,
};

pub static CAR_CLASSES: ListDefinition = ListDefinition {
    entity: "CarClass",
    route: "CarClasses",
    title: "Car classes",
    source: "car_classes",
    projection: "id, name, description",
    columns: &[Column::plain("Name"), Column::plain("Description")],
    filter: FilterField {
        param: "SearchName",
        cookie: "CarClassSearchName",
        column: "name",
        comparison: Comparison::Contains,
        label: "Name",
        all_label: "All classes",
    },
    sort: None,
    default_sort: SortState::No,
};

pub static CLIENTS: ListDefinition = ListDefinition {
    entity: "Client",
    route: "Clients",
    title: "Clients",
    source: "clients",
    projection: "id, full_name, license_number, phone_number",
    columns: &[
        Column::plain("Full name"),
        Column::plain("License number"),
        Column::sortable("Phone number"),
    ],
    filter: FilterField {
        param: "PhoneNumber",
        cookie: "ClientPhoneNumber",
        column: "phone_number",
        comparison: Comparison::Contains,
        label: "Phone number",
        all_label: "All phone numbers",
    },
    sort: Some(SortColumn {
        cookie: "ClientSortOrder",
        field: SortField::PhoneNumber,
        column: "phone_number",
    }),
    default_sort: SortState::PhoneNumberAsc,
};

pub static MAINTENANCES: ListDefinition = ListDefinition {
    entity: "Maintenance",
    route: "Maintenances",
    title: "Maintenance",
    source: "maintenances m JOIN cars c ON c.id = m.car_id",
    projection: "m.id, c.brand, c.model, m.maintenance_date, m.description, m.cost",
    columns: &[
        Column::plain("Brand"),
        Column::plain("Model"),
        Column::plain("Date"),
        Column::plain("Description"),
        Column::sortable("Cost"),
    ],
    filter: FilterField {
        param: "Cost",
        cookie: "MaintenanceCost",
        column: "m.cost",
        comparison: Comparison::Equal,
        label: "Cost",
        all_label: "All costs",
    },
    sort: Some(SortColumn {
        cookie: "MaintenanceSortOrder",
        field: SortField::Cost,
        column: "m.cost",
    }),
    default_sort: SortState::CostAsc,
};

pub static RENTAL_AGREEMENTS: ListDefinition = ListDefinition {
    entity: "RentalAgreement",
    route: "RentalAgreements",
    title: "Rental agreements",
    source: "rental_agreements ra \
             JOIN clients cl ON cl.id = ra.client_id \
             JOIN cars c ON c.id = ra.car_id",
    projection: "ra.id, cl.full_name, cl.license_number, cl.phone_number, c.brand, c.model, \
                 ra.start_date, ra.planned_end_date, ra.actual_end_date, ra.total_amount",
    columns: &[
        Column::plain("Client"),
        Column::plain("License number"),
        Column::plain("Phone number"),
        Column::plain("Brand"),
        Column::plain("Model"),
        Column::plain("Start"),
        Column::plain("Planned end"),
        Column::plain("Actual end"),
        Column::sortable("Total amount"),
    ],
    filter: FilterField {
        param: "TotalAmount",
        cookie: "RentalTotalAmount",
        column: "ra.total_amount",
        comparison: Comparison::Equal,
        label: "Total amount",
        all_label: "All amounts",
    },
    sort: Some(SortColumn {
        cookie: "RentalSortOrder",
        field: SortField::TotalAmount,
        column: "ra.total_amount",
    }),
    default_sort: SortState::No,
};

pub static RENTAL_HISTORIES: ListDefinition = ListDefinition {
    entity: "RentalHistory",
    route: "RentalHistories",
    title: "Rental history",
    source: "rental_histories rh JOIN clients cl ON cl.id = rh.client_id",
    projection: "rh.id, cl.full_name, cl.license_number, cl.phone_number, \
                 rh.start_date, rh.actual_end_date, rh.total_amount",
    columns: &[
        Column::plain("Client"),
        Column::plain("License number"),
        Column::plain("Phone number"),
        Column::plain("Start"),
        Column::plain("Actual end"),
        Column::plain("Total amount"),
    ],
    filter: FilterField {
        param: "TotalAmount",
        cookie: "RentalHistoryTotalAmount",
        column: "rh.total_amount",
        comparison: Comparison::Equal,
        label: "Total amount",
        all_label: "All amounts",
    },
    sort: None,
    default_sort: SortState::No,
};

/// All list definitions, in navigation order.
pub static ALL: [&ListDefinition; 6] = [
    &CARS,
    &CAR_CLASSES,
    &CLIENTS,
    &MAINTENANCES,
    &RENTAL_AGREEMENTS,
    &RENTAL_HISTORIES,
];
