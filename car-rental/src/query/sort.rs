//! Sort states and the header-toggle view model.

use std::fmt;
use std::str::FromStr;

use crate::repository::OrderDirection;

/// Every sort order a list page can be in.
///
/// Persisted in cookies by variant name and parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortState {
    /// Relation order as returned by the store
    #[default]
    No,
    RentalCostPerDayAsc,
    RentalCostPerDayDesc,
    TotalAmountAsc,
    TotalAmountDesc,
    CostAsc,
    CostDesc,
    PhoneNumberAsc,
    PhoneNumberDesc,
}

impl SortState {
    pub const ALL: [SortState; 9] = [
        SortState::No,
        SortState::RentalCostPerDayAsc,
        SortState::RentalCostPerDayDesc,
        SortState::TotalAmountAsc,
        SortState::TotalAmountDesc,
        SortState::CostAsc,
        SortState::CostDesc,
        SortState::PhoneNumberAsc,
        SortState::PhoneNumberDesc,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::RentalCostPerDayAsc => "RentalCostPerDayAsc",
            Self::RentalCostPerDayDesc => "RentalCostPerDayDesc",
            Self::TotalAmountAsc => "TotalAmountAsc",
            Self::TotalAmountDesc => "TotalAmountDesc",
            Self::CostAsc => "CostAsc",
            Self::CostDesc => "CostDesc",
            Self::PhoneNumberAsc => "PhoneNumberAsc",
            Self::PhoneNumberDesc => "PhoneNumberDesc",
        }
    }

    /// The field and direction this state sorts by, `None` for [`SortState::No`].
    #[must_use]
    pub const fn field(&self) -> Option<(SortField, OrderDirection)> {
        match self {
            Self::No => None,
            Self::RentalCostPerDayAsc => {
                Some((SortField::RentalCostPerDay, OrderDirection::Ascending))
            }
            Self::RentalCostPerDayDesc => {
                Some((SortField::RentalCostPerDay, OrderDirection::Descending))
            }
            Self::TotalAmountAsc => Some((SortField::TotalAmount, OrderDirection::Ascending)),
            Self::TotalAmountDesc => Some((SortField::TotalAmount, OrderDirection::Descending)),
            Self::CostAsc => Some((SortField::Cost, OrderDirection::Ascending)),
            Self::CostDesc => Some((SortField::Cost, OrderDirection::Descending)),
            Self::PhoneNumberAsc => Some((SortField::PhoneNumber, OrderDirection::Ascending)),
            Self::PhoneNumberDesc => Some((SortField::PhoneNumber, OrderDirection::Descending)),
        }
    }

    /// Direction applied to `field`, if this state sorts by it.
    #[must_use]
    pub fn direction_for(&self, field: SortField) -> Option<OrderDirection> {
        match self.field() {
            Some((f, direction)) if f == field => Some(direction),
            _ => None,
        }
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortStateError(String);

impl fmt::Display for ParseSortStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort order: {}", self.0)
    }
}

impl std::error::Error for ParseSortStateError {}

impl FromStr for SortState {
    type Err = ParseSortStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSortStateError(s.to_string()))
    }
}

/// A sortable column with an ascending/descending toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    RentalCostPerDay,
    TotalAmount,
    Cost,
    PhoneNumber,
}

impl SortField {
    #[must_use]
    pub const fn asc(&self) -> SortState {
        match self {
            Self::RentalCostPerDay => SortState::RentalCostPerDayAsc,
            Self::TotalAmount => SortState::TotalAmountAsc,
            Self::Cost => SortState::CostAsc,
            Self::PhoneNumber => SortState::PhoneNumberAsc,
        }
    }

    #[must_use]
    pub const fn desc(&self) -> SortState {
        match self {
            Self::RentalCostPerDay => SortState::RentalCostPerDayDesc,
            Self::TotalAmount => SortState::TotalAmountDesc,
            Self::Cost => SortState::CostDesc,
            Self::PhoneNumber => SortState::PhoneNumberDesc,
        }
    }

    /// Lower-case label used in descriptions.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RentalCostPerDay => "cost per day",
            Self::TotalAmount => "total amount",
            Self::Cost => "cost",
            Self::PhoneNumber => "phone number",
        }
    }
}

/// Sort metadata handed to the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortViewModel {
    pub current: SortState,
    pub field: SortField,
}

impl SortViewModel {
    #[must_use]
    pub fn new(current: SortState, field: SortField) -> Self {
        Self { current, field }
    }

    /// State the column header links to: descending when the list is
    /// currently ascending on this field, ascending otherwise.
    #[must_use]
    pub fn toggle(&self) -> SortState {
        if self.current == self.field.asc() {
            self.field.desc()
        } else {
            self.field.asc()
        }
    }

    /// Direction currently applied to the field, for the header arrow.
    #[must_use]
    pub fn active_direction(&self) -> Option<OrderDirection> {
        self.current.direction_for(self.field)
    }

    /// Human-readable description, e.g. "By cost (ascending)".
    #[must_use]
    pub fn describe(&self) -> String {
        describe_sort(self.current, Some(self.field))
    }
}

/// Description of `state` for a list whose sortable field is `field`.
///
/// A state that does not belong to the field leaves the list unsorted.
#[must_use]
pub fn describe_sort(state: SortState, field: Option<SortField>) -> String {
    match field.and_then(|f| state.direction_for(f).map(|d| (f, d))) {
        Some((f, OrderDirection::Ascending)) => format!("By {} (ascending)", f.label()),
        Some((f, OrderDirection::Descending)) => format!("By {} (descending)", f.label()),
        None => "Unsorted".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "costdesc".parse::<SortState>().unwrap(),
            SortState::CostDesc
        );
        assert_eq!(
            "RENTALCOSTPERDAYASC".parse::<SortState>().unwrap(),
            SortState::RentalCostPerDayAsc
        );
        assert_eq!("No".parse::<SortState>().unwrap(), SortState::No);
        assert!("Sideways".parse::<SortState>().is_err());
        assert!("".parse::<SortState>().is_err());
    }

    #[test]
    fn test_display_matches_name() {
        for state in SortState::ALL {
            assert_eq!(state.to_string().parse::<SortState>().unwrap(), state);
        }
    }

    #[test]
    fn test_toggle() {
        let field = SortField::Cost;
        assert_eq!(
            SortViewModel::new(SortState::CostAsc, field).toggle(),
            SortState::CostDesc
        );
        assert_eq!(
            SortViewModel::new(SortState::CostDesc, field).toggle(),
            SortState::CostAsc
        );
        assert_eq!(
            SortViewModel::new(SortState::No, field).toggle(),
            SortState::CostAsc
        );
        // a state from another field toggles to this field's ascending state
        assert_eq!(
            SortViewModel::new(SortState::TotalAmountAsc, field).toggle(),
            SortState::CostAsc
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe_sort(SortState::CostAsc, Some(SortField::Cost)),
            "By cost (ascending)"
        );
        assert_eq!(
            describe_sort(SortState::PhoneNumberDesc, Some(SortField::PhoneNumber)),
            "By phone number (descending)"
        );
        assert_eq!(
            describe_sort(SortState::CostAsc, Some(SortField::TotalAmount)),
            "Unsorted"
        );
        assert_eq!(describe_sort(SortState::No, None), "Unsorted");
    }

    #[test]
    fn test_active_direction() {
        let vm = SortViewModel::new(SortState::TotalAmountDesc, SortField::TotalAmount);
        assert_eq!(vm.active_direction(), Some(OrderDirection::Descending));

        let vm = SortViewModel::new(SortState::No, SortField::TotalAmount);
        assert_eq!(vm.active_direction(), None);
    }
}
