use std::fmt;

/// Every table of the Gold schema, parents before children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoldTable {
    Restaurants,
    Employees,
    GuestChecks,
    CheckTaxes,
    DetailLines,
    MenuItemDetails,
    DiscountDetails,
    ServiceChargeDetails,
    PaymentDetails,
    ErrorDetails,
}

impl GoldTable {
    pub const ALL: [GoldTable; 10] = [
        GoldTable::Restaurants,
        GoldTable::Employees,
        GoldTable::GuestChecks,
        GoldTable::CheckTaxes,
        GoldTable::DetailLines,
        GoldTable::MenuItemDetails,
        GoldTable::DiscountDetails,
        GoldTable::ServiceChargeDetails,
        GoldTable::PaymentDetails,
        GoldTable::ErrorDetails,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GoldTable::Restaurants => "restaurants",
            GoldTable::Employees => "employees",
            GoldTable::GuestChecks => "guest_checks",
            GoldTable::CheckTaxes => "check_taxes",
            GoldTable::DetailLines => "detail_lines",
            GoldTable::MenuItemDetails => "menu_item_details",
            GoldTable::DiscountDetails => "discount_details",
            GoldTable::ServiceChargeDetails => "service_charge_details",
            GoldTable::PaymentDetails => "payment_details",
            GoldTable::ErrorDetails => "error_details",
        }
    }
}

impl fmt::Display for GoldTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
