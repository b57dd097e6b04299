use std::fmt;

use crate::enums::tables::GoldTable;
use crate::models::bronze::{
    DiscountRecord, ErrorCodeRecord, MenuItemRecord, ServiceChargeRecord, TenderMediaRecord,
};

/// Discriminator stored in `detail_lines.detail_kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DetailKind {
    MenuItem,
    Discount,
    ServiceCharge,
    Payment,
    Error,
}

impl DetailKind {
    pub const ALL: [DetailKind; 5] = [
        DetailKind::MenuItem,
        DetailKind::Discount,
        DetailKind::ServiceCharge,
        DetailKind::Payment,
        DetailKind::Error,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            DetailKind::MenuItem => "MENU_ITEM",
            DetailKind::Discount => "DISCOUNT",
            DetailKind::ServiceCharge => "SERVICE_CHARGE",
            DetailKind::Payment => "PAYMENT",
            DetailKind::Error => "ERROR",
        }
    }

    pub fn table(&self) -> GoldTable {
        match self {
            DetailKind::MenuItem => GoldTable::MenuItemDetails,
            DetailKind::Discount => GoldTable::DiscountDetails,
            DetailKind::ServiceCharge => GoldTable::ServiceChargeDetails,
            DetailKind::Payment => GoldTable::PaymentDetails,
            DetailKind::Error => GoldTable::ErrorDetails,
        }
    }
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Borrowed view of the variant sub-record a detail line carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailRecord<'a> {
    MenuItem(&'a MenuItemRecord),
    Discount(&'a DiscountRecord),
    ServiceCharge(&'a ServiceChargeRecord),
    Payment(&'a TenderMediaRecord),
    Error(&'a ErrorCodeRecord),
}

impl DetailRecord<'_> {
    pub fn kind(&self) -> DetailKind {
        match self {
            DetailRecord::MenuItem(_) => DetailKind::MenuItem,
            DetailRecord::Discount(_) => DetailKind::Discount,
            DetailRecord::ServiceCharge(_) => DetailKind::ServiceCharge,
            DetailRecord::Payment(_) => DetailKind::Payment,
            DetailRecord::Error(_) => DetailKind::Error,
        }
    }
}

/// A variant row written by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchedDetail {
    pub kind: DetailKind,
    pub detail_id: i32,
}
