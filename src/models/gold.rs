use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;

use crate::models::bronze::{
    DetailLineRecord, DiscountRecord, ErrorCodeRecord, GuestCheckRecord, MenuItemRecord,
    ServiceChargeRecord, TaxRecord, TenderMediaRecord,
};

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = crate::db::schema::restaurants)]
#[diesel(primary_key(restaurant_id))]
pub struct Restaurant {
    pub restaurant_id: i32,
    pub loc_ref: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::restaurants)]
pub struct NewRestaurant<'a> {
    pub loc_ref: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = crate::db::schema::employees)]
#[diesel(primary_key(employee_id))]
pub struct Employee {
    pub employee_id: i32,
    pub employee_number: i32,
    pub full_name: String,
    pub role: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::employees)]
pub struct NewEmployee<'a> {
    pub employee_number: i32,
    pub full_name: String,
    pub role: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = crate::db::schema::guest_checks)]
#[diesel(primary_key(guest_check_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GuestCheck {
    pub guest_check_id: i64,
    pub restaurant_id: i32,
    pub employee_id: i32,
    pub check_number: Option<i32>,
    pub business_date: Option<NaiveDate>,
    pub opened_utc: Option<NaiveDateTime>,
    pub closed_utc: Option<NaiveDateTime>,
    pub closed: bool,
    pub guest_count: Option<i32>,
    pub sub_total: Option<f64>,
    pub check_total: Option<f64>,
    pub discount_total: Option<f64>,
    pub paid_total: Option<f64>,
    pub table_name: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::guest_checks)]
pub struct NewGuestCheck<'a> {
    pub guest_check_id: i64,
    pub restaurant_id: i32,
    pub employee_id: i32,
    pub check_number: Option<i32>,
    pub business_date: Option<NaiveDate>,
    pub opened_utc: Option<NaiveDateTime>,
    pub closed_utc: Option<NaiveDateTime>,
    pub closed: bool,
    pub guest_count: Option<i32>,
    pub sub_total: Option<f64>,
    pub check_total: Option<f64>,
    pub discount_total: Option<f64>,
    pub paid_total: Option<f64>,
    pub table_name: Option<&'a str>,
}

impl<'a> NewGuestCheck<'a> {
    pub fn from_record(record: &'a GuestCheckRecord, restaurant_id: i32, employee_id: i32) -> Self {
        Self {
            guest_check_id: record.guest_check_id,
            restaurant_id,
            employee_id,
            check_number: record.chk_num,
            business_date: record.opn_bus_dt,
            opened_utc: record.opn_utc,
            closed_utc: record.clsd_utc,
            closed: record.clsd_flag,
            guest_count: record.gst_cnt,
            sub_total: record.sub_ttl,
            check_total: record.chk_ttl,
            discount_total: record.dsc_ttl,
            paid_total: record.pay_ttl,
            table_name: record.tbl_name.as_deref(),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = crate::db::schema::check_taxes)]
#[diesel(primary_key(tax_line_id))]
pub struct CheckTax {
    pub tax_line_id: i32,
    pub guest_check_id: i64,
    pub tax_number: i32,
    pub taxable_sales_total: Option<f64>,
    pub tax_collected_total: Option<f64>,
    pub tax_rate: Option<f64>,
    pub tax_type: Option<i32>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::check_taxes)]
pub struct NewCheckTax {
    pub guest_check_id: i64,
    pub tax_number: i32,
    pub taxable_sales_total: Option<f64>,
    pub tax_collected_total: Option<f64>,
    pub tax_rate: Option<f64>,
    pub tax_type: Option<i32>,
}

impl NewCheckTax {
    pub fn from_record(guest_check_id: i64, tax: &TaxRecord) -> Self {
        Self {
            guest_check_id,
            tax_number: tax.tax_num,
            taxable_sales_total: tax.txbl_sls_ttl,
            tax_collected_total: tax.tax_coll_ttl,
            tax_rate: tax.tax_rate,
            tax_type: tax.tax_type,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = crate::db::schema::detail_lines)]
#[diesel(primary_key(detail_line_id))]
pub struct DetailLine {
    pub detail_line_id: i32,
    pub guest_check_id: i64,
    pub line_item_ref: Option<i64>,
    pub line_number: Option<i32>,
    pub detail_utc: Option<NaiveDateTime>,
    pub display_total: Option<f64>,
    pub display_quantity: Option<i32>,
    pub detail_kind: String,
    pub detail_id: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::detail_lines)]
pub struct NewDetailLine {
    pub guest_check_id: i64,
    pub line_item_ref: Option<i64>,
    pub line_number: Option<i32>,
    pub detail_utc: Option<NaiveDateTime>,
    pub display_total: Option<f64>,
    pub display_quantity: Option<i32>,
    pub detail_kind: &'static str,
    pub detail_id: i32,
}

impl NewDetailLine {
    pub fn from_record(
        guest_check_id: i64,
        line: &DetailLineRecord,
        detail_kind: &'static str,
        detail_id: i32,
    ) -> Self {
        Self {
            guest_check_id,
            line_item_ref: line.guest_check_line_item_id,
            line_number: line.line_num,
            detail_utc: line.detail_utc,
            display_total: line.dsp_ttl,
            display_quantity: line.dsp_qty,
            detail_kind,
            detail_id,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = crate::db::schema::menu_item_details)]
#[diesel(primary_key(menu_item_detail_id))]
pub struct MenuItemDetail {
    pub menu_item_detail_id: i32,
    pub menu_item_number: i32,
    pub modified: Option<bool>,
    pub tax_included: Option<bool>,
    pub active_taxes: Option<String>,
    pub price_level: Option<i32>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::menu_item_details)]
pub struct NewMenuItemDetail<'a> {
    pub menu_item_number: i32,
    pub modified: Option<bool>,
    pub tax_included: Option<bool>,
    pub active_taxes: Option<&'a str>,
    pub price_level: Option<i32>,
}

impl<'a> From<&'a MenuItemRecord> for NewMenuItemDetail<'a> {
    fn from(item: &'a MenuItemRecord) -> Self {
        Self {
            menu_item_number: item.mi_num,
            modified: item.mod_flag,
            tax_included: item.incl_tax,
            active_taxes: item.active_taxes.as_deref(),
            price_level: item.prc_lvl,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::discount_details)]
pub struct NewDiscountDetail<'a> {
    pub discount_number: i32,
    pub active_taxes: Option<&'a str>,
}

impl<'a> From<&'a DiscountRecord> for NewDiscountDetail<'a> {
    fn from(discount: &'a DiscountRecord) -> Self {
        Self {
            discount_number: discount.dsc_num,
            active_taxes: discount.active_taxes.as_deref(),
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::service_charge_details)]
pub struct NewServiceChargeDetail<'a> {
    pub service_charge_number: i32,
    pub active_taxes: Option<&'a str>,
}

impl<'a> From<&'a ServiceChargeRecord> for NewServiceChargeDetail<'a> {
    fn from(charge: &'a ServiceChargeRecord) -> Self {
        Self {
            service_charge_number: charge.svc_chg_num,
            active_taxes: charge.active_taxes.as_deref(),
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::payment_details)]
pub struct NewPaymentDetail {
    pub tender_media_number: i32,
}

impl From<&TenderMediaRecord> for NewPaymentDetail {
    fn from(tender: &TenderMediaRecord) -> Self {
        Self {
            tender_media_number: tender.tmed_num,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::error_details)]
pub struct NewErrorDetail<'a> {
    pub error_number: i32,
    pub error_text: Option<&'a str>,
}

impl<'a> From<&'a ErrorCodeRecord> for NewErrorDetail<'a> {
    fn from(error: &'a ErrorCodeRecord) -> Self {
        Self {
            error_number: error.err_num,
            error_text: error.err_text.as_deref(),
        }
    }
}
