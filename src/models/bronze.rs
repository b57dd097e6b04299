use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::db::RepositoryError;
use crate::enums::detail::{DetailKind, DetailRecord};

/// One undecoded guest check as handed over by a record source.
///
/// Decoding happens per record inside the order's own transaction, so a
/// malformed check only fails itself and never the batch that carries it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    payload: Value,
}

impl OrderRecord {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    pub fn guest_check_id(&self) -> Option<i64> {
        self.payload.get("guestCheckId").and_then(Value::as_i64)
    }

    pub fn loc_ref(&self) -> Option<&str> {
        self.payload.get("locRef").and_then(Value::as_str)
    }

    pub fn employee_number(&self) -> Option<i32> {
        self.payload
            .get("empNum")
            .and_then(Value::as_i64)
            .and_then(|n| i32::try_from(n).ok())
    }

    pub fn decode(&self) -> Result<GuestCheckRecord, RepositoryError> {
        GuestCheckRecord::deserialize(&self.payload).map_err(RepositoryError::InvalidRecord)
    }
}

impl From<Value> for OrderRecord {
    fn from(payload: Value) -> Self {
        Self::new(payload)
    }
}

/// A Bronze document as returned by the guest check endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestCheckEnvelope {
    #[serde(rename = "curUTC")]
    pub cur_utc: Option<String>,
    pub loc_ref: Option<String>,
    pub guest_checks: Option<Vec<Value>>,
}

impl GuestCheckEnvelope {
    pub fn has_guest_checks(&self) -> bool {
        self.guest_checks
            .as_ref()
            .map(|checks| !checks.is_empty())
            .unwrap_or(false)
    }

    /// Flattens the envelope into per-check records. The envelope `locRef`
    /// is copied onto every check that does not carry its own.
    pub fn into_records(self) -> Vec<OrderRecord> {
        let loc_ref = self.loc_ref;
        self.guest_checks
            .unwrap_or_default()
            .into_iter()
            .map(|mut check| {
                if let (Some(loc_ref), Value::Object(fields)) = (&loc_ref, &mut check) {
                    fields
                        .entry("locRef")
                        .or_insert_with(|| Value::String(loc_ref.clone()));
                }
                OrderRecord::new(check)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestCheckRecord {
    pub guest_check_id: i64,
    pub loc_ref: String,
    pub emp_num: i32,
    pub chk_num: Option<i32>,
    pub opn_bus_dt: Option<NaiveDate>,
    #[serde(rename = "opnUTC")]
    pub opn_utc: Option<NaiveDateTime>,
    #[serde(rename = "clsdUTC")]
    pub clsd_utc: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub clsd_flag: bool,
    pub gst_cnt: Option<i32>,
    pub sub_ttl: Option<f64>,
    pub chk_ttl: Option<f64>,
    pub dsc_ttl: Option<f64>,
    pub pay_ttl: Option<f64>,
    pub tbl_name: Option<String>,
    #[serde(default)]
    pub taxes: Vec<TaxRecord>,
    #[serde(default)]
    pub detail_lines: Vec<DetailLineRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRecord {
    pub tax_num: i32,
    pub txbl_sls_ttl: Option<f64>,
    pub tax_coll_ttl: Option<f64>,
    pub tax_rate: Option<f64>,
    #[serde(rename = "type")]
    pub tax_type: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailLineRecord {
    pub guest_check_line_item_id: Option<i64>,
    pub line_num: Option<i32>,
    #[serde(rename = "detailUTC")]
    pub detail_utc: Option<NaiveDateTime>,
    pub dsp_ttl: Option<f64>,
    pub dsp_qty: Option<i32>,
    pub menu_item: Option<MenuItemRecord>,
    pub discount: Option<DiscountRecord>,
    pub service_charge: Option<ServiceChargeRecord>,
    pub tender_media: Option<TenderMediaRecord>,
    pub error_code: Option<ErrorCodeRecord>,
}

impl DetailLineRecord {
    /// The variant sub-record this line carries, if it carries a known one.
    /// Several sub-records resolve in `DetailKind::ALL` order.
    pub fn detail(&self) -> Option<DetailRecord<'_>> {
        DetailKind::ALL
            .into_iter()
            .find_map(|kind| self.detail_of(kind))
    }

    pub fn detail_of(&self, kind: DetailKind) -> Option<DetailRecord<'_>> {
        match kind {
            DetailKind::MenuItem => self.menu_item.as_ref().map(DetailRecord::MenuItem),
            DetailKind::Discount => self.discount.as_ref().map(DetailRecord::Discount),
            DetailKind::ServiceCharge => {
                self.service_charge.as_ref().map(DetailRecord::ServiceCharge)
            }
            DetailKind::Payment => self.tender_media.as_ref().map(DetailRecord::Payment),
            DetailKind::Error => self.error_code.as_ref().map(DetailRecord::Error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRecord {
    pub mi_num: i32,
    pub mod_flag: Option<bool>,
    #[serde(default, deserialize_with = "lenient::optional_flag")]
    pub incl_tax: Option<bool>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub active_taxes: Option<String>,
    pub prc_lvl: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRecord {
    pub dsc_num: i32,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub active_taxes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceChargeRecord {
    pub svc_chg_num: i32,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub active_taxes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderMediaRecord {
    pub tmed_num: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCodeRecord {
    pub err_num: i32,
    pub err_text: Option<String>,
}

// The POS API is loose about scalar types: flags arrive as booleans or as
// amounts, tax masks as strings or as numbers.
mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Number(f64),
        Text(String),
    }

    fn scalar_to_flag<E: serde::de::Error>(scalar: Scalar) -> Result<bool, E> {
        match scalar {
            Scalar::Bool(flag) => Ok(flag),
            Scalar::Number(n) => Ok(n != 0.0),
            Scalar::Text(text) => match text.trim().to_lowercase().as_str() {
                "true" | "1" | "y" => Ok(true),
                "false" | "0" | "n" | "" => Ok(false),
                other => Err(E::custom(format!("not a flag: {other}"))),
            },
        }
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Option::<Scalar>::deserialize(deserializer)? {
            Some(scalar) => scalar_to_flag(scalar),
            None => Ok(false),
        }
    }

    pub fn optional_flag<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        Option::<Scalar>::deserialize(deserializer)?
            .map(scalar_to_flag)
            .transpose()
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(flag)) => Some(flag.to_string()),
            Some(other) => Some(other.to_string()),
        })
    }
}
