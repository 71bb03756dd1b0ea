use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use migration::entities::{province, region, scraped_data};

/// One ingested article, with the province value already lifted out of the
/// scraper's JSON document.
#[derive(Clone, Debug, PartialEq)]
pub struct NewsRecord {
    pub id: i32,
    pub title: String,
    pub link_href: String,
    pub site_name: String,
    pub category: String,
    pub res_date: NaiveDate,
    /// `res_data.province` as stored: string, delimited string, array, the
    /// `"all"` sentinel, or `Null` when absent or unparseable.
    pub province_field: Value,
}

impl NewsRecord {
    pub fn from_model(model: scraped_data::Model) -> Self {
        let province_field = parse_province_field(model.id, &model.res_data);
        NewsRecord {
            id: model.id,
            title: model.title,
            link_href: model.link_href,
            site_name: model.site_name,
            category: model.category,
            res_date: model.res_date,
            province_field,
        }
    }

    /// Display form of the province field for drill-down rows: arrays are
    /// joined with `", "`, strings pass through, anything else is
    /// stringified (empty for `Null`).
    pub fn province_text(&self) -> String {
        match &self.province_field {
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .collect::<Vec<_>>()
                .join(", "),
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// A malformed document costs this record its province attributions and
/// nothing else; the batch continues.
fn parse_province_field(id: i32, res_data: &str) -> Value {
    match serde_json::from_str::<Value>(res_data) {
        Ok(doc) => doc.get("province").cloned().unwrap_or(Value::Null),
        Err(e) => {
            warn!("scraped_data id {}: unparseable res_data, skipping province: {}", id, e);
            Value::Null
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvinceRow {
    pub province_id: i32,
    pub name: String,
    pub region_id: i32,
    pub province_no: i32,
}

impl From<province::Model> for ProvinceRow {
    fn from(model: province::Model) -> Self {
        ProvinceRow {
            province_id: model.province_id,
            name: model.name,
            region_id: model.region_id,
            province_no: model.province_no,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionRow {
    pub region_id: i32,
    pub name: String,
}

impl From<region::Model> for RegionRow {
    fn from(model: region::Model) -> Self {
        RegionRow {
            region_id: model.region_id,
            name: model.name,
        }
    }
}

/// Per-region rollup of active provinces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionStat {
    pub region_id: i32,
    pub region_name: String,
    pub province_count: i64,
}

/// Inclusive date range over `res_date`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// A range applies only when both bounds are present and well-formed;
    /// anything else means "no date filter".
    pub fn parse(sdate: Option<&str>, edate: Option<&str>) -> Option<DateRange> {
        let start = NaiveDate::parse_from_str(sdate?, "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(edate?, "%Y-%m-%d").ok()?;
        Some(DateRange { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(res_data: &str) -> scraped_data::Model {
        scraped_data::Model {
            id: 1,
            title: "t".into(),
            link_href: "https://example.com".into(),
            site_name: "bangkokpost_news".into(),
            category: "politics".into(),
            res_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            res_data: res_data.into(),
        }
    }

    #[test]
    fn test_province_field_extracted() {
        let record = NewsRecord::from_model(model(r#"{"province": "ลำปาง"}"#));
        assert_eq!(record.province_field, json!("ลำปาง"));
    }

    #[test]
    fn test_malformed_res_data_yields_null_field() {
        let record = NewsRecord::from_model(model("{not json"));
        assert_eq!(record.province_field, Value::Null);
    }

    #[test]
    fn test_missing_province_key_yields_null_field() {
        let record = NewsRecord::from_model(model(r#"{"other": 1}"#));
        assert_eq!(record.province_field, Value::Null);
    }

    #[test]
    fn test_province_text_joins_arrays() {
        let record = NewsRecord::from_model(model(r#"{"province": ["เชียงใหม่", "ลำปาง"]}"#));
        assert_eq!(record.province_text(), "เชียงใหม่, ลำปาง");
    }

    #[test]
    fn test_province_text_passes_strings_through() {
        let record = NewsRecord::from_model(model(r#"{"province": "เชียงใหม่,ลำปาง"}"#));
        assert_eq!(record.province_text(), "เชียงใหม่,ลำปาง");
    }

    #[test]
    fn test_date_range_requires_both_bounds() {
        assert!(DateRange::parse(Some("2026-08-01"), Some("2026-08-31")).is_some());
        assert!(DateRange::parse(Some("2026-08-01"), None).is_none());
        assert!(DateRange::parse(None, Some("2026-08-31")).is_none());
        assert!(DateRange::parse(Some("08/01/2026"), Some("2026-08-31")).is_none());
    }
}
