//! Aggregate and drill-down endpoints of the dashboard JSON contract.
//!
//! Every handler is the same shape: parse the filter params, fetch one
//! record set through the store, run the in-memory aggregation engine,
//! reshape into the envelope. Storage failures collapse to a generic 500
//! at this boundary.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};

use crate::api::constants::ALL_REGIONS_ID;
use crate::config::get_config;
use crate::core::{aggregate, outlet_key, resolve};
use crate::core::aggregate::percentage_of;
use crate::repository::{DateRange, NewsFilter, NewsStore};

use super::helpers::{bad_request_response, database_error_response, envelope_response};
use super::types::{
    CategoryCountItem, DashboardQuery, OutletCountItem, ProgramItem, ProgramQuery,
    ProvinceCountItem, RegionItem, StatisticsItem,
};

/// GET /regions
pub async fn regions(store: web::Data<Arc<dyn NewsStore>>) -> ActixResult<impl Responder> {
    let rows = match store.regions().await {
        Ok(rows) => rows,
        Err(e) => return Ok(database_error_response(&e)),
    };

    let result: Vec<RegionItem> = rows
        .into_iter()
        .map(|r| RegionItem {
            region_id: r.region_id,
            name: r.name,
        })
        .collect();

    Ok(envelope_response(None, result))
}

/// GET /category — news counts per category over the date range.
pub async fn category(
    store: web::Data<Arc<dyn NewsStore>>,
    query: web::Query<DashboardQuery>,
) -> ActixResult<impl Responder> {
    let range = DateRange::parse(query.sdate.as_deref(), query.edate.as_deref());

    let records = match store.fetch_news(range.as_ref(), &NewsFilter::All).await {
        Ok(records) => records,
        Err(e) => return Ok(database_error_response(&e)),
    };

    let agg = aggregate(&records, |r| vec![r.category.clone()]);
    let result: Vec<CategoryCountItem> = agg
        .buckets
        .into_iter()
        .map(|b| CategoryCountItem {
            category: b.key,
            count_category: b.count as i64,
        })
        .collect();

    Ok(envelope_response(Some(agg.total_attributed as i64), result))
}

/// GET /news — news counts per source outlet over the date range.
pub async fn news(
    store: web::Data<Arc<dyn NewsStore>>,
    query: web::Query<DashboardQuery>,
) -> ActixResult<impl Responder> {
    let range = DateRange::parse(query.sdate.as_deref(), query.edate.as_deref());

    let records = match store.fetch_news(range.as_ref(), &NewsFilter::All).await {
        Ok(records) => records,
        Err(e) => return Ok(database_error_response(&e)),
    };

    let agg = aggregate(&records, |r| vec![outlet_key(&r.site_name).to_string()]);
    let result: Vec<OutletCountItem> = agg
        .buckets
        .into_iter()
        .map(|b| OutletCountItem {
            site_name: b.key,
            count_site: b.count as i64,
        })
        .collect();

    Ok(envelope_response(Some(agg.total_attributed as i64), result))
}

/// GET /category-list — one category's news attributed across the provinces
/// of the selected region (multi-label: a record naming N provinces counts
/// N times in `res_total`).
pub async fn category_list(
    store: web::Data<Arc<dyn NewsStore>>,
    query: web::Query<DashboardQuery>,
) -> ActixResult<impl Responder> {
    let region_id = query
        .region_id
        .as_deref()
        .and_then(|v| v.parse::<i32>().ok())
        .filter(|id| *id != ALL_REGIONS_ID);

    let provinces = match store.provinces(region_id).await {
        Ok(rows) => rows,
        Err(e) => return Ok(database_error_response(&e)),
    };
    let canonical: Vec<String> = provinces.iter().map(|p| p.name.clone()).collect();

    let range = DateRange::parse(query.sdate.as_deref(), query.edate.as_deref());

    // Aggregation only runs with a full date range and a category, matching
    // the widget's request pattern; otherwise every province reports zero.
    let records = match (&range, &query.category) {
        (Some(range), Some(category)) if !canonical.is_empty() => {
            match store
                .fetch_news(Some(range), &NewsFilter::Category(category.clone()))
                .await
            {
                Ok(records) => records,
                Err(e) => return Ok(database_error_response(&e)),
            }
        }
        _ => Vec::new(),
    };

    let mode = get_config().resolver_mode;
    let agg = aggregate(&records, |r| resolve(&r.province_field, &canonical, mode));
    let buckets: HashMap<&str, _> = agg
        .buckets
        .iter()
        .map(|b| (b.key.as_str(), b))
        .collect();

    let mut result: Vec<ProvinceCountItem> = provinces
        .iter()
        .map(|p| {
            let bucket = buckets.get(p.name.as_str());
            let count = bucket.map(|b| b.count).unwrap_or(0);
            ProvinceCountItem {
                province_id: p.province_id,
                name: p.name.clone(),
                region_id: p.region_id,
                province_no: p.province_no,
                ids: bucket.map(|b| b.ids.clone()).unwrap_or_default(),
                news_count: count as i64,
                percentage: percentage_of(count, agg.total_attributed),
            }
        })
        .collect();
    // Stable sort: zero-count provinces keep their name order at the tail.
    result.sort_by(|a, b| b.news_count.cmp(&a.news_count));

    Ok(envelope_response(Some(agg.total_attributed as i64), result))
}

/// GET /program — drill-down listing of the records behind one bucket.
pub async fn program(
    store: web::Data<Arc<dyn NewsStore>>,
    query: web::Query<ProgramQuery>,
) -> ActixResult<impl Responder> {
    let range = DateRange::parse(query.sdate.as_deref(), query.edate.as_deref());

    let filter = match query.manu.as_deref() {
        Some("news") => match &query.site_name {
            Some(site_name) => NewsFilter::Outlet(site_name.clone()),
            None => return Ok(bad_request_response("site_name is required for manu=news")),
        },
        Some("category") => match &query.category {
            Some(category) => NewsFilter::Category(category.clone()),
            None => {
                return Ok(bad_request_response("category is required for manu=category"));
            }
        },
        Some("province") => match &query.provinces {
            Some(province) => NewsFilter::Province(province.clone()),
            None => {
                return Ok(bad_request_response("provinces is required for manu=province"));
            }
        },
        // Pre-resolved id list from /category-list; ignores the date range.
        Some("category-list") => {
            let ids: Vec<i32> = query
                .ids
                .as_deref()
                .unwrap_or("")
                .split(',')
                .filter_map(|id| id.trim().parse::<i32>().ok())
                .collect();
            NewsFilter::Ids(ids)
        }
        _ => return Ok(bad_request_response("unknown manu")),
    };

    let records = match store.fetch_news(range.as_ref(), &filter).await {
        Ok(records) => records,
        Err(e) => return Ok(database_error_response(&e)),
    };

    let result: Vec<ProgramItem> = records
        .iter()
        .map(|r| ProgramItem {
            title: r.title.clone(),
            link_href: r.link_href.clone(),
            province: r.province_text(),
        })
        .collect();

    Ok(envelope_response(Some(result.len() as i64), result))
}

/// GET /statistics — active-province counts per region.
pub async fn statistics(store: web::Data<Arc<dyn NewsStore>>) -> ActixResult<impl Responder> {
    let rows = match store.region_statistics().await {
        Ok(rows) => rows,
        Err(e) => return Ok(database_error_response(&e)),
    };

    let result: Vec<StatisticsItem> = rows
        .into_iter()
        .map(|s| StatisticsItem {
            region_id: s.region_id,
            region_name: s.region_name,
            province_count: s.province_count,
        })
        .collect();

    Ok(envelope_response(None, result))
}
