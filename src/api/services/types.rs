//! Wire types of the dashboard JSON contract.

use serde::{Deserialize, Serialize};

/// Response envelope shared by the dashboard endpoints: string status code,
/// short machine text, optional aggregate total, payload.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Envelope<T> {
    pub res_status: String,
    pub res_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res_total: Option<i64>,
    pub res_result: T,
}

impl<T> Envelope<T> {
    pub fn success(res_total: Option<i64>, res_result: T) -> Self {
        Envelope {
            res_status: "200".to_string(),
            res_text: "success".to_string(),
            res_total,
            res_result,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegionItem {
    pub region_id: i32,
    pub name: String,
}

/// One province row of `/category-list`: reference columns plus the
/// aggregation bucket joined onto them.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProvinceCountItem {
    pub province_id: i32,
    pub name: String,
    pub region_id: i32,
    pub province_no: i32,
    pub ids: Vec<i32>,
    pub news_count: i64,
    pub percentage: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CategoryCountItem {
    pub category: String,
    pub count_category: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OutletCountItem {
    pub site_name: String,
    pub count_site: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProgramItem {
    pub title: String,
    pub link_href: String,
    pub province: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StatisticsItem {
    pub region_id: i32,
    pub region_name: String,
    pub province_count: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Query parameters shared by the aggregate endpoints.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct DashboardQuery {
    pub sdate: Option<String>,
    pub edate: Option<String>,
    pub region_id: Option<String>,
    pub category: Option<String>,
}

/// Query parameters of the drill-down endpoint.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ProgramQuery {
    pub manu: Option<String>,
    pub site_name: Option<String>,
    pub category: Option<String>,
    pub provinces: Option<String>,
    pub ids: Option<String>,
    pub sdate: Option<String>,
    pub edate: Option<String>,
}
