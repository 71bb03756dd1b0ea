use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::NaiveDate;
use serde_json::{Value, json};

use newswatch::api::middleware::SessionGate;
use newswatch::api::services::{api_scope, frontend};
use newswatch::config::{
    AuthConfig, Config, DatabaseConfig, ResolverMode, RoutesConfig, ServerConfig, init_config,
};
use newswatch::core::aggregate::outlet_key;
use newswatch::core::resolver::{candidates, matches_province};
use newswatch::errors::{NewswatchError, Result};
use newswatch::repository::{
    DateRange, NewsFilter, NewsRecord, NewsStore, ProvinceRow, RegionRow, RegionStat,
};
use newswatch::utils::password::hash_password;

const OPERATOR_PASSWORD: &str = "secret123";

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            username: "operator".to_string(),
            password_hash: hash_password(OPERATOR_PASSWORD).unwrap(),
            jwt_secret: "test_secret_key_32_bytes_long!!".to_string(),
            session_minutes: 60,
            cookie_secure: false,
        },
        routes: RoutesConfig {
            api_prefix: "/api".to_string(),
            dashboard_prefix: "/dashboard".to_string(),
            login_path: "/login".to_string(),
        },
        resolver_mode: ResolverMode::Containment,
    }
}

fn init_test_config() {
    // OnceLock: first test wins, later calls are no-ops with the same values.
    init_config(test_config());
}

// In-memory store mirroring the backend's filter semantics.
struct MockStore {
    records: Vec<NewsRecord>,
    provinces: Vec<ProvinceRow>,
    regions: Vec<RegionRow>,
    should_fail: bool,
}

fn record(
    id: i32,
    category: &str,
    site: &str,
    date: (i32, u32, u32),
    province: Value,
) -> NewsRecord {
    NewsRecord {
        id,
        title: format!("article {}", id),
        link_href: format!("https://example.com/{}", id),
        site_name: site.to_string(),
        category: category.to_string(),
        res_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        province_field: province,
    }
}

impl MockStore {
    fn fixture() -> Self {
        MockStore {
            records: vec![
                record(1, "การเมือง", "bangkokpost_news", (2026, 8, 10), json!("เชียงใหม่,ลำปาง")),
                record(2, "การเมือง", "thairath_region", (2026, 8, 11), json!("ลำปาง")),
                record(3, "อาชญากรรม", "bangkokpost_news", (2026, 8, 12), json!(["เชียงราย"])),
                record(4, "การเมือง", "matichon_politics", (2026, 8, 20), json!("all")),
                record(5, "กีฬา", "thairath_sport", (2026, 9, 1), Value::Null),
            ],
            provinces: vec![
                ProvinceRow {
                    province_id: 1,
                    name: "เชียงราย".to_string(),
                    region_id: 1,
                    province_no: 3,
                },
                ProvinceRow {
                    province_id: 2,
                    name: "เชียงใหม่".to_string(),
                    region_id: 1,
                    province_no: 1,
                },
                ProvinceRow {
                    province_id: 3,
                    name: "ลำปาง".to_string(),
                    region_id: 1,
                    province_no: 2,
                },
            ],
            regions: vec![
                RegionRow {
                    region_id: 1,
                    name: "ภาคเหนือ".to_string(),
                },
                RegionRow {
                    region_id: 2,
                    name: "ภาคกลาง".to_string(),
                },
            ],
            should_fail: false,
        }
    }

    fn failing() -> Self {
        MockStore {
            records: Vec::new(),
            provinces: Vec::new(),
            regions: Vec::new(),
            should_fail: true,
        }
    }
}

#[async_trait::async_trait]
impl NewsStore for MockStore {
    async fn fetch_news(
        &self,
        range: Option<&DateRange>,
        filter: &NewsFilter,
    ) -> Result<Vec<NewsRecord>> {
        if self.should_fail {
            return Err(NewswatchError::database_operation("mock storage error"));
        }

        if let NewsFilter::Ids(ids) = filter {
            // Id lists bypass the date range, as in the real backend.
            return Ok(self
                .records
                .iter()
                .filter(|r| ids.contains(&r.id))
                .cloned()
                .collect());
        }

        Ok(self
            .records
            .iter()
            .filter(|r| match range {
                Some(range) => r.res_date >= range.start && r.res_date <= range.end,
                None => true,
            })
            .filter(|r| match filter {
                NewsFilter::All => true,
                NewsFilter::Category(c) => &r.category == c,
                NewsFilter::Outlet(o) => outlet_key(&r.site_name) == o,
                NewsFilter::Province(name) => candidates(&r.province_field)
                    .iter()
                    .any(|c| matches_province(c, name, ResolverMode::Containment)),
                NewsFilter::Ids(_) => unreachable!(),
            })
            .cloned()
            .collect())
    }

    async fn regions(&self) -> Result<Vec<RegionRow>> {
        if self.should_fail {
            return Err(NewswatchError::database_operation("mock storage error"));
        }
        Ok(self.regions.clone())
    }

    async fn provinces(&self, region_id: Option<i32>) -> Result<Vec<ProvinceRow>> {
        if self.should_fail {
            return Err(NewswatchError::database_operation("mock storage error"));
        }
        let mut rows: Vec<ProvinceRow> = self
            .provinces
            .iter()
            .filter(|p| region_id.is_none_or(|id| p.region_id == id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn region_statistics(&self) -> Result<Vec<RegionStat>> {
        if self.should_fail {
            return Err(NewswatchError::database_operation("mock storage error"));
        }
        Ok(self
            .regions
            .iter()
            .map(|r| RegionStat {
                region_id: r.region_id,
                region_name: r.name.clone(),
                province_count: self
                    .provinces
                    .iter()
                    .filter(|p| p.region_id == r.region_id)
                    .count() as i64,
            })
            .collect())
    }
}

macro_rules! test_app {
    ($store:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(
                    Arc::new($store) as Arc<dyn NewsStore>
                ))
                .wrap(SessionGate)
                .service(api_scope("/api"))
                .route("/dashboard", web::get().to(frontend::dashboard_page))
                .route("/login", web::get().to(frontend::login_page)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_regions_envelope_has_no_total() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::get().uri("/api/regions").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["res_status"], "200");
    assert_eq!(body["res_text"], "success");
    assert!(body.get("res_total").is_none());
    assert_eq!(body["res_result"][0]["name"], "ภาคเหนือ");
    assert_eq!(body["res_result"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_category_counts_descending_with_total() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::get()
        .uri("/api/category?sdate=2026-08-01&edate=2026-08-31")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["res_total"], 4);
    let rows = body["res_result"].as_array().unwrap();
    assert_eq!(rows[0]["category"], "การเมือง");
    assert_eq!(rows[0]["count_category"], 3);
    assert_eq!(rows[1]["category"], "อาชญากรรม");
    assert_eq!(rows[1]["count_category"], 1);
}

#[actix_web::test]
async fn test_news_outlet_prefix_and_repaired_total() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::get()
        .uri("/api/news?sdate=2026-08-01&edate=2026-09-30")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    let rows = body["res_result"].as_array().unwrap();
    assert_eq!(rows[0]["site_name"], "bangkokpost");
    assert_eq!(rows[0]["count_site"], 2);
    assert_eq!(rows[1]["site_name"], "thairath");
    assert_eq!(rows[1]["count_site"], 2);
    let total: i64 = rows.iter().map(|r| r["count_site"].as_i64().unwrap()).sum();
    assert_eq!(body["res_total"].as_i64().unwrap(), total);
}

#[actix_web::test]
async fn test_category_list_multi_label_attribution() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::get()
        .uri("/api/category-list?region_id=1&category=%E0%B8%81%E0%B8%B2%E0%B8%A3%E0%B9%80%E0%B8%A1%E0%B8%B7%E0%B8%AD%E0%B8%87&sdate=2026-08-01&edate=2026-08-31")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    // record 1 -> เชียงใหม่ + ลำปาง, record 2 -> ลำปาง, record 4 ("all") -> all three
    assert_eq!(body["res_total"], 6);
    let rows = body["res_result"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["name"], "ลำปาง");
    assert_eq!(rows[0]["news_count"], 3);
    assert_eq!(rows[0]["ids"], json!([1, 2, 4]));
    assert_eq!(rows[0]["percentage"], 50.0);
    assert_eq!(rows[1]["news_count"], 2);

    let sum: f64 = rows.iter().map(|r| r["percentage"].as_f64().unwrap()).sum();
    assert!((sum - 100.0).abs() <= 0.01 * rows.len() as f64);
}

#[actix_web::test]
async fn test_category_list_without_range_reports_zero_counts() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::get()
        .uri("/api/category-list?region_id=10")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["res_total"], 0);
    let rows = body["res_result"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert_eq!(row["news_count"], 0);
        assert_eq!(row["percentage"], 0.0);
        assert_eq!(row["ids"], json!([]));
    }
}

#[actix_web::test]
async fn test_program_by_ids_ignores_date_range() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    // Range excludes every record; the id list must still resolve.
    let req = actix_test::TestRequest::get()
        .uri("/api/program?manu=category-list&ids=1,3&sdate=2020-01-01&edate=2020-01-02")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["res_total"], 2);
    let rows = body["res_result"].as_array().unwrap();
    assert_eq!(rows[0]["title"], "article 1");
    assert_eq!(rows[0]["province"], "เชียงใหม่,ลำปาง");
    assert_eq!(rows[1]["province"], "เชียงราย");
}

#[actix_web::test]
async fn test_program_province_drilldown_uses_containment() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::get()
        .uri("/api/program?manu=province&provinces=%E0%B8%A5%E0%B8%B3%E0%B8%9B%E0%B8%B2%E0%B8%87&sdate=2026-08-01&edate=2026-08-31")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    // records 1 and 2 name ลำปาง; record 4 is the "all" sentinel and does
    // not contain the province text.
    assert_eq!(body["res_total"], 2);
}

#[actix_web::test]
async fn test_program_unknown_manu_is_rejected() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::get()
        .uri("/api/program?manu=bogus")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_empty_range_is_success_not_error() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    for uri in [
        "/api/category?sdate=2020-01-01&edate=2020-01-02",
        "/api/news?sdate=2020-01-01&edate=2020-01-02",
    ] {
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["res_total"], 0);
        assert_eq!(body["res_result"], json!([]));
    }
}

#[actix_web::test]
async fn test_statistics_rollup() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::get().uri("/api/statistics").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    let rows = body["res_result"].as_array().unwrap();
    assert_eq!(rows[0]["region_name"], "ภาคเหนือ");
    assert_eq!(rows[0]["province_count"], 3);
    assert_eq!(rows[1]["province_count"], 0);
}

#[actix_web::test]
async fn test_storage_failure_is_generic_500() {
    init_test_config();
    let app = test_app!(MockStore::failing());

    for uri in ["/api/regions", "/api/category", "/api/statistics"] {
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({ "error": "database error" }));
    }
}

#[actix_web::test]
async fn test_login_wrong_password_sets_no_cookie() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "operator", "password": "wrong" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get("set-cookie").is_none());
}

#[actix_web::test]
async fn test_login_unknown_user_matches_wrong_password_message() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let wrong_user = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "nobody", "password": OPERATOR_PASSWORD }))
        .to_request();
    let body_user: Value = {
        let res = actix_test::call_service(&app, wrong_user).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        actix_test::read_body_json(res).await
    };

    let wrong_pass = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "operator", "password": "wrong" }))
        .to_request();
    let body_pass: Value = {
        let res = actix_test::call_service(&app, wrong_pass).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        actix_test::read_body_json(res).await
    };

    // Neither response says which half of the credentials was wrong.
    assert_eq!(body_user, body_pass);
}

#[actix_web::test]
async fn test_session_round_trip_and_gate() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    // Anonymous dashboard access redirects to the login page.
    let req = actix_test::TestRequest::get().uri("/dashboard").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers().get("location").unwrap(), "/login");

    // Login issues the session cookie.
    let req = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "operator", "password": OPERATOR_PASSWORD }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .response()
        .cookies()
        .find(|c| c.name() == "token")
        .expect("session cookie set on login");
    assert!(cookie.http_only().unwrap_or(false));
    let cookie = cookie.into_owned();

    // With the cookie the gate passes through.
    let req = actix_test::TestRequest::get()
        .uri("/dashboard")
        .cookie(cookie)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    // A garbage token is anonymous again.
    let req = actix_test::TestRequest::get()
        .uri("/dashboard")
        .cookie(actix_web::cookie::Cookie::new("token", "garbage.token.here"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn test_login_page_is_not_gated() {
    init_test_config();
    let app = test_app!(MockStore::fixture());

    let req = actix_test::TestRequest::get().uri("/login").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}
