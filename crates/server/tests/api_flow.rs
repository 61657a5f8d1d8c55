use std::{path::PathBuf, sync::Arc};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use models::account::{AccountKind, Role};
use serde_json::{json, Value};
use service::{auth::domain::Claims, store::MemoryStore, DocumentStore};
use tower::ServiceExt;

const SECRET: &str = "api-flow-test-secret";
const ADMIN_PASSWORD: &str = "Adm1n-Passw0rd";

struct TestApp {
    app: Router,
    upload_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

async fn test_app() -> anyhow::Result<TestApp> {
    let upload_dir = std::env::temp_dir().join(format!("travel_uploads_{}", uuid::Uuid::new_v4()));
    tokio::fs::create_dir_all(&upload_dir).await?;

    let mut cfg = configs::AppConfig::default();
    cfg.auth.jwt_secret = SECRET.into();
    cfg.auth.admin_password = ADMIN_PASSWORD.into();
    cfg.uploads.dir = upload_dir.clone();
    cfg.normalize_and_validate()?;

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let app = server::build_app(&cfg, store).await?;
    Ok(TestApp { app, upload_dir })
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req.header(header::CONTENT_TYPE, "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => req.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, value))
}

async fn login(app: &Router, username: &str, password: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, Method::POST, "/api/auth/login", None, Some(json!({ "username": username, "password": password }))).await?;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    Ok(body["access_token"].as_str().unwrap_or_default().to_string())
}

fn package(title: &str, status: &str) -> Value {
    json!({
        "title": title,
        "description": "Houseboats and shikaras",
        "duration": "5 Days / 4 Nights",
        "price": 24999.0,
        "groupSize": "2-6",
        "image": "https://img.example.com/dal.jpg",
        "status": status
    })
}

fn multipart(boundary: &str, fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut out = Vec::new();
    for (name, value) in fields {
        out.extend_from_slice(format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes());
    }
    if let Some((file_name, content_type, bytes)) = file {
        out.extend_from_slice(
            format!("--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n")
                .as_bytes(),
        );
        out.extend_from_slice(bytes);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    out
}

async fn upload(app: &Router, token: &str, body: Vec<u8>) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/admin/upload")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XTESTBOUNDARY")
        .body(Body::from(body))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes).unwrap_or(Value::Null)))
}

fn files_in(dir: &PathBuf) -> anyhow::Result<usize> {
    Ok(std::fs::read_dir(dir)?.count())
}

#[tokio::test]
async fn health_and_api_root_are_public() -> anyhow::Result<()> {
    let t = test_app().await?;
    let (status, body) = send(&t.app, Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let (status, body) = send(&t.app, Method::GET, "/api/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn login_verify_and_logout_revokes_token() -> anyhow::Result<()> {
    let t = test_app().await?;
    let token = login(&t.app, "admin", ADMIN_PASSWORD).await?;

    let (status, body) = send(&t.app, Method::GET, "/api/auth/verify", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["admin"], "admin");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["kind"], "admin");

    let (status, _) = send(&t.app, Method::POST, "/api/auth/logout", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&t.app, Method::GET, "/api/auth/verify", Some(&token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_rejected() -> anyhow::Result<()> {
    let t = test_app().await?;
    let (status, _) = send(&t.app, Method::POST, "/api/auth/login", None, Some(json!({ "username": "admin", "password": "wrong-pass" }))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&t.app, Method::POST, "/api/auth/login", None, Some(json!({ "username": "nobody", "password": "whatever1" }))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&t.app, Method::POST, "/api/auth/login", None, Some(json!({ "username": "", "password": "" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send(&t.app, Method::POST, "/api/auth/login", None, Some(json!({ "username": "admin" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    Ok(())
}

/// Every token-protected (method, path) pair the router registers, with the least role that may call it.
/// `None` marks routes open to any valid token.
fn protected_routes() -> Vec<(Method, &'static str, Option<Role>)> {
    let agent = Some(Role::Agent);
    let manager = Some(Role::Manager);
    let admin = Some(Role::Admin);
    vec![
        (Method::GET, "/api/auth/verify", None),
        (Method::POST, "/api/auth/logout", None),
        (Method::GET, "/api/admin/bookings", agent),
        (Method::GET, "/api/admin/bookings/x1", agent),
        (Method::PUT, "/api/admin/bookings/x1", agent),
        (Method::DELETE, "/api/admin/bookings/x1", agent),
        (Method::GET, "/api/admin/cab-bookings", agent),
        (Method::GET, "/api/admin/cab-bookings/x1", agent),
        (Method::PUT, "/api/admin/cab-bookings/x1", agent),
        (Method::DELETE, "/api/admin/cab-bookings/x1", agent),
        (Method::GET, "/api/admin/contact", agent),
        (Method::PUT, "/api/admin/contact/x1", agent),
        (Method::DELETE, "/api/admin/contact/x1", agent),
        (Method::GET, "/api/admin/stats", agent),
        (Method::GET, "/api/admin/packages", manager),
        (Method::POST, "/api/admin/packages", manager),
        (Method::GET, "/api/admin/packages/x1", manager),
        (Method::PUT, "/api/admin/packages/x1", manager),
        (Method::DELETE, "/api/admin/packages/x1", manager),
        (Method::GET, "/api/admin/testimonials", manager),
        (Method::PUT, "/api/admin/testimonials/x1", manager),
        (Method::DELETE, "/api/admin/testimonials/x1", manager),
        (Method::POST, "/api/admin/upload", manager),
        (Method::GET, "/api/admin/gallery", manager),
        (Method::PUT, "/api/admin/gallery/x1", manager),
        (Method::DELETE, "/api/admin/gallery/x1", manager),
        (Method::GET, "/api/admin/popups", manager),
        (Method::POST, "/api/admin/popups", manager),
        (Method::GET, "/api/admin/popups/x1", manager),
        (Method::PUT, "/api/admin/popups/x1", manager),
        (Method::DELETE, "/api/admin/popups/x1", manager),
        (Method::POST, "/api/admin/popups/x1/toggle", manager),
        (Method::GET, "/api/admin/team", admin),
        (Method::POST, "/api/admin/team", admin),
        (Method::GET, "/api/admin/team/x1", admin),
        (Method::PUT, "/api/admin/team/x1", admin),
        (Method::DELETE, "/api/admin/team/x1", admin),
        (Method::GET, "/api/admin/site-settings", admin),
        (Method::PUT, "/api/admin/site-settings", admin),
        (Method::POST, "/api/admin/site-settings/reset", admin),
    ]
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() -> anyhow::Result<()> {
    let t = test_app().await?;

    let now = chrono::Utc::now().timestamp();
    let expired = Claims {
        sub: "admin".into(),
        uid: "whatever".into(),
        kind: AccountKind::Admin,
        role: Role::Admin,
        jti: "expired-jti".into(),
        iat: now - 7200,
        exp: now - 60,
    };
    let expired_token = encode(&Header::default(), &expired, &EncodingKey::from_secret(SECRET.as_bytes()))?;
    let forged = encode(&Header::default(), &Claims { exp: now + 600, ..expired }, &EncodingKey::from_secret(b"other-secret"))?;

    for (method, uri, _) in protected_routes() {
        for token in [None, Some("not.a.jwt"), Some(expired_token.as_str()), Some(forged.as_str())] {
            let (status, body) = send(&t.app, method.clone(), uri, token, None).await?;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri} with {token:?}");
            assert_eq!(body["error"], "Unauthorized", "{method} {uri}");
        }
    }
    Ok(())
}

async fn create_member(app: &Router, admin: &str, username: &str, role: &str) -> anyhow::Result<String> {
    let member = json!({
        "fullName": format!("Test {role}"),
        "email": format!("{username}@example.com"),
        "phone": "+91 90000 00000",
        "username": username,
        "password": "member-pass-1",
        "role": role,
        "department": "Sales"
    });
    let (status, body) = send(app, Method::POST, "/api/admin/team", Some(admin), Some(member)).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    login(app, username, "member-pass-1").await
}

#[tokio::test]
async fn route_groups_deny_lower_roles() -> anyhow::Result<()> {
    let t = test_app().await?;
    let admin = login(&t.app, "admin", ADMIN_PASSWORD).await?;
    let agent = create_member(&t.app, &admin, "agent2", "agent").await?;
    let manager = create_member(&t.app, &admin, "manager2", "manager").await?;

    for (method, uri, required) in protected_routes() {
        let Some(required) = required else { continue };
        for (token, role) in [(agent.as_str(), Role::Agent), (manager.as_str(), Role::Manager)] {
            let (status, body) = send(&t.app, method.clone(), uri, Some(token), None).await?;
            if role >= required {
                assert!(status != StatusCode::UNAUTHORIZED && status != StatusCode::FORBIDDEN, "{role} {method} {uri}: {status}");
            } else {
                assert_eq!(status, StatusCode::FORBIDDEN, "{role} {method} {uri}");
                assert_eq!(body["error"], "Forbidden");
            }
        }
    }
    Ok(())
}

#[tokio::test]
async fn roles_gate_admin_route_groups() -> anyhow::Result<()> {
    let t = test_app().await?;
    let admin = login(&t.app, "admin", ADMIN_PASSWORD).await?;
    let member = json!({
        "fullName": "Test Agent",
        "email": "agent@example.com",
        "phone": "+91 90000 00000",
        "username": "agent1",
        "password": "agent-pass-1",
        "role": "agent",
        "department": "Sales"
    });
    let (status, body) = send(&t.app, Method::POST, "/api/admin/team", Some(&admin), Some(member.clone())).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body.get("passwordHash").is_none());

    // usernames are unique
    let (status, _) = send(&t.app, Method::POST, "/api/admin/team", Some(&admin), Some(member)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let agent = login(&t.app, "agent1", "agent-pass-1").await?;
    let (status, body) = send(&t.app, Method::GET, "/api/auth/verify", Some(&agent), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "agent");
    assert_eq!(body["kind"], "team");

    let (status, _) = send(&t.app, Method::GET, "/api/admin/bookings", Some(&agent), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&t.app, Method::GET, "/api/admin/stats", Some(&agent), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&t.app, Method::GET, "/api/admin/packages", Some(&agent), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");
    let (status, _) = send(&t.app, Method::GET, "/api/admin/team", Some(&agent), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn public_catalog_hides_inactive_packages() -> anyhow::Result<()> {
    let t = test_app().await?;
    let token = login(&t.app, "admin", ADMIN_PASSWORD).await?;

    let (status, active) = send(&t.app, Method::POST, "/api/admin/packages", Some(&token), Some(package("Kashmir Valley Tour", "active"))).await?;
    assert_eq!(status, StatusCode::OK, "{active}");
    let (status, hidden) = send(&t.app, Method::POST, "/api/admin/packages", Some(&token), Some(package("Winter Gulmarg", "inactive"))).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, list) = send(&t.app, Method::GET, "/api/packages", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = list.as_array().into_iter().flatten().filter_map(|p| p["title"].as_str()).collect();
    assert_eq!(titles, vec!["Kashmir Valley Tour"]);

    let hidden_id = hidden["id"].as_str().unwrap_or_default();
    let (status, _) = send(&t.app, Method::GET, &format!("/api/packages/{hidden_id}"), None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&t.app, Method::GET, &format!("/api/admin/packages/{hidden_id}"), Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&t.app, Method::POST, "/api/admin/packages", Some(&token), Some(json!({ "title": "" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    Ok(())
}

#[tokio::test]
async fn deleting_unknown_ids_is_not_found() -> anyhow::Result<()> {
    let t = test_app().await?;
    let token = login(&t.app, "admin", ADMIN_PASSWORD).await?;
    for uri in ["/api/admin/packages/missing", "/api/admin/bookings/missing", "/api/admin/popups/missing", "/api/admin/gallery/missing"] {
        let (status, body) = send(&t.app, Method::DELETE, uri, Some(&token), None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "Not Found");
    }

    let (_, created) = send(&t.app, Method::POST, "/api/admin/packages", Some(&token), Some(package("Sonamarg Day Trip", "active"))).await?;
    let uri = format!("/api/admin/packages/{}", created["id"].as_str().unwrap_or_default());
    let (status, body) = send(&t.app, Method::DELETE, &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    let (status, _) = send(&t.app, Method::DELETE, &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn testimonials_need_rating_in_range_and_approval() -> anyhow::Result<()> {
    let t = test_app().await?;
    let review = |rating: i64| {
        json!({
            "customerName": "Asha",
            "location": "Pune",
            "rating": rating,
            "review": "Wonderful houseboat stay",
            "packageName": "Kashmir Valley Tour",
            "date": "March 2024"
        })
    };
    for rating in [0, 6, -1] {
        let (status, _) = send(&t.app, Method::POST, "/api/testimonials", None, Some(review(rating))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {rating}");
    }
    let (status, created) = send(&t.app, Method::POST, "/api/testimonials", None, Some(review(5))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "pending");

    let (_, public) = send(&t.app, Method::GET, "/api/testimonials", None, None).await?;
    assert_eq!(public.as_array().map(Vec::len), Some(0));

    let token = login(&t.app, "admin", ADMIN_PASSWORD).await?;
    let uri = format!("/api/admin/testimonials/{}", created["id"].as_str().unwrap_or_default());
    let (status, _) = send(&t.app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "approved" }))).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, public) = send(&t.app, Method::GET, "/api/testimonials", None, None).await?;
    assert_eq!(public.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn bookings_start_pending_and_feed_stats() -> anyhow::Result<()> {
    let t = test_app().await?;
    let booking = json!({
        "customerName": "Ravi",
        "email": "ravi@example.com",
        "phone": "9999999999",
        "packageTitle": "Kashmir Valley Tour",
        "travelDate": "2030-05-01",
        "travelers": 2,
        "totalAmount": 49998.0
    });
    let (status, created) = send(&t.app, Method::POST, "/api/bookings", None, Some(booking)).await?;
    assert_eq!(status, StatusCode::OK, "{created}");
    assert_eq!(created["status"], "pending");

    let token = login(&t.app, "admin", ADMIN_PASSWORD).await?;
    let uri = format!("/api/admin/bookings/{}", created["id"].as_str().unwrap_or_default());
    let (status, _) = send(&t.app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "confirmed" }))).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = send(&t.app, Method::GET, "/api/admin/stats", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["activeBookings"], 1);
    assert_eq!(stats["monthlyRevenue"], 49998.0);
    assert_eq!(stats["recentBookings"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn non_image_upload_is_rejected_before_writing() -> anyhow::Result<()> {
    let t = test_app().await?;
    let token = login(&t.app, "admin", ADMIN_PASSWORD).await?;

    let body = multipart("XTESTBOUNDARY", &[("title", "Notes")], Some(("notes.txt", "text/plain", b"hello")));
    let (status, _) = upload(&t.app, &token, body).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(files_in(&t.upload_dir)?, 0);

    // stored file is removed again when the metadata is invalid
    let body = multipart("XTESTBOUNDARY", &[], Some(("lake.png", "image/png", b"\x89PNG\r\n")));
    let (status, _) = upload(&t.app, &token, body).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(files_in(&t.upload_dir)?, 0);
    Ok(())
}

#[tokio::test]
async fn image_upload_is_served_and_removed_with_its_record() -> anyhow::Result<()> {
    let t = test_app().await?;
    let token = login(&t.app, "admin", ADMIN_PASSWORD).await?;

    let body = multipart(
        "XTESTBOUNDARY",
        &[("title", "Dal Lake"), ("category", "lakes"), ("tags", "sunset, shikara,")],
        Some(("dal.PNG", "image/png", b"\x89PNG\r\nfake")),
    );
    let (status, image) = upload(&t.app, &token, body).await?;
    assert_eq!(status, StatusCode::OK, "{image}");
    assert_eq!(image["tags"], json!(["sunset", "shikara"]));
    let url = image["imageUrl"].as_str().unwrap_or_default().to_string();
    assert!(url.starts_with("/uploads/") && url.ends_with(".png"), "{url}");
    assert_eq!(files_in(&t.upload_dir)?, 1);

    let resp = t.app.clone().oneshot(Request::builder().uri(&url).body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, listed) = send(&t.app, Method::GET, "/api/gallery?category=lakes", None, None).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    let (_, listed) = send(&t.app, Method::GET, "/api/gallery?category=forts", None, None).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));

    let uri = format!("/api/admin/gallery/{}", image["id"].as_str().unwrap_or_default());
    let (status, _) = send(&t.app, Method::DELETE, &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(files_in(&t.upload_dir)?, 0);
    Ok(())
}

#[tokio::test]
async fn site_settings_are_created_on_first_read_and_reset() -> anyhow::Result<()> {
    let t = test_app().await?;
    let (status, settings) = send(&t.app, Method::GET, "/api/site-settings", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["companyInfo"]["name"], "G.M.B Travels Kashmir");

    let token = login(&t.app, "admin", ADMIN_PASSWORD).await?;
    let (status, updated) = send(
        &t.app,
        Method::PUT,
        "/api/admin/site-settings",
        Some(&token),
        Some(json!({ "companyInfo": { "name": "GMB Kashmir", "tagline": "Paradise" } })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["companyInfo"]["name"], "GMB Kashmir");

    let (status, _) = send(&t.app, Method::PUT, "/api/admin/site-settings", Some(&token), Some(json!({ "mapSettings": { "zoom": 40 } }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&t.app, Method::POST, "/api/admin/site-settings/reset", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert_eq!(body["settings"]["companyInfo"]["name"], "G.M.B Travels Kashmir");
    Ok(())
}

#[tokio::test]
async fn popups_toggle_and_follow_page_filter() -> anyhow::Result<()> {
    let t = test_app().await?;
    let token = login(&t.app, "admin", ADMIN_PASSWORD).await?;
    let popup = json!({
        "title": "Spring offer",
        "content": "20% off houseboats",
        "startDate": "2000-01-01",
        "endDate": "2999-12-31",
        "showOnPages": ["home"]
    });
    let (status, created) = send(&t.app, Method::POST, "/api/admin/popups", Some(&token), Some(popup)).await?;
    assert_eq!(status, StatusCode::OK, "{created}");

    let (_, live) = send(&t.app, Method::GET, "/api/popups?page=home", None, None).await?;
    assert_eq!(live.as_array().map(Vec::len), Some(1));
    let (_, live) = send(&t.app, Method::GET, "/api/popups?page=contact", None, None).await?;
    assert_eq!(live.as_array().map(Vec::len), Some(0));

    let uri = format!("/api/admin/popups/{}/toggle", created["id"].as_str().unwrap_or_default());
    let (status, toggled) = send(&t.app, Method::POST, &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["isActive"], false);
    let (_, live) = send(&t.app, Method::GET, "/api/popups", None, None).await?;
    assert_eq!(live.as_array().map(Vec::len), Some(0));
    Ok(())
}
