mod common;

use anyhow::Result;
use axum::http::StatusCode;

use common::API_KEY;

#[tokio::test]
async fn stats_on_an_empty_directory_are_zero() -> Result<()> {
    let app = common::test_app();

    let res = common::request(&app, "GET", "/users/stats", Some(API_KEY), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["totalUsers"], 0);
    assert_eq!(res.body["lastWeekUsers"], 0);
    assert!(res.body["byDomain"].as_object().expect("byDomain map").is_empty());
    Ok(())
}

#[tokio::test]
async fn stats_group_users_by_email_domain() -> Result<()> {
    let app = common::test_app();
    for (name, email) in [("A", "a@x.com"), ("B", "b@x.com"), ("C", "c@y.com")] {
        let res = common::create_user(&app, name, email).await?;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let res = common::request(&app, "GET", "/users/stats", Some(API_KEY), None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["totalUsers"], 3);
    // All three were just created, inside the trailing 7 days
    assert_eq!(res.body["lastWeekUsers"], 3);
    assert_eq!(res.body["byDomain"]["x.com"], 2);
    assert_eq!(res.body["byDomain"]["y.com"], 1);
    Ok(())
}

#[tokio::test]
async fn stats_track_deletions() -> Result<()> {
    let app = common::test_app();
    let created = common::create_user(&app, "A", "a@x.com").await?;
    common::create_user(&app, "C", "c@y.com").await?;
    let id = created.body["user"]["id"].as_str().expect("id").to_string();

    common::request(&app, "DELETE", &format!("/users/{id}"), Some(API_KEY), None).await?;

    let res = common::request(&app, "GET", "/users/stats", Some(API_KEY), None).await?;
    assert_eq!(res.body["totalUsers"], 1);
    assert!(res.body["byDomain"].get("x.com").is_none());
    assert_eq!(res.body["byDomain"]["y.com"], 1);
    Ok(())
}
