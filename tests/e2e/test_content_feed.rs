use crate::e2e::helpers;

use banner_feed_backend::domain::content::ImageLanguage;
use chrono::{Duration, Utc};
use helpers::{generate_test_jwt, generate_test_jwt_with_subject, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;
use uuid::Uuid;

fn item_ids(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("Missing items array")
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_rank_anonymous_feed_by_trending_score(ctx: &TestContext) {
    let category = ctx.fixtures.create_category("Festivals").await.unwrap();
    let now = Utc::now();

    // 3 images, six days old, top priority: 6 + 1 - 0 = 7.0
    let older = ctx
        .fixtures
        .create_item(
            category.id,
            &[ImageLanguage::English, ImageLanguage::Hindi, ImageLanguage::English],
            0,
            now - Duration::days(6),
        )
        .await
        .unwrap();
    // 1 image, brand new, low priority: 2 + 7 - 1 = 8.0
    let fresh = ctx
        .fixtures
        .create_item(category.id, &[ImageLanguage::English], 10, now)
        .await
        .unwrap();

    let response = ctx.client.get("/api/content/feed").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(
        item_ids(body),
        vec![fresh.id.to_string(), older.id.to_string()]
    );

    let fresh_score = body["items"][0]["trendingScore"].as_f64().unwrap();
    let older_score = body["items"][1]["trendingScore"].as_f64().unwrap();
    assert!((fresh_score - 8.0).abs() < 0.01, "got {}", fresh_score);
    assert!((older_score - 7.0).abs() < 0.01, "got {}", older_score);

    assert_eq!(
        body["personalization"],
        json!({
            "isPersonalized": false,
            "filterType": "trending",
            "fallbackReason": "unauthenticated"
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_order_single_category_by_sort_order(ctx: &TestContext) {
    let wanted = ctx.fixtures.create_category("Wanted").await.unwrap();
    let other = ctx.fixtures.create_category("Other").await.unwrap();
    let now = Utc::now();

    let second = ctx
        .fixtures
        .create_item(wanted.id, &[ImageLanguage::English], 5, now)
        .await
        .unwrap();
    let first = ctx
        .fixtures
        .create_item(wanted.id, &[ImageLanguage::English], 1, now - Duration::days(30))
        .await
        .unwrap();
    ctx.fixtures
        .create_item(other.id, &[ImageLanguage::English], 0, now)
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/content/feed?category={}", wanted.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(
        item_ids(body),
        vec![first.id.to_string(), second.id.to_string()]
    );
    assert_eq!(body["pagination"]["totalItems"], 2);
    assert!(body["items"][0].get("trendingScore").is_none());
    assert_eq!(
        body["personalization"],
        json!({ "isPersonalized": false, "filterType": "category" })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_prefer_explicit_categories_over_user_interests(ctx: &TestContext) {
    let sports = ctx.fixtures.create_category("Sports").await.unwrap();
    let music = ctx.fixtures.create_category("Music").await.unwrap();
    let travel = ctx.fixtures.create_category("Travel").await.unwrap();
    let now = Utc::now();

    let sports_item = ctx
        .fixtures
        .create_item(sports.id, &[ImageLanguage::English], 1, now)
        .await
        .unwrap();
    let music_item = ctx
        .fixtures
        .create_item(music.id, &[ImageLanguage::English], 2, now)
        .await
        .unwrap();
    ctx.fixtures
        .create_item(travel.id, &[ImageLanguage::English], 0, now)
        .await
        .unwrap();

    let user_id = Uuid::new_v4();
    ctx.fixtures.add_interest(user_id, travel.id).await.unwrap();
    let token = generate_test_jwt(&user_id, &ctx.config.jwt_secret);

    let response = ctx
        .client
        .get_with_auth(
            &format!("/api/content/feed?categories={},{}", sports.id, music.id),
            &token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(
        item_ids(body),
        vec![sports_item.id.to_string(), music_item.id.to_string()]
    );
    assert_eq!(
        body["personalization"],
        json!({ "isPersonalized": false, "filterType": "categories" })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_personalize_feed_from_user_interests(ctx: &TestContext) {
    let liked = ctx.fixtures.create_category("Liked").await.unwrap();
    let ignored = ctx.fixtures.create_category("Ignored").await.unwrap();
    let now = Utc::now();

    let liked_item = ctx
        .fixtures
        .create_item(liked.id, &[ImageLanguage::Hindi], 3, now)
        .await
        .unwrap();
    ctx.fixtures
        .create_item(ignored.id, &[ImageLanguage::Hindi], 0, now)
        .await
        .unwrap();

    let user_id = Uuid::new_v4();
    ctx.fixtures.add_interest(user_id, liked.id).await.unwrap();
    let token = generate_test_jwt(&user_id, &ctx.config.jwt_secret);

    let response = ctx
        .client
        .get_with_auth("/api/content/feed", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(item_ids(body), vec![liked_item.id.to_string()]);
    assert_eq!(
        body["personalization"],
        json!({
            "isPersonalized": true,
            "filterType": "user_interests",
            "interestCategories": [liked.id.to_string()]
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_trending_when_user_has_no_interests(ctx: &TestContext) {
    let category = ctx.fixtures.create_category("General").await.unwrap();
    ctx.fixtures
        .create_item(category.id, &[ImageLanguage::English], 0, Utc::now())
        .await
        .unwrap();

    let token = generate_test_jwt(&Uuid::new_v4(), &ctx.config.jwt_secret);

    let response = ctx
        .client
        .get_with_auth("/api/content/feed", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert!(body["items"][0]["trendingScore"].is_number());
    assert_eq!(body["personalization"]["filterType"], "trending");
    assert_eq!(body["personalization"]["fallbackReason"], "no_interests");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_invalid_token_as_anonymous(ctx: &TestContext) {
    let token = generate_test_jwt(&Uuid::new_v4(), "some-other-secret");

    let response = ctx
        .client
        .get_with_auth("/api/content/feed", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json()["personalization"]["fallbackReason"],
        "unauthenticated"
    );

    let response = ctx
        .client
        .get_with_authorization("/api/content/feed", "Basic dXNlcjpwYXNz")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json()["personalization"]["fallbackReason"],
        "unauthenticated"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_non_uuid_subject_as_user_without_interests(ctx: &TestContext) {
    let token = generate_test_jwt_with_subject("legacy-user-42", &ctx.config.jwt_secret);

    let response = ctx
        .client
        .get_with_auth("/api/content/feed", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json()["personalization"]["fallbackReason"],
        "no_interests"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_exclude_deleted_and_suspended_items(ctx: &TestContext) {
    let category = ctx.fixtures.create_category("Mixed").await.unwrap();

    let visible = ctx
        .fixtures
        .create_item(category.id, &[ImageLanguage::English], 0, Utc::now())
        .await
        .unwrap();
    ctx.fixtures
        .create_hidden_item(category.id, true, false)
        .await
        .unwrap();
    ctx.fixtures
        .create_hidden_item(category.id, false, true)
        .await
        .unwrap();

    for path in [
        "/api/content/feed".to_string(),
        format!("/api/content/feed?category={}", category.id),
    ] {
        let response = ctx.client.get(&path).await.unwrap();

        response.assert_status(StatusCode::OK);

        let body = response.json();
        assert_eq!(item_ids(body), vec![visible.id.to_string()], "{}", path);
        assert_eq!(body["pagination"]["totalItems"], 1, "{}", path);
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_paginate_last_partial_page(ctx: &TestContext) {
    let category = ctx.fixtures.create_category("Paged").await.unwrap();
    let now = Utc::now();

    let mut ids = Vec::new();
    for sort_order in 0..25 {
        let item = ctx
            .fixtures
            .create_item(category.id, &[ImageLanguage::English], sort_order, now)
            .await
            .unwrap();
        ids.push(item.id.to_string());
    }

    let response = ctx
        .client
        .get(&format!(
            "/api/content/feed?category={}&page=3&limit=10",
            category.id
        ))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(item_ids(body), ids[20..].to_vec());
    assert_eq!(
        body["pagination"],
        json!({
            "totalItems": 25,
            "currentPage": 3,
            "totalPages": 3,
            "limit": 10,
            "serialNumberStartFrom": 21,
            "hasPrevPage": true,
            "hasNextPage": false,
            "prevPage": 2,
            "nextPage": null
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_page_past_the_end(ctx: &TestContext) {
    let category = ctx.fixtures.create_category("Short").await.unwrap();
    for sort_order in 0..3 {
        ctx.fixtures
            .create_item(category.id, &[ImageLanguage::English], sort_order, Utc::now())
            .await
            .unwrap();
    }

    let response = ctx
        .client
        .get("/api/content/feed?page=5&limit=2")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["currentPage"], 5);
    assert_eq!(body["pagination"]["hasNextPage"], false);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_only_images_in_requested_language(ctx: &TestContext) {
    let category = ctx.fixtures.create_category("Bilingual").await.unwrap();
    let item = ctx
        .fixtures
        .create_item(
            category.id,
            &[ImageLanguage::English, ImageLanguage::Hindi, ImageLanguage::English],
            0,
            Utc::now(),
        )
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!(
            "/api/content/feed?category={}&language=HINDI",
            category.id
        ))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let images = response.json()["items"][0]["images"].as_array().unwrap().clone();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["language"], "hindi");
    assert_eq!(images[0]["url"], item.images[1].url.as_str());
    assert_eq!(images[0]["altText"], item.images[1].alt_text.as_str());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_embed_category_in_each_item(ctx: &TestContext) {
    let category = ctx.fixtures.create_category("Diwali Specials").await.unwrap();
    let item = ctx
        .fixtures
        .create_item(category.id, &[ImageLanguage::English], 4, Utc::now())
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/content/feed?category={}", category.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let entry = &response.json()["items"][0];
    assert_eq!(entry["title"], item.title.as_str());
    assert_eq!(entry["slug"], item.slug.as_str());
    assert_eq!(entry["sortOrder"], 4);
    assert_eq!(
        entry["category"],
        json!({
            "id": category.id.to_string(),
            "title": "Diwali Specials",
            "slug": category.slug
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_query_parameters(ctx: &TestContext) {
    let cases = [
        ("/api/content/feed?category=not-an-id", "Invalid category id 'not-an-id'"),
        ("/api/content/feed?page=0", "page must be a positive integer"),
        ("/api/content/feed?limit=abc", "limit must be a positive integer"),
        ("/api/content/feed?language=tamil", "tamil"),
    ];

    for (path, message) in cases {
        let response = ctx.client.get(path).await.unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message(message);
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_request_id_with_feed(ctx: &TestContext) {
    let response = ctx.client.get("/api/content/feed").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header_exists("x-request-id");

    let body = response.json();
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["pagination"]["totalItems"], 0);
    assert_eq!(body["pagination"]["totalPages"], 0);
}
