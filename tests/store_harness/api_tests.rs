//! Macro-generated HTTP tests for the `/api` surface.
//!
//! `api_tests!` builds a full router over the given store with a static admin
//! token and drives it with `axum_test::TestServer`.
//!
//! Titles and names are unique within each test: the MongoDB backend enforces
//! unique slugs and category names.
//!
//! # Generated Tests
//!
//! ## Query builder
//! - `test_list_pagination_windows`: 25 records, 10 per page
//! - `test_list_default_limit_and_past_end`
//! - `test_anonymous_callers_only_see_published`
//! - `test_search_is_anded_with_filters`
//! - `test_operator_rewrite`
//! - `test_sort_and_select`
//!
//! ## Artworks
//! - `test_featured_artworks`, `test_views_increment`, `test_category_population`,
//!   `test_stats_require_admin`, `test_artwork_errors`, `test_update_and_delete_artwork`
//!
//! ## Ordered lists
//! - `test_hero_slides_append_and_reorder`, `test_hero_slide_explicit_order_coercion`,
//!   `test_reorder_rejects_bad_payloads`, `test_hero_slide_visibility`,
//!   `test_awards_sorted_by_year_then_order`
//!
//! ## Other resources
//! - `test_categories`, `test_photography`, `test_messages`, `test_health`

#[macro_export]
macro_rules! api_tests {
    ($store_factory:expr) => {
        mod api_integration_tests {
            use super::*;
            use atelier::core::auth::StaticTokenProvider;
            use atelier::server::ServerBuilder;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let store = $store_factory;
                let app = ServerBuilder::new()
                    .with_store(store)
                    .with_auth(StaticTokenProvider::new([ADMIN_TOKEN]))
                    .build()
                    .unwrap();
                TestServer::try_new(app).unwrap()
            }

            /// POST as admin, expecting `201`; returns `data`
            async fn create(server: &TestServer, path: &str, payload: Value) -> Value {
                let response = server
                    .post(path)
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&payload)
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.json::<Value>()["data"].clone()
            }

            async fn get_json(server: &TestServer, path: &str) -> Value {
                let response = server.get(path).await;
                response.assert_status(StatusCode::OK);
                response.json::<Value>()
            }

            async fn admin_get_json(server: &TestServer, path: &str) -> Value {
                let response = server.get(path).authorization_bearer(ADMIN_TOKEN).await;
                response.assert_status(StatusCode::OK);
                response.json::<Value>()
            }

            fn slide(title: &str) -> Value {
                json!({"title": title, "imageUrl": format!("https://cdn.test/{title}.jpg")})
            }

            // ==============================================================
            // Query builder
            // ==============================================================

            #[tokio::test]
            async fn test_list_pagination_windows() {
                let server = make_server().await;
                for i in 1..=25 {
                    create(&server, "/api/artworks", artwork_payload(&format!("Piece {i}"), json!({"order": i}))).await;
                }

                let first = get_json(&server, "/api/artworks?limit=10&page=1&sort=order").await;
                assert_eq!(first["success"], json!(true));
                assert_eq!(first["count"], json!(10));
                assert_eq!(first["total"], json!(25));
                assert_eq!(first["pagination"]["next"], json!({"page": 2, "limit": 10}));
                assert!(first["pagination"].get("prev").is_none());
                assert_eq!(data_field(&first, "order")[0], json!(1));

                let last = get_json(&server, "/api/artworks?limit=10&page=3&sort=order").await;
                assert_eq!(last["count"], json!(5));
                assert_eq!(last["total"], json!(25));
                assert_eq!(last["pagination"]["prev"], json!({"page": 2, "limit": 10}));
                assert!(last["pagination"].get("next").is_none());
                assert_eq!(data_field(&last, "order")[0], json!(21));
            }

            #[tokio::test]
            async fn test_list_default_limit_and_past_end() {
                let server = make_server().await;
                for i in 1..=13 {
                    create(&server, "/api/artworks", artwork_payload(&format!("Study {i}"), json!({}))).await;
                }

                let body = get_json(&server, "/api/artworks?limit=abc&page=-2").await;
                assert_eq!(body["count"], json!(12));
                assert_eq!(body["pagination"]["next"], json!({"page": 2, "limit": 12}));

                let body = get_json(&server, "/api/artworks?page=9").await;
                assert_eq!(body["count"], json!(0));
                assert_eq!(body["total"], json!(13));
                assert!(body["pagination"].get("next").is_none());
                assert_eq!(body["pagination"]["prev"], json!({"page": 8, "limit": 12}));

                let body = get_json(&server, "/api/artworks?page=18446744073709551615").await;
                assert_eq!(body["count"], json!(0));
                assert_eq!(body["total"], json!(13));
                assert!(body["pagination"].get("next").is_none());
                assert_eq!(
                    body["pagination"]["prev"],
                    json!({"page": 18446744073709551614u64, "limit": 12})
                );
            }

            #[tokio::test]
            async fn test_anonymous_callers_only_see_published() {
                let server = make_server().await;
                create(&server, "/api/artworks", artwork_payload("Public", json!({}))).await;
                create(&server, "/api/artworks", artwork_payload("Sketch", json!({"status": "draft"}))).await;

                let body = get_json(&server, "/api/artworks").await;
                assert_eq!(body["total"], json!(1));
                assert_eq!(data_field(&body, "title"), vec![json!("Public")]);

                let body = get_json(&server, "/api/artworks?status=draft").await;
                assert_eq!(body["total"], json!(1));
                assert_eq!(data_field(&body, "status"), vec![json!("published")]);

                let body = admin_get_json(&server, "/api/artworks").await;
                assert_eq!(body["total"], json!(2));
                let body = admin_get_json(&server, "/api/artworks?status=draft").await;
                assert_eq!(data_field(&body, "title"), vec![json!("Sketch")]);
            }

            #[tokio::test]
            async fn test_search_is_anded_with_filters() {
                let server = make_server().await;
                create(&server, "/api/artworks", artwork_payload("Sunset harbor", json!({"medium": "oil"}))).await;
                create(&server, "/api/artworks", artwork_payload("Sunset field", json!({"medium": "watercolor"}))).await;
                create(&server, "/api/artworks", artwork_payload("Morning harbor", json!({"medium": "oil"}))).await;

                let body = get_json(&server, "/api/artworks?search=sunset&medium=oil").await;
                assert_eq!(body["total"], json!(1));
                assert_eq!(data_field(&body, "title"), vec![json!("Sunset harbor")]);

                let body = get_json(&server, "/api/artworks?search=sunset").await;
                assert_eq!(body["total"], json!(2));

                for blank in ["", "%20%20", "!!!"] {
                    let body = get_json(&server, &format!("/api/artworks?search={blank}")).await;
                    assert_eq!(body["total"], json!(3), "search={blank}");
                    assert_eq!(body["count"], json!(3), "search={blank}");
                }
            }

            #[tokio::test]
            async fn test_operator_rewrite() {
                let server = make_server().await;
                for (title, year, medium) in [
                    ("Early", 2018, "oil"),
                    ("Middle", 2020, "acrylic"),
                    ("Late", 2022, "pencil"),
                ] {
                    create(&server, "/api/artworks", artwork_payload(title, json!({"year": year, "medium": medium}))).await;
                }

                let body = get_json(&server, "/api/artworks?year%5Bgte%5D=2020&sort=year").await;
                assert_eq!(data_field(&body, "title"), vec![json!("Middle"), json!("Late")]);

                let body = get_json(&server, "/api/artworks?year%5Bgt%5D=2018&year%5Blt%5D=2022").await;
                assert_eq!(data_field(&body, "title"), vec![json!("Middle")]);

                let body = get_json(&server, "/api/artworks?medium%5Bin%5D=oil,pencil&sort=year").await;
                assert_eq!(data_field(&body, "title"), vec![json!("Early"), json!("Late")]);
            }

            #[tokio::test]
            async fn test_sort_and_select() {
                let server = make_server().await;
                for (title, year) in [("B side", 2019), ("A side", 2021), ("C side", 2020)] {
                    create(&server, "/api/artworks", artwork_payload(title, json!({"year": year, "medium": "ink"}))).await;
                }

                let body = get_json(&server, "/api/artworks?sort=-year").await;
                assert_eq!(data_field(&body, "year"), vec![json!(2021), json!(2020), json!(2019)]);

                let body = get_json(&server, "/api/artworks?sort=title&select=title,year").await;
                assert_eq!(data_field(&body, "title"), vec![json!("A side"), json!("B side"), json!("C side")]);
                let first = &body["data"][0];
                assert!(first.get("id").is_some());
                assert!(first.get("year").is_some());
                assert!(first.get("medium").is_none());
            }

            // ==============================================================
            // Artworks
            // ==============================================================

            #[tokio::test]
            async fn test_featured_artworks() {
                let server = make_server().await;
                for i in 1..=8 {
                    create(&server, "/api/artworks", artwork_payload(&format!("Featured {i}"), json!({"featured": true}))).await;
                }
                create(&server, "/api/artworks", artwork_payload("Hidden gem", json!({"featured": true, "status": "draft"}))).await;
                create(&server, "/api/artworks", artwork_payload("Plain", json!({}))).await;

                let body = get_json(&server, "/api/artworks/featured").await;
                assert_eq!(body["count"], json!(6));

                let body = get_json(&server, "/api/artworks/featured?limit=20").await;
                assert_eq!(body["count"], json!(8));
                assert!(!data_field(&body, "title").contains(&json!("Hidden gem")));
            }

            #[tokio::test]
            async fn test_views_increment() {
                let server = make_server().await;
                let artwork = create(&server, "/api/artworks", artwork_payload("Watched", json!({}))).await;
                let id = artwork["id"].as_str().unwrap().to_string();
                let slug = artwork["slug"].as_str().unwrap().to_string();
                assert!(slug.starts_with("watched-"));

                let body = get_json(&server, &format!("/api/artworks/{id}")).await;
                assert_eq!(body["data"]["views"], json!(1));

                let body = get_json(&server, &format!("/api/artworks/slug/{slug}")).await;
                assert_eq!(body["data"]["views"], json!(2));
                assert_eq!(body["data"]["id"], json!(id));
            }

            #[tokio::test]
            async fn test_category_population() {
                let server = make_server().await;
                let category = create(&server, "/api/categories", json!({"name": "Oil Paintings"})).await;
                create(
                    &server,
                    "/api/artworks",
                    artwork_payload("Harbor", json!({"category": category["id"]})),
                )
                .await;

                let body = get_json(&server, "/api/artworks").await;
                let populated = &body["data"][0]["category"];
                assert_eq!(populated["id"], category["id"]);
                assert_eq!(populated["name"], json!("Oil Paintings"));
                assert_eq!(populated["slug"], json!("oil-paintings"));
            }

            #[tokio::test]
            async fn test_stats_require_admin() {
                let server = make_server().await;
                let landscapes = create(&server, "/api/categories", json!({"name": "Landscapes"})).await;
                create(&server, "/api/artworks", artwork_payload("One", json!({"medium": "oil", "isForSale": true, "category": landscapes["id"]}))).await;
                create(&server, "/api/artworks", artwork_payload("Two", json!({"medium": "oil", "isSold": true, "category": landscapes["id"]}))).await;
                create(&server, "/api/artworks", artwork_payload("Three", json!({"medium": "digital"}))).await;

                server
                    .get("/api/artworks/stats")
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);

                let body = admin_get_json(&server, "/api/artworks/stats").await;
                let stats = &body["data"];
                assert_eq!(stats["totalArtworks"], json!(3));
                assert_eq!(stats["forSale"], json!(1));
                assert_eq!(stats["sold"], json!(1));
                assert_eq!(stats["byMedium"][0], json!({"medium": "oil", "count": 2}));
                assert_eq!(
                    stats["byCategory"][0],
                    json!({"category": landscapes["id"], "name": "Landscapes", "count": 2})
                );
            }

            #[tokio::test]
            async fn test_artwork_errors() {
                let server = make_server().await;

                let response = server.get(&format!("/api/artworks/{}", uuid::Uuid::new_v4())).await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body = response.json::<Value>();
                assert_eq!(body["success"], json!(false));
                assert_eq!(body["message"], json!("Artwork not found"));

                server
                    .get("/api/artworks/not-a-uuid")
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);

                server
                    .get("/api/artworks/slug/missing")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);

                server
                    .post("/api/artworks")
                    .json(&artwork_payload("Anonymous", json!({})))
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);

                server
                    .post("/api/artworks")
                    .authorization_bearer("wrong-token")
                    .json(&artwork_payload("Wrong", json!({})))
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);

                let response = server
                    .post("/api/artworks")
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"title": "x".repeat(201)}))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["success"], json!(false));

                server
                    .post("/api/artworks")
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"medium": "oil"}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_update_and_delete_artwork() {
                let server = make_server().await;
                let artwork = create(&server, "/api/artworks", artwork_payload("Draft one", json!({"price": 100}))).await;
                let id = artwork["id"].as_str().unwrap().to_string();

                let response = server
                    .put(&format!("/api/artworks/{id}"))
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"price": 250, "slug": "renamed", "unknownField": 1}))
                    .await;
                response.assert_status(StatusCode::OK);
                let updated = response.json::<Value>()["data"].clone();
                assert_eq!(updated["price"], json!(250.0));
                assert_eq!(updated["title"], json!("Draft one"));
                assert!(updated.get("unknownField").is_none());
                assert_eq!(updated["createdAt"], artwork["createdAt"]);

                server
                    .put(&format!("/api/artworks/{id}"))
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"price": -5}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);

                let response = server
                    .delete(&format!("/api/artworks/{id}"))
                    .authorization_bearer(ADMIN_TOKEN)
                    .await;
                response.assert_status(StatusCode::OK);
                assert_eq!(response.json::<Value>(), json!({"success": true, "data": {}}));

                server
                    .delete(&format!("/api/artworks/{id}"))
                    .authorization_bearer(ADMIN_TOKEN)
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // Ordered lists
            // ==============================================================

            #[tokio::test]
            async fn test_hero_slides_append_and_reorder() {
                let server = make_server().await;
                let a = create(&server, "/api/hero-slides", slide("a")).await;
                let b = create(&server, "/api/hero-slides", slide("b")).await;
                let c = create(&server, "/api/hero-slides", slide("c")).await;
                assert_eq!(
                    [&a, &b, &c].map(|s| s["order"].clone()),
                    [json!(0), json!(1), json!(2)]
                );

                let pinned = create(&server, "/api/hero-slides", {
                    let mut s = slide("d");
                    s["order"] = json!(0);
                    s
                })
                .await;
                assert_eq!(pinned["order"], json!(0));

                let response = server
                    .put("/api/hero-slides/reorder")
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"slides": [
                        {"id": a["id"], "order": 30},
                        {"id": b["id"], "order": 20},
                        {"id": c["id"], "order": 10},
                        {"id": uuid::Uuid::new_v4().to_string(), "order": 5}
                    ]}))
                    .await;
                response.assert_status(StatusCode::OK);
                let body = response.json::<Value>();
                assert_eq!(
                    data_field(&body, "title"),
                    vec![json!("d"), json!("c"), json!("b"), json!("a")]
                );

                let listed = get_json(&server, "/api/hero-slides").await;
                assert_eq!(listed["count"], json!(4));
                assert_eq!(
                    data_field(&listed, "order"),
                    vec![json!(0), json!(10), json!(20), json!(30)]
                );

                let next = create(&server, "/api/hero-slides", slide("e")).await;
                assert_eq!(next["order"], json!(31));
            }

            #[tokio::test]
            async fn test_hero_slide_explicit_order_coercion() {
                let server = make_server().await;
                let mut quoted = slide("quoted");
                quoted["order"] = json!("3");
                assert_eq!(create(&server, "/api/hero-slides", quoted).await["order"], json!(3));

                let mut named = slide("named");
                named["order"] = json!("last");
                assert_eq!(create(&server, "/api/hero-slides", named).await["order"], json!(4));

                let top = create(&server, "/api/hero-slides", slide("top")).await;
                server
                    .put("/api/hero-slides/reorder")
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"slides": [{"id": top["id"], "order": i64::MAX}]}))
                    .await
                    .assert_status(StatusCode::OK);

                let after = create(&server, "/api/hero-slides", slide("after")).await;
                assert_eq!(after["order"], json!(i64::MAX));
            }

            #[tokio::test]
            async fn test_reorder_rejects_bad_payloads() {
                let server = make_server().await;
                let a = create(&server, "/api/hero-slides", slide("a")).await;

                for payload in [
                    json!({}),
                    json!({"slides": "nope"}),
                    json!({"slides": []}),
                    json!({"slides": [{"id": a["id"]}]}),
                    json!({"slides": [{"id": "bad", "order": 1}]}),
                ] {
                    let response = server
                        .put("/api/hero-slides/reorder")
                        .authorization_bearer(ADMIN_TOKEN)
                        .json(&payload)
                        .await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    assert_eq!(
                        response.json::<Value>()["message"],
                        json!("Please provide an array of slides with id and order")
                    );
                }

                // A rejected payload writes nothing, even for its valid entries
                let response = server
                    .put("/api/hero-slides/reorder")
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"slides": [{"id": a["id"], "order": 9}, {"id": a["id"]}]}))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body = get_json(&server, "/api/hero-slides").await;
                assert_eq!(data_field(&body, "order"), vec![json!(0)]);

                server
                    .put("/api/hero-slides/reorder")
                    .json(&json!({"slides": [{"id": a["id"], "order": 1}]}))
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);
            }

            #[tokio::test]
            async fn test_hero_slide_visibility() {
                let server = make_server().await;
                create(&server, "/api/hero-slides", slide("shown")).await;
                let hidden = create(&server, "/api/hero-slides", {
                    let mut s = slide("hidden");
                    s["isActive"] = json!(false);
                    s
                })
                .await;

                let body = get_json(&server, "/api/hero-slides").await;
                assert_eq!(data_field(&body, "title"), vec![json!("shown")]);

                let body = admin_get_json(&server, "/api/hero-slides").await;
                assert_eq!(body["count"], json!(2));

                let response = server
                    .put(&format!("/api/hero-slides/{}", hidden["id"].as_str().unwrap()))
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"isActive": true, "subtitle": "now visible"}))
                    .await;
                response.assert_status(StatusCode::OK);

                let body = get_json(&server, "/api/hero-slides").await;
                assert_eq!(body["count"], json!(2));
            }

            #[tokio::test]
            async fn test_awards_sorted_by_year_then_order() {
                let server = make_server().await;
                let old = create(&server, "/api/awards", json!({"title": "Old", "year": 2019})).await;
                let second = create(&server, "/api/awards", json!({"title": "Second", "year": 2023})).await;
                let first = create(&server, "/api/awards", json!({"title": "First", "year": 2023})).await;
                create(&server, "/api/awards", json!({"title": "Retired", "year": 2024, "isActive": false})).await;
                assert_eq!(old["order"], json!(0));
                assert_eq!(first["order"], json!(2));

                let body = get_json(&server, "/api/awards").await;
                assert_eq!(
                    data_field(&body, "title"),
                    vec![json!("Second"), json!("First"), json!("Old")]
                );

                let response = server
                    .put("/api/awards/reorder")
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"awards": [
                        {"id": first["id"], "order": 0},
                        {"id": second["id"], "order": 1}
                    ]}))
                    .await;
                response.assert_status(StatusCode::OK);

                let body = get_json(&server, "/api/awards").await;
                assert_eq!(
                    data_field(&body, "title"),
                    vec![json!("First"), json!("Second"), json!("Old")]
                );

                let response = server
                    .put("/api/awards/reorder")
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"slides": []}))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["message"],
                    json!("Please provide an array of awards with id and order")
                );

                server
                    .post("/api/awards")
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"title": "No year"}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Other resources
            // ==============================================================

            #[tokio::test]
            async fn test_categories() {
                let server = make_server().await;
                create(&server, "/api/categories", json!({"name": "Watercolor", "order": 1})).await;
                create(&server, "/api/categories", json!({"name": "Portraits", "order": 0})).await;
                create(&server, "/api/categories", json!({"name": "Abstract", "order": 1})).await;

                let body = get_json(&server, "/api/categories").await;
                assert_eq!(
                    data_field(&body, "name"),
                    vec![json!("Portraits"), json!("Abstract"), json!("Watercolor")]
                );

                let body = get_json(&server, "/api/categories/slug/watercolor").await;
                assert_eq!(body["data"]["name"], json!("Watercolor"));

                let response = server.get(&format!("/api/categories/{}", uuid::Uuid::new_v4())).await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["message"], json!("Category not found"));
            }

            #[tokio::test]
            async fn test_photography() {
                let server = make_server().await;
                for (title, category, active) in [
                    ("Coast", "landscape", true),
                    ("Face", "portrait", true),
                    ("Dunes", "landscape", true),
                    ("Unlisted", "street", false),
                    ("Plain", "", true),
                ] {
                    create(
                        &server,
                        "/api/photography",
                        json!({
                            "title": title,
                            "category": category,
                            "isActive": active,
                            "imageUrl": format!("https://cdn.test/{title}.jpg")
                        }),
                    )
                    .await;
                }

                let body = get_json(&server, "/api/photography").await;
                assert_eq!(body["count"], json!(4));

                let body = get_json(&server, "/api/photography?category=landscape").await;
                assert_eq!(body["count"], json!(2));

                let body = get_json(&server, "/api/photography?active=false").await;
                assert_eq!(body["count"], json!(4));

                let body = admin_get_json(&server, "/api/photography?active=false").await;
                assert_eq!(data_field(&body, "title"), vec![json!("Unlisted")]);

                let body = admin_get_json(&server, "/api/photography").await;
                assert_eq!(body["count"], json!(5));

                let body = get_json(&server, "/api/photography/latest?limit=2").await;
                assert_eq!(body["count"], json!(2));

                let body = get_json(&server, "/api/photography/categories").await;
                assert_eq!(body["data"], json!(["landscape", "portrait"]));

                let response = server.get(&format!("/api/photography/{}", uuid::Uuid::new_v4())).await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["message"], json!("Photography work not found"));
            }

            #[tokio::test]
            async fn test_messages() {
                let server = make_server().await;
                let response = server
                    .post("/api/messages")
                    .json(&json!({
                        "name": " Ada ",
                        "email": "ada@example.com",
                        "subject": "commission",
                        "message": "Could you paint my cat?"
                    }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let message = response.json::<Value>()["data"].clone();
                assert_eq!(message["name"], json!("Ada"));
                assert_eq!(message["isRead"], json!(false));
                let id = message["id"].as_str().unwrap().to_string();

                server
                    .post("/api/messages")
                    .json(&json!({"name": "Bob", "email": "nope", "subject": "general", "message": "hi"}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);

                server.get("/api/messages").await.assert_status(StatusCode::UNAUTHORIZED);
                let body = admin_get_json(&server, "/api/messages").await;
                assert_eq!(body["count"], json!(1));

                let response = server
                    .put(&format!("/api/messages/{id}"))
                    .authorization_bearer(ADMIN_TOKEN)
                    .json(&json!({"isRead": true, "message": "rewritten"}))
                    .await;
                response.assert_status(StatusCode::OK);
                let updated = response.json::<Value>()["data"].clone();
                assert_eq!(updated["isRead"], json!(true));
                assert_eq!(updated["message"], json!("Could you paint my cat?"));

                let response = server
                    .get(&format!("/api/messages/{}", uuid::Uuid::new_v4()))
                    .authorization_bearer(ADMIN_TOKEN)
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["message"], json!("Message not found"));

                server
                    .delete(&format!("/api/messages/{id}"))
                    .authorization_bearer(ADMIN_TOKEN)
                    .await
                    .assert_status(StatusCode::OK);
            }

            #[tokio::test]
            async fn test_health() {
                let server = make_server().await;
                let body = get_json(&server, "/api/health").await;
                assert_eq!(body["status"], json!("ok"));
            }
        }
    };
}
