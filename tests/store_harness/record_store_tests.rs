//! Macro-generated test suite for `RecordStore` contract validation.
//!
//! The `record_store_tests!` macro generates a test module that validates any
//! `RecordStore` implementation: CRUD, structural filters with query-string
//! coercion, sorting with skip/limit, partial updates and distinct values.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_insert_and_get`: insert then retrieve, all fields preserved
//! - `test_get_missing`: unknown id returns None
//! - `test_insert_duplicate_id`: second insert with the same id fails
//! - `test_update_merges_patch`: patch keys overwrite, others are kept
//! - `test_update_missing`: unknown id returns None
//! - `test_delete`: delete once true, then false
//!
//! ## Queries
//! - `test_filter_coerces_query_strings`: `"2020"` matches integer 2020
//! - `test_range_operators`: gte/lt bounds combine
//! - `test_in_operator_and_repeated_keys`: comma list and repeated keys
//! - `test_array_fields_match_any_element`
//! - `test_sorted_window`: sort, skip and limit
//! - `test_distinct_values`: arrays flattened, duplicates removed, filter applied
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks

/// Generate a full `RecordStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store that is `Clone + 'static`.
/// It is re-evaluated for each test.
#[macro_export]
macro_rules! record_store_tests {
    ($factory:expr) => {
        mod record_store_contract_tests {
            use super::*;
            use atelier::core::query::{Filter, QueryRequest, SortDirection, SortSpec};
            use atelier::core::store::{Document, RecordStore};
            use serde_json::json;
            use uuid::Uuid;

            fn query(raw: &str) -> Filter {
                Filter::from_request(&QueryRequest::from_query_str(raw))
            }

            async fn seed_years(store: &dyn RecordStore) {
                for (title, year, medium) in [
                    ("Dawn", 2018, "oil"),
                    ("Noon", 2020, "ink"),
                    ("Dusk", 2021, "oil"),
                    ("Night", 2022, "charcoal"),
                ] {
                    store
                        .insert(
                            WIDGETS,
                            widget(json!({"title": title, "year": year, "medium": medium})),
                        )
                        .await
                        .unwrap();
                }
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_get() {
                let store = $factory;
                let doc = widget(json!({
                    "title": "Dawn",
                    "year": 2020,
                    "price": 12.5,
                    "featured": true,
                    "tags": ["oil", "sea"],
                    "dimensions": {"width": 30, "unit": "cm"}
                }));
                let id = id_of(&doc);

                let inserted = store.insert(WIDGETS, doc.clone()).await.unwrap();
                assert_eq!(inserted, doc);

                let fetched = store.get(WIDGETS, &id).await.unwrap().unwrap();
                assert_eq!(fetched["id"], json!(id.to_string()));
                assert_eq!(fetched["title"], json!("Dawn"));
                assert_eq!(fetched["year"], json!(2020));
                assert_eq!(fetched["price"], json!(12.5));
                assert_eq!(fetched["featured"], json!(true));
                assert_eq!(fetched["tags"], json!(["oil", "sea"]));
                assert_eq!(fetched["dimensions"]["unit"], json!("cm"));
            }

            #[tokio::test]
            async fn test_get_missing() {
                let store = $factory;
                assert!(store.get(WIDGETS, &Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_insert_duplicate_id() {
                let store = $factory;
                let doc = widget(json!({"title": "Dawn"}));
                store.insert(WIDGETS, doc.clone()).await.unwrap();
                assert!(store.insert(WIDGETS, doc).await.is_err());
            }

            #[tokio::test]
            async fn test_update_merges_patch() {
                let store = $factory;
                let doc = widget(json!({"title": "Dawn", "order": 1, "views": 0}));
                let id = id_of(&doc);
                store.insert(WIDGETS, doc).await.unwrap();

                let mut patch = Document::new();
                patch.insert("order".into(), json!(5));
                patch.insert("id".into(), json!(Uuid::new_v4().to_string()));
                let updated = store.update_by_id(WIDGETS, &id, patch).await.unwrap().unwrap();

                assert_eq!(updated["order"], json!(5));
                assert_eq!(updated["title"], json!("Dawn"));
                assert_eq!(updated["id"], json!(id.to_string()));

                let fetched = store.get(WIDGETS, &id).await.unwrap().unwrap();
                assert_eq!(fetched["order"], json!(5));
            }

            #[tokio::test]
            async fn test_update_missing() {
                let store = $factory;
                let mut patch = Document::new();
                patch.insert("order".into(), json!(1));
                let result = store.update_by_id(WIDGETS, &Uuid::new_v4(), patch).await;
                assert!(result.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete() {
                let store = $factory;
                let doc = widget(json!({"title": "Dawn"}));
                let id = id_of(&doc);
                store.insert(WIDGETS, doc).await.unwrap();

                assert!(store.delete(WIDGETS, &id).await.unwrap());
                assert!(!store.delete(WIDGETS, &id).await.unwrap());
                assert!(store.get(WIDGETS, &id).await.unwrap().is_none());
            }

            // ==================================================================
            // Queries
            // ==================================================================

            #[tokio::test]
            async fn test_filter_coerces_query_strings() {
                let store = $factory;
                seed_years(&store).await;

                let found = store.find(WIDGETS, &query("year=2020")).await.unwrap();
                assert_eq!(field_values(&found, "title"), vec![json!("Noon")]);
                assert_eq!(store.count(WIDGETS, &query("medium=oil")).await.unwrap(), 2);
                assert_eq!(store.count(WIDGETS, &query("medium=pastel")).await.unwrap(), 0);
                assert_eq!(store.count(WIDGETS, &Filter::new()).await.unwrap(), 4);
            }

            #[tokio::test]
            async fn test_range_operators() {
                let store = $factory;
                seed_years(&store).await;

                let sort = SortSpec::ascending("year");
                let found = store
                    .find_sorted(WIDGETS, &query("year%5Bgte%5D=2020"), &sort, 0, None)
                    .await
                    .unwrap();
                assert_eq!(field_values(&found, "year"), vec![json!(2020), json!(2021), json!(2022)]);

                let found = store
                    .find_sorted(
                        WIDGETS,
                        &query("year%5Bgt%5D=2018&year%5Blt%5D=2022"),
                        &sort,
                        0,
                        None,
                    )
                    .await
                    .unwrap();
                assert_eq!(field_values(&found, "year"), vec![json!(2020), json!(2021)]);

                let found = store
                    .find(WIDGETS, &query("year%5Blte%5D=2018"))
                    .await
                    .unwrap();
                assert_eq!(field_values(&found, "title"), vec![json!("Dawn")]);
            }

            #[tokio::test]
            async fn test_in_operator_and_repeated_keys() {
                let store = $factory;
                seed_years(&store).await;

                assert_eq!(
                    store.count(WIDGETS, &query("medium%5Bin%5D=ink,charcoal")).await.unwrap(),
                    2
                );
                assert_eq!(
                    store.count(WIDGETS, &query("medium=ink&medium=oil")).await.unwrap(),
                    3
                );
            }

            #[tokio::test]
            async fn test_array_fields_match_any_element() {
                let store = $factory;
                store
                    .insert(WIDGETS, widget(json!({"title": "A", "tags": ["sea", "blue"]})))
                    .await
                    .unwrap();
                store
                    .insert(WIDGETS, widget(json!({"title": "B", "tags": ["field"]})))
                    .await
                    .unwrap();

                let found = store.find(WIDGETS, &query("tags=blue")).await.unwrap();
                assert_eq!(field_values(&found, "title"), vec![json!("A")]);
            }

            #[tokio::test]
            async fn test_sorted_window() {
                let store = $factory;
                seed_years(&store).await;

                let newest = SortSpec::descending("year");
                let page = store
                    .find_sorted(WIDGETS, &Filter::new(), &newest, 1, Some(2))
                    .await
                    .unwrap();
                assert_eq!(field_values(&page, "year"), vec![json!(2021), json!(2020)]);

                let by_medium = SortSpec::ascending("medium").then("year", SortDirection::Descending);
                let all = store
                    .find_sorted(WIDGETS, &Filter::new(), &by_medium, 0, None)
                    .await
                    .unwrap();
                assert_eq!(
                    field_values(&all, "title"),
                    vec![json!("Night"), json!("Noon"), json!("Dusk"), json!("Dawn")]
                );

                let past_end = store
                    .find_sorted(WIDGETS, &Filter::new(), &newest, 10, Some(5))
                    .await
                    .unwrap();
                assert!(past_end.is_empty());
            }

            #[tokio::test]
            async fn test_distinct_values() {
                let store = $factory;
                for (tags, active) in [
                    (json!(["sea", "blue"]), true),
                    (json!(["blue"]), true),
                    (json!(["hidden"]), false),
                ] {
                    store
                        .insert(WIDGETS, widget(json!({"tags": tags, "isActive": active})))
                        .await
                        .unwrap();
                }

                let values = store
                    .distinct(WIDGETS, "tags", &Filter::new().eq("isActive", true))
                    .await
                    .unwrap();
                assert_eq!(values, vec![json!("blue"), json!("sea")]);

                let all = store.distinct(WIDGETS, "tags", &Filter::new()).await.unwrap();
                assert_eq!(all.len(), 3);
            }

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = std::sync::Arc::new($factory);
                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert(WIDGETS, widget(json!({"title": format!("W{i}")})))
                            .await
                            .unwrap();
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }
                assert_eq!(store.count(WIDGETS, &Filter::new()).await.unwrap(), 10);
            }
        }
    };
}
