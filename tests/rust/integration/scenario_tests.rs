//! End-to-end scenario runs against the mock backend

#[cfg(test)]
mod scenario_integration_tests {
    use inventory_api_tester::config::HarnessConfig;
    use inventory_api_tester::harness::ApiTester;
    use inventory_api_tester::scenarios::catalog::{self, Listing};
    use inventory_api_tester::scenarios::{self, dispatch, stock, Scenario};
    use serde_json::json;
    use test_case::test_case;

    use crate::mock_backend::{unreachable_base_url, MockBackend};

    async fn tester_for(backend: &MockBackend) -> ApiTester {
        ApiTester::with_base_url(backend.spawn().await)
    }

    #[tokio::test]
    async fn test_full_run_against_seeded_backend() {
        let backend = MockBackend::seeded();
        let mut tester = tester_for(&backend).await;

        let summary = scenarios::run_all(&mut tester, &Scenario::RESOURCE_ORDER).await;

        // 1 + 1 + 1 + 2 + 2 + 3 + 4 requests across the seven scenarios
        assert_eq!(summary.tests_run, 14);
        assert_eq!(summary.tests_passed, 14);
        assert!(summary.scenarios.iter().all(|(_, passed)| *passed));
        assert_eq!(summary.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_backend_still_completes() {
        let mut tester = ApiTester::with_base_url(unreachable_base_url().await);

        let summary = scenarios::run_all(&mut tester, &Scenario::RESOURCE_ORDER).await;

        // every scenario stops after its first failed call
        assert_eq!(summary.tests_run, 7);
        assert_eq!(summary.tests_passed, 0);
        assert!(summary.scenarios.iter().all(|(_, passed)| !*passed));
        assert_eq!(summary.exit_code(), 1);
    }

    #[test_case(20, true ; "expected catalog size")]
    #[test_case(19, false ; "one product missing")]
    #[tokio::test]
    async fn test_product_count_does_not_affect_result(count: usize, count_matches: bool) {
        let backend = MockBackend::seeded().with_products(count);
        let mut tester = tester_for(&backend).await;

        let report = catalog::check_listing(&mut tester, Listing::Products).await;

        assert!(report.success);
        assert_eq!(report.found, Some(count));
        assert_eq!(report.expected, 20);
        assert_eq!(report.count_matches(), count_matches);
        assert_eq!(tester.tests_passed(), 1);
    }

    #[tokio::test]
    async fn test_failed_listing_reports_no_count() {
        let backend = MockBackend::seeded().with_status("GET", "vehicles", 503);
        let mut tester = tester_for(&backend).await;

        let report = catalog::check_listing(&mut tester, Listing::Vehicles).await;

        assert!(!report.success);
        assert_eq!(report.found, None);
        assert!(!report.count_matches());
    }

    #[tokio::test]
    async fn test_routes_and_vehicles_listings() {
        let backend = MockBackend::seeded();
        let mut tester = tester_for(&backend).await;

        assert!(catalog::routes(&mut tester).await);
        assert!(catalog::vehicles(&mut tester).await);
        assert_eq!(tester.tests_run(), 2);
    }

    #[tokio::test]
    async fn test_listing_status_failure_fails_scenario() {
        let backend = MockBackend::seeded().with_status("GET", "routes", 500);
        let mut tester = tester_for(&backend).await;

        assert!(!catalog::routes(&mut tester).await);
    }

    #[tokio::test]
    async fn test_stock_log_updates_first_entry() {
        let backend = MockBackend::seeded();
        let mut tester = tester_for(&backend).await;

        assert!(stock::stock_log(&mut tester).await);

        let get = backend.last("GET", "stock-log").unwrap();
        assert_eq!(
            get.query.get("date").map(String::as_str),
            Some(tester.current_date())
        );
        let post = backend.last("POST", "stock-log").unwrap();
        assert_eq!(
            post.body,
            Some(json!({
                "product_id": 1,
                "date": tester.current_date(),
                "field": "sales_office",
                "value": 5
            }))
        );
    }

    #[tokio::test]
    async fn test_empty_stock_log_skips_update() {
        let backend = MockBackend::seeded().with_stock_log(0);
        let mut tester = tester_for(&backend).await;

        assert!(stock::stock_log(&mut tester).await);
        assert_eq!(tester.tests_run(), 1);
        assert_eq!(backend.count("POST", "stock-log"), 0);
    }

    #[tokio::test]
    async fn test_stock_log_listing_failure_short_circuits() {
        let backend = MockBackend::seeded().with_status("GET", "stock-log", 500);
        let mut tester = tester_for(&backend).await;

        assert!(!stock::stock_log(&mut tester).await);
        assert_eq!(tester.tests_run(), 1);
    }

    #[tokio::test]
    async fn test_stock_log_ignores_malformed_later_rows() {
        let backend = MockBackend::seeded().with_stock_log_rows(vec![
            json!({"id": 101, "product_id": 1}),
            json!({"id": 102, "product_id": null}),
        ]);
        let mut tester = tester_for(&backend).await;

        assert!(stock::stock_log(&mut tester).await);
        assert_eq!(tester.tests_run(), 2);

        let post = backend.last("POST", "stock-log").unwrap();
        assert_eq!(post.body.as_ref().unwrap()["product_id"], json!(1));
    }

    #[tokio::test]
    async fn test_stock_log_with_malformed_first_row_fails() {
        let backend = MockBackend::seeded()
            .with_stock_log_rows(vec![json!({"id": 101}), json!({"id": 102, "product_id": 2})]);
        let mut tester = tester_for(&backend).await;

        assert!(!stock::stock_log(&mut tester).await);
        assert_eq!(tester.tests_run(), 1);
        assert_eq!(backend.count("POST", "stock-log"), 0);
    }

    #[tokio::test]
    async fn test_prices_echoes_first_price() {
        let backend = MockBackend::seeded();
        let mut tester = tester_for(&backend).await;

        assert!(stock::prices(&mut tester).await);

        let post = backend.last("POST", "prices").unwrap();
        assert_eq!(
            post.body,
            Some(json!({"product_id": 1, "base_rate": 110.5, "conversion_factor": 13.6}))
        );
    }

    #[tokio::test]
    async fn test_prices_echoes_string_rates_unchanged() {
        let backend = MockBackend::seeded().with_price_rows(vec![
            json!({"productId": 1, "baseRate": "110.50", "conversionFactor": 13.6}),
            json!({"productId": "broken", "baseRate": []}),
        ]);
        let mut tester = tester_for(&backend).await;

        assert!(stock::prices(&mut tester).await);

        let post = backend.last("POST", "prices").unwrap();
        assert_eq!(
            post.body,
            Some(json!({"product_id": 1, "base_rate": "110.50", "conversion_factor": 13.6}))
        );
    }

    #[tokio::test]
    async fn test_failed_price_update_fails_scenario() {
        let backend = MockBackend::seeded().with_status("POST", "prices", 500);
        let mut tester = tester_for(&backend).await;

        assert!(!stock::prices(&mut tester).await);
        assert_eq!(tester.tests_run(), 2);
        assert_eq!(tester.tests_passed(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_uses_first_two_products() {
        let backend = MockBackend::seeded();
        let mut tester = tester_for(&backend).await;

        assert!(dispatch::dispatch_log(&mut tester).await);
        assert_eq!(tester.tests_run(), 3);

        let post = backend.last("POST", "dispatch-log").unwrap();
        assert_eq!(
            post.body,
            Some(json!({
                "route_name": "Uthukottai",
                "vehicle_number": "2259",
                "products": [
                    {"productId": 1, "quantity": 2},
                    {"productId": 2, "quantity": 3}
                ],
                "date": tester.current_date()
            }))
        );
    }

    #[tokio::test]
    async fn test_dispatch_without_products_skips_post() {
        let backend = MockBackend::seeded().with_products(0);
        let mut tester = tester_for(&backend).await;

        assert!(dispatch::dispatch_log(&mut tester).await);
        assert_eq!(tester.tests_run(), 2);
        assert_eq!(backend.count("POST", "dispatch-log"), 0);
    }

    #[tokio::test]
    async fn test_dispatch_stops_at_first_malformed_product() {
        let backend = MockBackend::seeded().with_product_rows(vec![
            json!({"id": 1, "name": "Product 1"}),
            json!({"name": "no id"}),
            json!({"id": 3, "name": "Product 3"}),
        ]);
        let mut tester = tester_for(&backend).await;

        assert!(dispatch::dispatch_log(&mut tester).await);

        let post = backend.last("POST", "dispatch-log").unwrap();
        assert_eq!(
            post.body.as_ref().unwrap()["products"],
            json!([{"productId": 1, "quantity": 2}])
        );
    }

    #[tokio::test]
    async fn test_dispatch_products_failure_short_circuits() {
        let backend = MockBackend::seeded().with_status("GET", "products", 500);
        let mut tester = tester_for(&backend).await;

        assert!(!dispatch::dispatch_log(&mut tester).await);
        assert_eq!(tester.tests_run(), 2);
        assert_eq!(tester.tests_passed(), 1);
        assert_eq!(backend.count("POST", "dispatch-log"), 0);
    }

    #[tokio::test]
    async fn test_vehicle_sales_posts_sale() {
        let backend = MockBackend::seeded();
        let mut tester = tester_for(&backend).await;

        assert!(dispatch::vehicle_sales(&mut tester).await);
        assert_eq!(tester.tests_run(), 4);
        assert_eq!(tester.tests_passed(), 4);

        let dispatch = backend.last("POST", "dispatch-log").unwrap();
        assert_eq!(dispatch.body.as_ref().unwrap()["route_name"], json!("Ponneri"));

        // stock_log_id carries the stock entry's product_id (1), not its id (101)
        let sale = backend.last("POST", "vehicle-sales").unwrap();
        assert_eq!(
            sale.body,
            Some(json!({"stock_log_id": 1, "vehicle_number": "4080", "quantity": 1}))
        );
    }

    #[tokio::test]
    async fn test_vehicle_sales_with_empty_stock_log_returns_false() {
        let backend = MockBackend::seeded().with_stock_log(0);
        let mut tester = tester_for(&backend).await;

        assert!(!dispatch::vehicle_sales(&mut tester).await);
        assert_eq!(tester.tests_run(), 3);
        assert_eq!(tester.tests_passed(), 3);
        assert_eq!(backend.count("POST", "vehicle-sales"), 0);
    }

    #[tokio::test]
    async fn test_vehicle_sales_dispatch_failure_short_circuits() {
        let backend = MockBackend::seeded().with_status("POST", "dispatch-log", 500);
        let mut tester = tester_for(&backend).await;

        assert!(!dispatch::vehicle_sales(&mut tester).await);
        assert_eq!(tester.tests_run(), 2);
        assert_eq!(tester.tests_passed(), 1);
        assert_eq!(backend.count("GET", "stock-log"), 0);
        assert_eq!(backend.count("POST", "vehicle-sales"), 0);
    }

    #[tokio::test]
    async fn test_vehicle_sales_without_products_returns_false() {
        let backend = MockBackend::seeded().with_products(0);
        let mut tester = tester_for(&backend).await;

        assert!(!dispatch::vehicle_sales(&mut tester).await);
        assert_eq!(tester.tests_run(), 1);
        assert_eq!(backend.count("POST", "dispatch-log"), 0);
    }

    #[tokio::test]
    async fn test_init_db_runs_before_resources() {
        let backend = MockBackend::seeded();
        let mut tester = tester_for(&backend).await;
        let config = HarnessConfig {
            init_db: true,
            ..Default::default()
        };

        let summary = scenarios::run_all(&mut tester, &scenarios::plan(&config)).await;

        assert_eq!(summary.scenarios[0], (Scenario::InitDb, true));
        assert_eq!(summary.tests_run, 15);
        assert_eq!(backend.requests()[0].endpoint, "init-db");
        assert_eq!(summary.exit_code(), 0);
    }
}
