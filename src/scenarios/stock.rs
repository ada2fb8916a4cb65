//! Stock log and price updates
//!
//! Both scenarios read the current listing and write the first entry back,
//! so a successful run leaves the backend's data unchanged apart from
//! timestamps and price history rows.

use crate::harness::{ApiTester, TestRequest};
use crate::models::{PriceEntry, PriceUpdate, StockField, StockLogEntry, StockLogUpdate};

const SALES_OFFICE_VALUE: i64 = 5;

pub async fn stock_log(tester: &mut ApiTester) -> bool {
    let date = tester.current_date().to_string();
    let listing = tester
        .run_test(TestRequest::get("Get Stock Log", "stock-log").query("date", &date))
        .await;
    if !listing.success {
        return false;
    }

    println!("Found {} stock entries", listing.len());
    if listing.is_empty() {
        return true;
    }

    let Some(first) = listing.record_at::<StockLogEntry>(0) else {
        println!("❌ First stock log entry has no product_id");
        return false;
    };

    let update = StockLogUpdate {
        product_id: first.product_id,
        date,
        field: StockField::SalesOffice,
        value: SALES_OFFICE_VALUE,
    };
    tester
        .run_test(TestRequest::post("Update Stock Log", "stock-log").json(&update))
        .await
        .success
}

pub async fn prices(tester: &mut ApiTester) -> bool {
    let listing = tester
        .run_test(TestRequest::get("Get Prices", "prices"))
        .await;
    if !listing.success {
        return false;
    }

    println!("Found {} price entries", listing.len());
    if listing.is_empty() {
        return true;
    }

    let Some(first) = listing.record_at::<PriceEntry>(0) else {
        println!("❌ First price entry has no productId");
        return false;
    };

    let update = PriceUpdate {
        product_id: first.product_id,
        base_rate: first.base_rate,
        conversion_factor: first.conversion_factor,
    };
    tester
        .run_test(TestRequest::post("Update Price", "prices").json(&update))
        .await
        .success
}
