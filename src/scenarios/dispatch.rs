//! Dispatch log entries and vehicle sales

use crate::harness::{ApiTester, TestRequest};
use crate::models::{
    DispatchLogEntry, DispatchProduct, DispatchRequest, Product, StockLogEntry,
    VehicleSaleRequest,
};

const DISPATCH_ROUTE: &str = "Uthukottai";
const DISPATCH_VEHICLE: &str = "2259";
const DISPATCH_QUANTITIES: [u32; 2] = [2, 3];

const SALES_ROUTE: &str = "Ponneri";
const SALES_VEHICLE: &str = "4080";
const SALES_DISPATCH_QUANTITY: u32 = 2;
const SALES_QUANTITY: u32 = 1;

pub async fn dispatch_log(tester: &mut ApiTester) -> bool {
    let date = tester.current_date().to_string();
    let listing = tester
        .run_test(TestRequest::get("Get Dispatch Log", "dispatch-log").query("date", &date))
        .await;
    if !listing.success {
        return false;
    }

    println!("Found {} dispatch entries", listing.len());
    for entry in listing.records::<DispatchLogEntry>() {
        log::debug!(
            "Dispatch {}: route={} vehicle={} lines={}",
            entry.id.map(|id| id.to_string()).unwrap_or_default(),
            entry.line.unwrap_or_default(),
            entry.vehicle.unwrap_or_default(),
            entry.products.len()
        );
    }

    let products_outcome = tester
        .run_test(TestRequest::get("Get Products for Dispatch", "products"))
        .await;
    if !products_outcome.success {
        return false;
    }
    if products_outcome.is_empty() {
        return true;
    }

    let products: Vec<Product> = (0..DISPATCH_QUANTITIES.len())
        .map_while(|index| products_outcome.record_at(index))
        .collect();
    if products.is_empty() {
        println!("❌ First product has no id");
        return false;
    }

    let request = DispatchRequest {
        route_name: DISPATCH_ROUTE.to_string(),
        vehicle_number: DISPATCH_VEHICLE.to_string(),
        products: products
            .into_iter()
            .zip(DISPATCH_QUANTITIES)
            .map(|(product, quantity)| DispatchProduct {
                product_id: product.id,
                quantity,
            })
            .collect(),
        date,
    };
    tester
        .run_test(TestRequest::post("Create Dispatch Entry", "dispatch-log").json(&request))
        .await
        .success
}

pub async fn vehicle_sales(tester: &mut ApiTester) -> bool {
    let date = tester.current_date().to_string();

    let products_outcome = tester
        .run_test(TestRequest::get("Get Products for Vehicle Sales", "products"))
        .await;
    let Some(product) = products_outcome
        .success
        .then(|| products_outcome.record_at::<Product>(0))
        .flatten()
    else {
        return false;
    };

    let dispatch = DispatchRequest {
        route_name: SALES_ROUTE.to_string(),
        vehicle_number: SALES_VEHICLE.to_string(),
        products: vec![DispatchProduct {
            product_id: product.id,
            quantity: SALES_DISPATCH_QUANTITY,
        }],
        date: date.clone(),
    };
    let dispatched = tester
        .run_test(
            TestRequest::post("Create Dispatch for Vehicle Sales", "dispatch-log").json(&dispatch),
        )
        .await;
    if !dispatched.success {
        return false;
    }

    let stock_outcome = tester
        .run_test(
            TestRequest::get("Get Stock Log for Vehicle Sales", "stock-log").query("date", &date),
        )
        .await;
    let Some(stock_entry) = stock_outcome
        .success
        .then(|| stock_outcome.record_at::<StockLogEntry>(0))
        .flatten()
    else {
        return false;
    };

    // NOTE: stock_log_id is filled from the entry's product_id, not its id.
    // The backend keys vehicle_sales rows by stock log id, so this looks like
    // a naming slip in the payload; it is kept as-is until the intended key is
    // confirmed against the backend.
    let sale = VehicleSaleRequest {
        stock_log_id: stock_entry.product_id,
        vehicle_number: SALES_VEHICLE.to_string(),
        quantity: SALES_QUANTITY,
    };
    tester
        .run_test(TestRequest::post("Create Vehicle Sales Entry", "vehicle-sales").json(&sale))
        .await
        .success
}
