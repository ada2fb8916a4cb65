use crate::harness::{ApiTester, TestRequest};
use crate::models::InitDbResponse;

/// Seed the backend through `POST init-db`.
///
/// The endpoint answers 200 both when it seeds and when the data is already
/// there; the message tells the two apart.
pub async fn init_db(tester: &mut ApiTester) -> bool {
    let outcome = tester
        .run_test(TestRequest::post("Initialize Database", "init-db"))
        .await;
    if let Some(response) = outcome.decode::<InitDbResponse>() {
        if let Some(message) = response.message {
            println!("{}", message);
        }
        if let Some(count) = response.product_count {
            println!("Product count: {}", count);
        }
    }
    outcome.success
}
