//! Reference-data listings: products, routes and vehicles
//!
//! The backend is seeded with a fixed catalog, so each listing is checked
//! against a literal count. A count mismatch is printed but does not fail the
//! scenario; only the status code does.

use crate::harness::{ApiTester, TestRequest};

pub const EXPECTED_PRODUCTS: usize = 20;
pub const EXPECTED_ROUTES: usize = 7;
pub const EXPECTED_VEHICLES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Products,
    Routes,
    Vehicles,
}

impl Listing {
    fn test_name(&self) -> &'static str {
        match self {
            Listing::Products => "Get Products",
            Listing::Routes => "Get Routes",
            Listing::Vehicles => "Get Vehicles",
        }
    }

    /// Endpoint path, also used as the plural noun in output
    pub fn endpoint(&self) -> &'static str {
        match self {
            Listing::Products => "products",
            Listing::Routes => "routes",
            Listing::Vehicles => "vehicles",
        }
    }

    pub fn expected_count(&self) -> usize {
        match self {
            Listing::Products => EXPECTED_PRODUCTS,
            Listing::Routes => EXPECTED_ROUTES,
            Listing::Vehicles => EXPECTED_VEHICLES,
        }
    }
}

/// What a listing check observed. `found` is `None` when the request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingReport {
    pub success: bool,
    pub found: Option<usize>,
    pub expected: usize,
}

impl ListingReport {
    pub fn count_matches(&self) -> bool {
        self.found == Some(self.expected)
    }
}

pub async fn products(tester: &mut ApiTester) -> bool {
    check_listing(tester, Listing::Products).await.success
}

pub async fn routes(tester: &mut ApiTester) -> bool {
    check_listing(tester, Listing::Routes).await.success
}

pub async fn vehicles(tester: &mut ApiTester) -> bool {
    check_listing(tester, Listing::Vehicles).await.success
}

/// Fetch a listing and compare its size with the seeded catalog.
pub async fn check_listing(tester: &mut ApiTester, listing: Listing) -> ListingReport {
    let outcome = tester
        .run_test(TestRequest::get(listing.test_name(), listing.endpoint()))
        .await;
    let report = ListingReport {
        success: outcome.success,
        found: outcome.success.then(|| outcome.len()),
        expected: listing.expected_count(),
    };

    if let Some(found) = report.found {
        let noun = listing.endpoint();
        println!("Found {} {}", found, noun);
        if report.count_matches() {
            println!("✅ Correct number of {} ({})", noun, report.expected);
        } else {
            println!("❌ Expected {} {}, got {}", report.expected, noun, found);
        }
    }
    report
}
