//! Scenario catalogue and the fixed run order
//!
//! A scenario is a short, linear sequence of harness calls covering one
//! resource area. Each returns `true` only if every request it reached passed;
//! it stops early when a prerequisite call fails or returns nothing usable.

use crate::config::HarnessConfig;
use crate::harness::ApiTester;

pub mod catalog;
pub mod dispatch;
pub mod setup;
pub mod stock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    InitDb,
    Products,
    Routes,
    Vehicles,
    StockLog,
    Prices,
    DispatchLog,
    VehicleSales,
}

impl Scenario {
    /// Resource scenarios in the order they always run
    pub const RESOURCE_ORDER: [Scenario; 7] = [
        Scenario::Products,
        Scenario::Routes,
        Scenario::Vehicles,
        Scenario::StockLog,
        Scenario::Prices,
        Scenario::DispatchLog,
        Scenario::VehicleSales,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::InitDb => "init-db",
            Scenario::Products => "products",
            Scenario::Routes => "routes",
            Scenario::Vehicles => "vehicles",
            Scenario::StockLog => "stock-log",
            Scenario::Prices => "prices",
            Scenario::DispatchLog => "dispatch-log",
            Scenario::VehicleSales => "vehicle-sales",
        }
    }

    pub async fn run(self, tester: &mut ApiTester) -> bool {
        match self {
            Scenario::InitDb => setup::init_db(tester).await,
            Scenario::Products => catalog::products(tester).await,
            Scenario::Routes => catalog::routes(tester).await,
            Scenario::Vehicles => catalog::vehicles(tester).await,
            Scenario::StockLog => stock::stock_log(tester).await,
            Scenario::Prices => stock::prices(tester).await,
            Scenario::DispatchLog => dispatch::dispatch_log(tester).await,
            Scenario::VehicleSales => dispatch::vehicle_sales(tester).await,
        }
    }
}

/// Scenarios to run for a configuration, in order
pub fn plan(config: &HarnessConfig) -> Vec<Scenario> {
    let mut scenarios = Vec::with_capacity(Scenario::RESOURCE_ORDER.len() + 1);
    if config.init_db {
        scenarios.push(Scenario::InitDb);
    }
    scenarios.extend(Scenario::RESOURCE_ORDER);
    scenarios
}

/// Tallies for a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub tests_run: usize,
    pub tests_passed: usize,
    pub scenarios: Vec<(Scenario, bool)>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.tests_passed == self.tests_run
    }

    /// 0 when every test passed, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

/// Run each scenario once, in the given order.
pub async fn run_all(tester: &mut ApiTester, scenarios: &[Scenario]) -> RunSummary {
    let mut outcomes = Vec::with_capacity(scenarios.len());
    for &scenario in scenarios {
        let passed = scenario.run(tester).await;
        log::info!(
            "Scenario {} {}",
            scenario.name(),
            if passed { "passed" } else { "failed" }
        );
        outcomes.push((scenario, passed));
    }

    RunSummary {
        tests_run: tester.tests_run(),
        tests_passed: tester.tests_passed(),
        scenarios: outcomes,
    }
}
