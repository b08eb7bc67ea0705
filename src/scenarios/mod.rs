//! Test scenarios
//!
//! A scenario is a finite sequence of flow-helper calls plus terminal
//! assertions, parametrized over the fixture dataset. Each registered
//! scenario declares the configuration profile it needs; the runner brings
//! the device to that profile before the body runs and deletes the
//! transaction batch afterwards.

mod sale_cashback;
mod sale_tip;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::access::Accessor;
use crate::common::config::Config;
use crate::common::Result;
use crate::fixtures::FixtureData;

/// Everything a scenario body may touch
pub struct ScenarioContext<'a> {
    pub accessor: &'a Accessor<'a>,
    pub fixture: &'a FixtureData,
    pub config: &'a Config,
}

impl ScenarioContext<'_> {
    /// Bounded wait for dialogs and result screens
    pub fn ui_wait(&self) -> Duration {
        Duration::from_secs(self.config.timeouts.ui_wait_secs)
    }
}

pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;
pub type ScenarioFn = for<'a> fn(&'a ScenarioContext<'a>) -> ScenarioFuture<'a>;

/// One collected scenario
pub struct Scenario {
    pub name: &'static str,
    /// Configuration profile the scenario requires on the device
    pub profile: &'static str,
    pub description: &'static str,
    /// Source module, exported in the manifest
    pub source: &'static str,
    pub run: ScenarioFn,
}

/// All scenarios, in collection order
pub fn all() -> Vec<Scenario> {
    let mut scenarios = sale_tip::scenarios();
    scenarios.extend(sale_cashback::scenarios());
    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_is_stable_and_named() {
        let scenarios = all();
        assert!(scenarios.len() >= 6);

        let names: Vec<_> = scenarios.iter().map(|s| s.name).collect();
        assert!(names.contains(&"sale_tip_multicurrency"));
        assert!(names.contains(&"sale_cashback_over_limit"));

        for s in &scenarios {
            assert!(!s.description.is_empty(), "{} has no description", s.name);
            assert!(s.profile.starts_with("APOS"), "{} profile", s.name);
        }
    }
}
