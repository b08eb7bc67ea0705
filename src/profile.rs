//! Device profile initialization
//!
//! Configuration is read by the application only at startup, so switching
//! profiles always means a full restart. Two paths, selected once per
//! scenario by comparing the on-device profile id with the requested one:
//!
//! - same profile: terminate and relaunch the app (clears stuck UI state),
//!   wait for the idle root control; no config rewrite, no
//!   re-initialization;
//! - different profile: rewrite the device init config, restart, wait for
//!   the idle root, start initialization from the settings surface, wait
//!   for the success marker and dismiss it.
//!
//! A missed wait deadline is fatal to the scenario's setup; there is no
//! retry at this layer.

use std::time::Duration;

use crate::access::Accessor;
use crate::common::config::Config;
use crate::common::Result;
use crate::device::{self, DeviceShell};
use crate::driver::Locator;
use crate::flows::{elements, settings, PROFILE_DOWNLOADED};

/// Ensures the requested configuration profile is active before a
/// scenario body runs
pub struct ProfileInitializer<'a> {
    accessor: &'a Accessor<'a>,
    shell: &'a dyn DeviceShell,
    config: &'a Config,
}

impl<'a> ProfileInitializer<'a> {
    pub fn new(accessor: &'a Accessor<'a>, shell: &'a dyn DeviceShell, config: &'a Config) -> Self {
        Self {
            accessor,
            shell,
            config,
        }
    }

    fn ui_wait(&self) -> Duration {
        Duration::from_secs(self.config.timeouts.ui_wait_secs)
    }

    /// Make `profile_id` the active profile, restarting and
    /// re-initializing the application as needed
    pub async fn ensure_profile(&self, profile_id: &str) -> Result<()> {
        let current =
            device::read_profile_id(self.shell, &self.config.device.init_config_path).await?;

        if current == profile_id {
            tracing::info!(profile = profile_id, "profile already active, restarting app");
            self.restart_app().await?;
            return Ok(());
        }

        tracing::info!(
            from = %current,
            to = profile_id,
            "switching profile, rewriting init config"
        );
        device::write_profile_id(self.shell, &self.config.device.init_config_path, profile_id)
            .await?;

        self.restart_app().await?;

        settings::start_init_from_idle(self.accessor).await?;

        // The success announcement ends with a fixed phrase; anything else
        // within the deadline (or nothing at all) fails the setup
        self.accessor
            .wait_present(&Locator::text_ends_with(PROFILE_DOWNLOADED), self.ui_wait())
            .await?;
        self.accessor
            .wait_present(&elements::cancel_button(), self.ui_wait())
            .await?;
        self.accessor.click(&elements::cancel_button()).await?;

        Ok(())
    }

    /// Terminate and relaunch the application, then wait for the idle
    /// root control to de-flake the restart race
    async fn restart_app(&self) -> Result<()> {
        let package = &self.config.app.package;
        self.accessor.driver().terminate_app(package).await?;
        self.accessor.driver().activate_app(package).await?;
        self.accessor
            .wait_present(&elements::side_menu_button(), self.ui_wait())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::MockShell;
    use crate::driver::mock::MockDriver;

    fn config() -> Config {
        let mut cfg = Config::default();
        cfg.timeouts.ui_wait_secs = 1;
        cfg
    }

    fn shell_with_profile(profile: &str) -> MockShell {
        let shell = MockShell::new();
        shell.respond(
            "exec-out cat /sdcard/apos/init_config.json",
            &format!(r#"{{"profileId":"{}"}}"#, profile),
        );
        shell
    }

    #[tokio::test]
    async fn matching_profile_only_restarts_the_app() {
        let driver = MockDriver::new();
        driver.present(&elements::side_menu_button());

        let shell = shell_with_profile("APOS0015");
        let cfg = config();
        let accessor = Accessor::new(&driver).with_poll_interval(Duration::from_millis(5));

        ProfileInitializer::new(&accessor, &shell, &cfg)
            .ensure_profile("APOS0015")
            .await
            .unwrap();

        // Restarted, but never rewrote the config or touched the settings surface
        assert_eq!(
            driver.app_events(),
            vec![
                "terminate:com.payten.apos".to_string(),
                "activate:com.payten.apos".to_string()
            ]
        );
        assert!(shell.calls().iter().all(|c| !c.starts_with("push ")));
        assert!(driver.click_log().is_empty());
    }

    #[tokio::test]
    async fn different_profile_rewrites_and_initializes() {
        let driver = MockDriver::new();
        for locator in [
            elements::side_menu_button(),
            elements::settings_menu_item(),
            elements::initialization_item(),
            elements::cancel_button(),
        ] {
            driver.present(&locator);
        }
        driver.set_text(
            &Locator::text_ends_with(PROFILE_DOWNLOADED),
            "Profil úspěšně stažen",
        );

        let shell = shell_with_profile("APOS0001");
        let cfg = config();
        let accessor = Accessor::new(&driver).with_poll_interval(Duration::from_millis(5));

        ProfileInitializer::new(&accessor, &shell, &cfg)
            .ensure_profile("APOS0015")
            .await
            .unwrap();

        assert!(shell.calls().iter().any(|c| c.starts_with("push ")));

        let log = driver.click_log();
        assert_eq!(log[0], elements::side_menu_button().to_string());
        assert_eq!(log[1], elements::settings_menu_item().to_string());
        assert_eq!(log[2], elements::initialization_item().to_string());
        assert_eq!(log[3], elements::cancel_button().to_string());
    }

    #[tokio::test]
    async fn missing_idle_root_is_fatal() {
        let driver = MockDriver::new();
        // side menu never appears after restart

        let shell = shell_with_profile("APOS0015");
        let cfg = config();
        let accessor = Accessor::new(&driver).with_poll_interval(Duration::from_millis(5));

        let err = ProfileInitializer::new(&accessor, &shell, &cfg)
            .ensure_profile("APOS0015")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::common::Error::WaitTimeout { .. }));
    }
}
