//! Gripper command driver for the Desk control application
//!
//! Fixed operation scripts over a live UI session: select a task, run it,
//! or walk its configuration dialog. Every public operation reports a plain
//! boolean; sub-step failures are logged where they occur and short-circuit
//! the enclosing composite. UI-structure drift is absorbed by the locator
//! fallback lists in [`locators`], timing drift by the bounded waits here.

pub mod locators;

use std::slice;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::locator::{resolve_any, Locator, WaitFor};
use crate::params::{self, CloseParams};
use crate::session::{click_robust, UiSession};

const CONTAINER_TIMEOUT: Duration = Duration::from_secs(5);
const CONFIRM_TIMEOUT: Duration = Duration::from_secs(10);
const CONTINUE_TIMEOUT: Duration = Duration::from_secs(10);
const FIELD_TIMEOUT: Duration = Duration::from_secs(15);
const READY_TIMEOUT: Duration = Duration::from_secs(30);

/// Default budget for the completion poll
pub const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);
/// Best-effort wait for an in-flight task before starting a new operation
const PRE_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Interval of the completion poll
const POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Budget for the execution-button probe inside one poll iteration
const BUTTON_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

const TASK_OPEN: &str = "Gripper_open";
const TASK_CLOSE: &str = "Gripper_close";

/// Drives the vendor UI through fixed gripper operation scripts.
///
/// The session is constructed externally and owned exclusively for the
/// duration of each composite operation; there is no locking and no
/// concurrent caller support.
pub struct GripperDriver {
    session: Arc<dyn UiSession>,
}

impl GripperDriver {
    pub fn new(session: Arc<dyn UiSession>) -> Self {
        Self { session }
    }

    // ---- sub-operations ----

    /// Select a task from the task list by its display name
    pub async fn select_task(&self, task_name: &str) -> bool {
        info!("Selecting task: {task_name}");

        let Some(container) = resolve_any(
            self.session.as_ref(),
            &locators::task_container(),
            WaitFor::Present,
            CONTAINER_TIMEOUT,
        )
        .await
        else {
            error!("Could not find task container");
            return false;
        };

        for locator in locators::task_entry(task_name) {
            match container.find(&locator).await {
                Ok(entry) => {
                    if click_robust(entry.as_ref()).await {
                        info!("Selected task: {task_name}");
                        return true;
                    }
                }
                Err(err) => {
                    debug!(%locator, "Task entry lookup failed: {err}");
                }
            }
        }

        error!("Could not find task: {task_name}");
        false
    }

    /// Click the execution (play) control in the sidebar
    pub async fn click_execution_button(&self) -> bool {
        info!("Clicking execution button");

        let Some(button) = resolve_any(
            self.session.as_ref(),
            &locators::execution_button(),
            WaitFor::Clickable,
            CONTAINER_TIMEOUT,
        )
        .await
        else {
            error!("Could not find execution button");
            return false;
        };

        if click_robust(button.as_ref()).await {
            info!("Execution button clicked");
            true
        } else {
            false
        }
    }

    /// Click CONFIRM in the execution dialog. Longer budget than the other
    /// lookups: the dialog has to render first.
    pub async fn click_confirm_button(&self) -> bool {
        info!("Clicking CONFIRM button");

        let Some(button) = resolve_any(
            self.session.as_ref(),
            &locators::confirm_button(),
            WaitFor::Clickable,
            CONFIRM_TIMEOUT,
        )
        .await
        else {
            error!("Could not find CONFIRM button");
            return false;
        };

        if click_robust(button.as_ref()).await {
            info!("Task execution confirmed");
            true
        } else {
            false
        }
    }

    /// Wait for the Ready status text to appear. Timeout is a `false`, not an
    /// escalated error, and every path reports explicitly.
    pub async fn wait_for_ready(&self) -> bool {
        info!("Waiting for Ready status");

        let resolved = resolve_any(
            self.session.as_ref(),
            slice::from_ref(&locators::ready_text()),
            WaitFor::Present,
            READY_TIMEOUT,
        )
        .await;

        if resolved.is_some() {
            info!("Robot is Ready");
            true
        } else {
            error!("Timed out waiting for Ready status");
            false
        }
    }

    /// Click the task icon in the timeline to open its configuration dialog
    pub async fn open_task_config(&self) -> bool {
        info!("Opening task configuration");

        let Some(icon) = resolve_any(
            self.session.as_ref(),
            &locators::task_icon(),
            WaitFor::Present,
            CONTAINER_TIMEOUT,
        )
        .await
        else {
            error!("Could not find task icon for configuration");
            return false;
        };

        if click_robust(icon.as_ref()).await {
            info!("Task icon clicked, configuration dialog should open");
            true
        } else {
            false
        }
    }

    /// Advance the configuration dialog via its Continue control.
    ///
    /// The control has no stable locator of its own; its visible text is the
    /// only reliable discriminator. Enumerate the buttons under the dialog
    /// footer and take the first displayed, enabled one whose text contains
    /// "continue" (case-insensitive). A per-button failure skips to the next
    /// candidate.
    pub async fn click_continue(&self) -> bool {
        info!("Looking for Continue button");

        let Some(container) = resolve_any(
            self.session.as_ref(),
            slice::from_ref(&locators::continue_container()),
            WaitFor::Present,
            CONTINUE_TIMEOUT,
        )
        .await
        else {
            error!("Could not find Continue button container");
            return false;
        };

        let buttons = match container.find_all(&locators::buttons()).await {
            Ok(buttons) => buttons,
            Err(err) => {
                error!("Could not enumerate buttons: {err}");
                return false;
            }
        };
        debug!("Found {} buttons in container", buttons.len());

        for (index, button) in buttons.iter().enumerate() {
            let text = match button.text().await {
                Ok(text) => text.trim().to_lowercase(),
                Err(err) => {
                    warn!("Error reading button {}: {err}", index + 1);
                    continue;
                }
            };

            if !text.contains("continue") {
                continue;
            }

            let displayed = button.is_displayed().await.unwrap_or(false);
            let enabled = button.is_enabled().await.unwrap_or(false);
            if !displayed || !enabled {
                warn!("Continue button not clickable (displayed: {displayed}, enabled: {enabled})");
                continue;
            }

            match button.click().await {
                Ok(()) => {
                    info!("Clicked Continue button");
                    return true;
                }
                Err(err) => {
                    warn!("Direct click on Continue failed: {err}");
                    match button.click_js().await {
                        Ok(()) => {
                            info!("Clicked Continue button via script");
                            return true;
                        }
                        Err(err) => {
                            error!("Script click on Continue failed: {err}");
                        }
                    }
                }
            }
        }

        error!("No Continue button found in container");
        false
    }

    /// Set the speed field. Range-checked before any UI interaction.
    pub async fn set_speed(&self, speed: u32) -> bool {
        if !params::validate_speed(speed) {
            return false;
        }
        info!("Setting speed to {speed}");
        self.set_field_value("speed", locators::speed_field(), speed)
            .await
    }

    /// Set the grasping-force field. The range is checked by the composite
    /// operation before the dialog is opened.
    pub async fn set_force(&self, force: u32) -> bool {
        info!("Setting grasping force to {force}");
        self.set_field_value("force", locators::force_field(), force)
            .await
    }

    /// Set the load field. Range checked by the composite operation.
    pub async fn set_load(&self, load: u32) -> bool {
        info!("Setting load to {load}");
        self.set_field_value("load", locators::load_field(), load)
            .await
    }

    /// Shared routine for the contenteditable slider readouts: focus with a
    /// click, select the current contents, type the decimal value, commit
    /// with Enter.
    async fn set_field_value(&self, field: &str, locator: Locator, value: u32) -> bool {
        let Some(element) = resolve_any(
            self.session.as_ref(),
            slice::from_ref(&locator),
            WaitFor::Present,
            FIELD_TIMEOUT,
        )
        .await
        else {
            error!("{field} field not found");
            return false;
        };

        if let Err(err) = element.click().await {
            error!("Could not focus {field} field: {err}");
            return false;
        }
        if let Err(err) = element.select_all().await {
            error!("Could not select {field} field contents: {err}");
            return false;
        }
        if let Err(err) = element.type_text(&value.to_string()).await {
            error!("Could not type {field} value: {err}");
            return false;
        }
        if let Err(err) = element.press_enter().await {
            error!("Could not commit {field} value: {err}");
            return false;
        }

        info!("{field} set to {value}");
        true
    }

    /// Poll until the current task has finished: Ready status text present
    /// and the execution control no longer in its stop state. Checked every
    /// 500ms up to `timeout`.
    pub async fn wait_for_completion(&self, timeout: Duration) -> bool {
        info!("Waiting for current task to complete");
        let start = Instant::now();

        loop {
            if self.task_finished().await {
                info!("Task completed, robot is ready for the next task");
                return true;
            }

            if start.elapsed() >= timeout {
                error!("Task did not complete within {}s", timeout.as_secs());
                return false;
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn task_finished(&self) -> bool {
        if self.session.find(&locators::ready_text()).await.is_err() {
            return false;
        }

        let Some(button) = resolve_any(
            self.session.as_ref(),
            &locators::execution_button(),
            WaitFor::Present,
            BUTTON_PROBE_TIMEOUT,
        )
        .await
        else {
            return false;
        };

        let classes = button.attr("class").await.ok().flatten().unwrap_or_default();
        let text = button
            .text()
            .await
            .map(|t| t.to_lowercase())
            .unwrap_or_default();

        !classes.contains("stop") && !text.contains("stop")
    }

    /// Best-effort wait for any in-flight task before a new operation. A
    /// timeout here is warned and ignored rather than stalling the caller;
    /// proceeding against possibly stale UI state is the accepted tradeoff.
    async fn settle_before_operation(&self) {
        if !self.wait_for_completion(PRE_WAIT_TIMEOUT).await {
            warn!("Previous task still running, proceeding anyway");
        }
    }

    // ---- composite operations ----

    /// Run the open task end to end
    pub async fn open_gripper(&self) -> bool {
        info!("Opening gripper");
        self.settle_before_operation().await;

        if !self.select_task(TASK_OPEN).await {
            return false;
        }
        if !self.click_execution_button().await {
            return false;
        }
        if !self.click_confirm_button().await {
            return false;
        }
        if !self.wait_for_completion(COMPLETION_TIMEOUT).await {
            return false;
        }

        info!("Gripper opened successfully");
        true
    }

    /// Run the close task end to end
    pub async fn close_gripper(&self) -> bool {
        info!("Closing gripper");
        self.settle_before_operation().await;

        if !self.select_task(TASK_CLOSE).await {
            return false;
        }
        if !self.click_execution_button().await {
            return false;
        }
        if !self.click_confirm_button().await {
            return false;
        }
        if !self.wait_for_completion(COMPLETION_TIMEOUT).await {
            return false;
        }

        info!("Gripper closed successfully");
        true
    }

    /// Configure the open task: one Continue past the width tab, set speed,
    /// one Continue to close the dialog
    pub async fn configure_open(&self, speed: u32) -> bool {
        info!("Configuring {TASK_OPEN} with speed={speed}");

        if !params::validate_speed(speed) {
            return false;
        }

        self.settle_before_operation().await;

        if !self.select_task(TASK_OPEN).await {
            return false;
        }
        if !self.open_task_config().await {
            return false;
        }
        if !self.click_continue().await {
            error!("Failed to advance past width tab");
            return false;
        }
        if !self.set_speed(speed).await {
            return false;
        }
        if !self.click_continue().await {
            error!("Failed to close configuration dialog");
            return false;
        }

        info!("{TASK_OPEN} configured (speed={speed})");
        true
    }

    /// Configure the close task: width tab is skipped, then speed, force and
    /// load are set, each followed by a Continue; the last one closes the
    /// dialog. All three ranges are validated before any UI interaction.
    pub async fn configure_close(&self, params: CloseParams) -> bool {
        info!(
            "Configuring {TASK_CLOSE} with speed={}, force={}, load={}",
            params.speed, params.force, params.load
        );

        if !params.validate() {
            return false;
        }

        self.settle_before_operation().await;

        if !self.select_task(TASK_CLOSE).await {
            return false;
        }
        if !self.open_task_config().await {
            return false;
        }

        debug!("Skipping gripper width tab");
        if !self.click_continue().await {
            error!("Failed to skip width tab");
            return false;
        }

        if !self.set_speed(params.speed).await {
            return false;
        }
        if !self.click_continue().await {
            error!("Failed to continue from speed tab");
            return false;
        }

        if !self.set_force(params.force).await {
            return false;
        }
        if !self.click_continue().await {
            error!("Failed to continue from force tab");
            return false;
        }

        if !self.set_load(params.load).await {
            return false;
        }
        if !self.click_continue().await {
            error!("Failed to close dialog from load tab");
            return false;
        }

        info!(
            "{TASK_CLOSE} configured (speed={}, force={}, load={})",
            params.speed, params.force, params.load
        );
        true
    }
}
