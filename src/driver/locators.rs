//! Locator tables for the Desk control application
//!
//! The UI is rendered from nested custom elements whose structure drifts
//! between firmware releases; each lookup therefore carries an ordered
//! fallback list, most specific first. Structural XPath entries were observed
//! on the deployed release, the looser entries cover known variants.

use crate::locator::Locator;

/// Task list container in the library pane
pub fn task_container() -> Vec<Locator> {
    vec![
        Locator::xpath("/html/body/div[2]/section/section/one-library/div/div[1]/div[2]"),
        Locator::css("one-library div[class*='div'][class*='div'] div[class*='div']"),
    ]
}

/// Entry for a named task inside the task container, exact match first
pub fn task_entry(task_name: &str) -> Vec<Locator> {
    vec![
        Locator::xpath(format!(".//span[text()='{task_name}']")),
        Locator::xpath(format!(".//*[contains(text(), '{task_name}')]")),
    ]
}

/// Execution (play/stop) control in the sidebar footer
pub fn execution_button() -> Vec<Locator> {
    vec![
        Locator::css(
            "body > div:nth-child(2) > section > one-sidebar > div.sidebar-body > div > \
             div.fixed-sections > footer > section > div > div",
        ),
        Locator::xpath("/html/body/div[2]/section/one-sidebar/div[1]/div/div[2]/footer/section/div/div"),
        Locator::css("one-sidebar footer section div div"),
    ]
}

/// CONFIRM control in the execution dialog
pub fn confirm_button() -> Vec<Locator> {
    vec![
        Locator::xpath("/html/body/div[3]/div[3]/div/div[2]/div[3]/div[2]/span/button"),
        Locator::xpath("//button[contains(., 'CONFIRM')]"),
    ]
}

/// Task icon in the timeline that opens the configuration dialog. The icon
/// markup has churned more than anything else in the UI, hence the long list.
pub fn task_icon() -> Vec<Locator> {
    vec![
        Locator::css(".drag-area"),
        Locator::xpath("//div[@class='drag-area']"),
        Locator::xpath("//one-timeline-skill//div[contains(@class, 'drag-area')]"),
        Locator::xpath("//svg/use[@xlink:href*='gripper']/../.."),
        Locator::xpath("//svg/use[contains(@xlink:href, 'logo.svg')]/../.."),
        Locator::xpath("//use[@xlink:href='bundles/gripper_grasp/logo.svg#icon']/../.."),
        Locator::xpath("//use[@xlink:href*='gripper']/../.."),
    ]
}

/// Status text shown when the robot is idle and ready
pub fn ready_text() -> Locator {
    Locator::xpath("//*[contains(text(), 'Ready')]")
}

/// Footer of the configuration dialog holding the Continue control. Only the
/// button's visible text discriminates it, so callers enumerate the buttons
/// under this container.
pub fn continue_container() -> Locator {
    Locator::xpath(
        "/html/body/div[2]/section/section/section/one-timeline/div[3]/div/one-container/div/\
         one-timeline-skill/div/one-context-menu/div/div[4]/div[1]",
    )
}

/// All buttons within a container
pub fn buttons() -> Locator {
    Locator::css("button")
}

/// Editable speed field in the configuration dialog (the trailing div is the
/// contenteditable child of the slider readout)
pub fn speed_field() -> Locator {
    Locator::xpath(
        "/html/body/div[2]/section/section/section/one-timeline/div[3]/div/one-container/div/\
         one-timeline-skill/div/one-context-menu/div/div[3]/div[4]/div/step/linear-slider/step/\
         div/div[4]/div[1]",
    )
}

/// Editable grasping-force field
pub fn force_field() -> Locator {
    Locator::xpath(
        "/html/body/div[2]/section/section/section/one-timeline/div[3]/div/one-container/div/\
         one-timeline-skill/div/one-context-menu/div/div[3]/div[7]/div/step/linear-slider/step/\
         div/div[4]",
    )
}

/// Editable load field
pub fn load_field() -> Locator {
    Locator::xpath(
        "/html/body/div[2]/section/section/section/one-timeline/div[3]/div/one-container/div/\
         one-timeline-skill/div/one-context-menu/div/div[3]/div[10]/div/step/linear-slider/step/\
         div/div[4]",
    )
}
