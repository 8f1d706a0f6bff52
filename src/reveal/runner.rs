//! Drives count-up ticks on a real timer.

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::controller::ViewportRevealController;
use super::document::Document;

/// Tick `controller` every `tick_ms` until no count-up is running.
///
/// Returns the number of ticks taken. Returns immediately when idle.
pub async fn drive(controller: &mut ViewportRevealController, root: &mut Document) -> u64 {
    let period = Duration::from_millis(controller.config().tick_ms.max(1));
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = 0;
    while !controller.is_idle() {
        timer.tick().await;
        controller.tick(root);
        ticks += 1;
    }

    debug!(ticks, "Count-ups finished");
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::controller::ControllerConfig;
    use crate::reveal::document::Element;
    use crate::reveal::geometry::{Rect, Viewport};

    #[tokio::test(start_paused = true)]
    async fn drive_runs_until_every_stat_lands() {
        let mut doc = Document::new();
        let small = doc.insert(Element::new(Rect::new(0.0, 0.0, 100.0, 40.0)).stat("50"));
        let large = doc.insert(Element::new(Rect::new(200.0, 0.0, 100.0, 40.0)).stat("15000"));
        let mut ctl =
            ViewportRevealController::initialize_document(&doc, ControllerConfig::default());
        ctl.scroll_to(&mut doc, &Viewport::new(1200.0, 800.0));

        let started = tokio::time::Instant::now();
        let ticks = drive(&mut ctl, &mut doc).await;

        assert!(ticks <= 125);
        assert!(started.elapsed() <= Duration::from_millis(2000));
        assert_eq!(doc.get(small).unwrap().text, "50");
        assert_eq!(doc.get(large).unwrap().text, "15,000");
    }

    #[tokio::test]
    async fn drive_is_noop_when_idle() {
        let mut doc = Document::new();
        let mut ctl =
            ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

        assert_eq!(drive(&mut ctl, &mut doc).await, 0);
    }
}
