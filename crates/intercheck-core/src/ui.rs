// ── UI adapter boundary ──
//
// The engine reports outward only through this trait. Implementations
// decide how things look (colors, prefixes, labels); the engine decides
// what is shown.

use crate::model::{SettingValue, StatusSet, StatusTag, SummaryMetric, SummarySnapshot};

/// User-facing messages emitted by the engine.
pub mod messages {
    pub const ONLINE: &str = "InterCheck Online";
    pub const OFFLINE: &str = "Cannot connect to Intercheck";
    pub const FORCE_REJECTED: &str = "Intercheck could not force a SpeedTest";
    pub const SUMMARY_FAILED: &str = "ERROR: Could not get summary";
    pub const SETTINGS_UPDATED: &str = "Updated";
    pub const SETTINGS_FAILED: &str = "ERROR: Could not update options";
}

/// Rendering surface driven by the dashboard engine.
///
/// Calls may arrive from any task, but never concurrently for the same
/// piece of state.
pub trait UiAdapter: Send + Sync {
    /// Mark a status indicator active or inactive.
    fn set_indicator_active(&self, tag: StatusTag, active: bool);

    /// Overall connectivity line. Error messages should be rendered
    /// distinctly (e.g. with an `ERROR:` prefix).
    fn set_status_message(&self, text: &str, is_error: bool);

    /// Show or hide the "forcing" state of the force-test control.
    fn set_forcing_affordance(&self, forcing: bool);

    fn set_summary_metric(&self, interval: &str, metric: SummaryMetric, value: f64);

    /// Human-readable span covered by the summary (days of records).
    fn set_summary_interval_label(&self, label: &str);

    /// Wall-clock time of the last successful refresh (`HH:MM:SS`).
    fn set_summary_updated_timestamp(&self, text: &str);

    /// Replace the summary with an error message.
    fn show_summary_error(&self, text: &str);

    /// Settings message area; an empty string clears it.
    fn set_settings_message(&self, text: &str);

    fn set_field_value(&self, field: &str, value: &SettingValue);
}

/// Render a status set. Depends only on `status`, never on what was
/// shown before.
pub fn render_status(ui: &dyn UiAdapter, status: &StatusSet) {
    if status.is_online() {
        ui.set_status_message(messages::ONLINE, false);
    } else {
        ui.set_status_message(messages::OFFLINE, true);
    }
    for tag in StatusTag::INDICATORS {
        ui.set_indicator_active(tag, status.contains(tag));
    }
}

/// Render a full summary snapshot stamped with `updated_at`.
pub fn render_summary(ui: &dyn UiAdapter, snapshot: &SummarySnapshot, updated_at: &str) {
    use strum::IntoEnumIterator;

    for interval in snapshot.intervals() {
        for metric in SummaryMetric::iter() {
            if let Some(value) = snapshot.latest(interval, metric) {
                ui.set_summary_metric(interval, metric, value);
            }
        }
    }
    ui.set_summary_interval_label(snapshot.interval_label());
    ui.set_summary_updated_timestamp(updated_at);
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::recording::{RecordingUi, UiEvent};
    use super::*;

    #[test]
    fn indicators_follow_membership_independently() {
        let sets = [
            StatusSet::from_tags(["init"]),
            StatusSet::from_tags(["init", "testing", "connected"]),
            StatusSet::from_tags(["waiting", "disconnected"]),
            StatusSet::from_tags(["init", "waiting", "testing", "connected", "disconnected"]),
        ];
        for set in sets {
            let ui = RecordingUi::default();
            render_status(&ui, &set);
            for tag in StatusTag::INDICATORS {
                assert!(
                    ui.events()
                        .contains(&UiEvent::Indicator(tag, set.contains(tag))),
                    "{tag} wrong for {set:?}"
                );
            }
        }
    }

    #[test]
    fn online_iff_init_present() {
        let ui = RecordingUi::default();
        render_status(&ui, &StatusSet::from_tags(["waiting", "connected"]));
        assert_eq!(
            ui.events()[0],
            UiEvent::StatusMessage(messages::OFFLINE.into(), true)
        );

        let ui = RecordingUi::default();
        render_status(&ui, &StatusSet::from_tags(["init"]));
        assert_eq!(
            ui.events()[0],
            UiEvent::StatusMessage(messages::ONLINE.into(), false)
        );
    }

    #[test]
    fn empty_set_renders_offline_and_all_inactive() {
        let ui = RecordingUi::default();
        render_status(&ui, &StatusSet::empty());
        assert_eq!(
            ui.events(),
            vec![
                UiEvent::StatusMessage(messages::OFFLINE.into(), true),
                UiEvent::Indicator(StatusTag::Waiting, false),
                UiEvent::Indicator(StatusTag::Testing, false),
                UiEvent::Indicator(StatusTag::Connected, false),
                UiEvent::Indicator(StatusTag::Disconnected, false),
            ]
        );
    }

    #[test]
    fn render_is_independent_of_history() {
        let ui = RecordingUi::default();
        let set = StatusSet::from_tags(["init", "waiting"]);
        render_status(&ui, &set);
        let first = ui.take();
        render_status(&ui, &StatusSet::from_tags(["testing"]));
        ui.take();
        render_status(&ui, &set);
        assert_eq!(ui.take(), first);
    }
}
