use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::error::CountdownError;
use super::persistence::{load_snapshot, save_snapshot};
use super::share_link::ShareLinkParams;
use super::timer::{CountdownFields, CountdownPhase, CountdownTimer, PrimaryAction, TickOutcome};
use crate::models::countdown::{
    Background, CountdownConfig, CountdownSnapshot, Theme, DEFAULT_TARGET_ISO,
};
use crate::services::notification::CompletionEffect;
use crate::utils::date::{parse_iso_instant, parse_target_input};

/// A validated target waiting to be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProposal {
    pub target: DateTime<Utc>,
    /// The target is not strictly in the future; ask before committing.
    pub requires_confirmation: bool,
}

/// What the countdown area should show right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownView {
    Counting(CountdownFields),
    TimeUp(String),
}

/// Owns the countdown configuration and its state machine while the app runs.
pub struct CountdownService {
    config: CountdownConfig,
    timer: CountdownTimer,
    dirty: bool,
    background_revision: u64,
}

impl Default for CountdownService {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownService {
    /// Fresh service preset to the built-in default target.
    pub fn new() -> Self {
        Self::with_default_target(parse_iso_instant(DEFAULT_TARGET_ISO))
    }

    pub fn with_default_target(target: Option<DateTime<Utc>>) -> Self {
        Self::from_config(CountdownConfig::with_target(target))
    }

    pub fn from_config(config: CountdownConfig) -> Self {
        Self {
            config,
            timer: CountdownTimer::new(),
            dirty: false,
            background_revision: 0,
        }
    }

    /// `default_target` applies when the snapshot has no `targetIso` key.
    pub fn from_snapshot(
        snapshot: CountdownSnapshot,
        default_target: Option<DateTime<Utc>>,
    ) -> Self {
        Self::from_config(CountdownConfig::from_snapshot(snapshot, default_target))
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        self.config.to_snapshot()
    }

    /// Restore from disk, falling back to `default_target` when nothing was saved
    /// or the saved file never recorded a target.
    /// A corrupt file is reported as an error so the caller can decide to warn.
    pub fn load_from_disk(path: &Path, default_target: Option<DateTime<Utc>>) -> Result<Self> {
        match load_snapshot(path)? {
            Some(snapshot) => {
                log::info!("Restored countdown from {}", path.display());
                Ok(Self::from_snapshot(snapshot, default_target))
            }
            None => Ok(Self::with_default_target(default_target)),
        }
    }

    pub fn save_to_disk(&self, path: &Path) -> Result<()> {
        save_snapshot(path, &self.snapshot())
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    pub fn phase(&self) -> CountdownPhase {
        self.timer.phase()
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_ticking()
    }

    pub fn primary_action(&self) -> Option<PrimaryAction> {
        self.timer.primary_action()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Bumped whenever the background source changes.
    pub fn background_revision(&self) -> u64 {
        self.background_revision
    }

    /// Apply a share link on top of the restored configuration.
    /// Returns whether any recognized parameter was present.
    pub fn apply_share_link(&mut self, link: &str) -> bool {
        let params = ShareLinkParams::parse(link);
        let previous_background = self.config.background().clone();
        let changed = params.apply_to(&mut self.config);
        if changed {
            log::info!("Applied share link parameters: {:?}", params);
            if &previous_background != self.config.background() {
                self.background_revision += 1;
            }
            self.dirty = true;
        }
        changed
    }

    pub fn share_link(&self, base_url: &str) -> String {
        ShareLinkParams::from_config(&self.config).to_url(base_url)
    }

    pub fn set_event_name(&mut self, name: &str) {
        self.update_text(|config| &mut config.event_name, name);
    }

    pub fn set_partner_name(&mut self, name: &str) {
        self.update_text(|config| &mut config.partner_name, name);
    }

    pub fn set_done_message(&mut self, message: &str) {
        self.update_text(|config| &mut config.done_message, message);
    }

    fn update_text(&mut self, field: impl FnOnce(&mut CountdownConfig) -> &mut String, value: &str) {
        let slot = field(&mut self.config);
        let trimmed = value.trim();
        if slot.as_str() != trimmed {
            *slot = trimmed.to_string();
            self.dirty = true;
        }
    }

    pub fn set_background_url(&mut self, url: &str) {
        self.update_background(|config| config.set_background_url(url));
    }

    pub fn set_embedded_background(&mut self, data_url: String) {
        self.update_background(|config| config.set_embedded_background(data_url));
    }

    pub fn clear_background(&mut self) {
        self.update_background(CountdownConfig::clear_background);
    }

    fn update_background(&mut self, apply: impl FnOnce(&mut CountdownConfig)) {
        let previous: Background = self.config.background().clone();
        apply(&mut self.config);
        if &previous != self.config.background() {
            self.background_revision += 1;
            self.dirty = true;
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.config.theme != theme {
            self.config.theme = theme;
            self.dirty = true;
        }
    }

    /// Validate the date/time input. Nothing changes until [`Self::commit_target`].
    pub fn prepare_target(
        &self,
        input: &str,
        now: DateTime<Utc>,
    ) -> Result<TargetProposal, CountdownError> {
        let target = parse_target_input(input)?;
        Ok(Self::proposal_for(target, now))
    }

    pub fn proposal_for(target: DateTime<Utc>, now: DateTime<Utc>) -> TargetProposal {
        TargetProposal {
            target,
            requires_confirmation: target <= now,
        }
    }

    /// Store the proposed target and (re)start the countdown.
    pub fn commit_target(&mut self, proposal: TargetProposal) {
        self.config.set_target(Some(proposal.target));
        self.timer.start(self.config.target());
        self.dirty = true;
        log::info!("Countdown target set to {}", proposal.target);
    }

    /// Start ticking toward whatever target is configured.
    ///
    /// Used at startup: a target already in the past elapses on the next tick.
    pub fn start(&mut self) {
        self.timer.start(self.config.target());
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        self.timer.pause(self.config.target(), now)
    }

    /// Resume and persist the shifted target.
    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        match self.timer.resume(now) {
            Some(new_target) => {
                self.config.set_target(Some(new_target));
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Run whatever the Pause/Resume control currently offers.
    pub fn toggle(&mut self, now: DateTime<Utc>) -> Option<PrimaryAction> {
        let action = self.timer.primary_action()?;
        let applied = match action {
            PrimaryAction::Pause => self.pause(now),
            PrimaryAction::Resume => self.resume(now),
        };
        applied.then_some(action)
    }

    /// Clear the target from any state.
    pub fn reset(&mut self) {
        self.timer.reset();
        self.config.set_target(None);
        self.dirty = true;
        log::info!("Countdown reset");
    }

    /// Advance the countdown, firing `effect` when the target is reached.
    /// A failing effect is logged and otherwise ignored.
    pub fn tick(&mut self, now: DateTime<Utc>, effect: &dyn CompletionEffect) -> TickOutcome {
        let outcome = self.timer.tick(self.config.target(), now);
        if outcome == TickOutcome::Elapsed {
            if let Err(err) = effect.fire(&self.config.title(), &self.config.done_text()) {
                log::warn!("Completion effect unavailable: {err:#}");
            }
        }
        outcome
    }

    pub fn view(&self, now: DateTime<Utc>) -> CountdownView {
        match self.timer.phase() {
            CountdownPhase::Elapsed => CountdownView::TimeUp(self.config.done_text()),
            _ => CountdownView::Counting(self.timer.fields(self.config.target(), now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notification::MockCompletionEffect;
    use chrono::{Duration, TimeZone};
    use tempfile::tempdir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    fn silent_effect() -> MockCompletionEffect {
        let mut effect = MockCompletionEffect::new();
        effect.expect_fire().returning(|_, _| Ok(()));
        effect
    }

    fn running_service(remaining: Duration) -> CountdownService {
        let mut service = CountdownService::with_default_target(None);
        service.commit_target(CountdownService::proposal_for(now() + remaining, now()));
        service
    }

    #[test]
    fn test_new_uses_default_target() {
        let service = CountdownService::new();
        assert_eq!(
            service.config().target(),
            Some(Utc.with_ymd_and_hms(2025, 10, 8, 0, 0, 0).unwrap())
        );
        assert_eq!(service.phase(), CountdownPhase::Unset);
        assert!(!service.is_dirty());
    }

    #[test]
    fn test_past_target_requires_confirmation() {
        let past = CountdownService::proposal_for(now() - Duration::seconds(5), now());
        assert!(past.requires_confirmation);
        let exactly_now = CountdownService::proposal_for(now(), now());
        assert!(exactly_now.requires_confirmation);
        let future = CountdownService::proposal_for(now() + Duration::seconds(5), now());
        assert!(!future.requires_confirmation);
    }

    #[test]
    fn test_prepare_past_target_changes_nothing() {
        let service = CountdownService::with_default_target(None);
        let proposal = service.prepare_target("2026-10-18T08:59:55Z", now()).unwrap();
        assert!(proposal.requires_confirmation);
        assert_eq!(service.phase(), CountdownPhase::Unset);
        assert_eq!(service.config().target(), None);
        assert!(!service.is_dirty());
    }

    #[test]
    fn test_invalid_input_leaves_state_unchanged() {
        let mut service = running_service(Duration::hours(1));
        service.mark_clean();
        let before = service.config().clone();

        assert_eq!(
            service.prepare_target("", now()),
            Err(CountdownError::EmptyTarget)
        );
        assert!(service.prepare_target("someday", now()).is_err());
        assert_eq!(service.config(), &before);
        assert_eq!(service.phase(), CountdownPhase::Running);
        assert!(!service.is_dirty());
    }

    #[test]
    fn test_commit_starts_running_and_marks_dirty() {
        let service = running_service(Duration::hours(2));
        assert_eq!(service.phase(), CountdownPhase::Running);
        assert!(service.is_dirty());
        assert_eq!(service.primary_action(), Some(PrimaryAction::Pause));
    }

    #[test]
    fn test_toggle_pauses_then_resumes_with_shifted_target() {
        let mut service = running_service(Duration::minutes(30));
        let original = service.config().target().unwrap();

        assert_eq!(service.toggle(now()), Some(PrimaryAction::Pause));
        assert!(!service.is_ticking());

        let later = now() + Duration::minutes(5);
        assert_eq!(service.toggle(later), Some(PrimaryAction::Resume));
        assert_eq!(service.config().target(), Some(original + Duration::minutes(5)));
        assert!(service.is_ticking());
    }

    #[test]
    fn test_toggle_disabled_when_unset_or_elapsed() {
        let mut service = CountdownService::with_default_target(None);
        assert_eq!(service.toggle(now()), None);

        let mut service = running_service(Duration::seconds(1));
        service.tick(now() + Duration::seconds(2), &silent_effect());
        assert_eq!(service.phase(), CountdownPhase::Elapsed);
        assert_eq!(service.toggle(now()), None);
    }

    #[test]
    fn test_elapsed_tick_fires_effect_exactly_once() {
        let mut service = running_service(Duration::seconds(1));
        service.config.event_name = "Flight".to_string();
        service.config.partner_name = "Kim".to_string();

        let mut effect = MockCompletionEffect::new();
        effect
            .expect_fire()
            .withf(|title, message| {
                title.to_string() == "Flight — Kim" && message.to_string() == "Time's up! — Kim"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let after = now() + Duration::seconds(1);
        assert_eq!(service.tick(after, &effect), TickOutcome::Elapsed);
        for i in 1..5 {
            assert_eq!(
                service.tick(after + Duration::milliseconds(250 * i), &effect),
                TickOutcome::Idle
            );
        }
        assert_eq!(
            service.view(after),
            CountdownView::TimeUp("Time's up! — Kim".to_string())
        );
    }

    #[test]
    fn test_failing_effect_does_not_block_transition() {
        let mut service = running_service(Duration::seconds(1));
        let mut effect = MockCompletionEffect::new();
        effect
            .expect_fire()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("no audio device")));

        assert_eq!(
            service.tick(now() + Duration::seconds(5), &effect),
            TickOutcome::Elapsed
        );
        assert_eq!(service.phase(), CountdownPhase::Elapsed);
    }

    #[test]
    fn test_startup_with_past_target_elapses_on_first_tick() {
        let mut service = CountdownService::with_default_target(Some(now() - Duration::days(3)));
        service.start();
        let mut effect = MockCompletionEffect::new();
        effect.expect_fire().times(1).returning(|_, _| Ok(()));

        assert_eq!(service.tick(now(), &effect), TickOutcome::Elapsed);
    }

    #[test]
    fn test_start_without_target_stays_unset() {
        let mut service = CountdownService::with_default_target(None);
        service.start();
        assert_eq!(service.phase(), CountdownPhase::Unset);
        assert_eq!(service.tick(now(), &silent_effect()), TickOutcome::Idle);
    }

    #[test]
    fn test_reset_clears_target_and_pause() {
        let mut service = running_service(Duration::minutes(10));
        service.pause(now());
        service.mark_clean();

        service.reset();
        assert_eq!(service.phase(), CountdownPhase::Unset);
        assert_eq!(service.config().target(), None);
        assert!(service.is_dirty());
        assert_eq!(service.resume(now()), false);
        assert_eq!(service.view(now()), CountdownView::Counting(CountdownFields::ZERO));
    }

    #[test]
    fn test_paused_view_is_frozen() {
        let mut service = running_service(Duration::milliseconds(90_061_000));
        service.pause(now());
        let frozen = service.view(now() + Duration::hours(5));
        assert_eq!(
            frozen,
            CountdownView::Counting(CountdownFields {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            })
        );
    }

    #[test]
    fn test_text_edits_are_trimmed_and_only_dirty_on_change() {
        let mut service = CountdownService::with_default_target(None);
        service.set_event_name("  Beach week ");
        assert_eq!(service.config().event_name, "Beach week");
        assert!(service.is_dirty());

        service.mark_clean();
        service.set_event_name("Beach week");
        assert!(!service.is_dirty());
    }

    #[test]
    fn test_background_changes_bump_revision() {
        let mut service = CountdownService::with_default_target(None);
        let start = service.background_revision();

        service.set_background_url("https://example.com/a.jpg");
        service.set_embedded_background("data:image/png;base64,AAAA".to_string());
        assert_eq!(service.background_revision(), start + 2);
        assert!(service.config().background().external_url().is_none());

        service.set_background_url("");
        assert_eq!(service.background_revision(), start + 2);
        service.clear_background();
        assert_eq!(service.background_revision(), start + 3);
    }

    #[test]
    fn test_share_link_overrides_and_marks_dirty() {
        let mut service = CountdownService::with_default_target(None);
        service.set_event_name("Old");
        service.mark_clean();

        assert!(service.apply_share_link("https://example.com/?e=New&theme=party&unknown=1"));
        assert_eq!(service.config().event_name, "New");
        assert_eq!(service.config().theme, Theme::Party);
        assert!(service.is_dirty());

        service.mark_clean();
        assert!(!service.apply_share_link("https://example.com/?unknown=1"));
        assert!(!service.is_dirty());
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("countdown.json");
        let mut service = running_service(Duration::days(10));
        service.set_partner_name("Robin");
        service.set_theme(Theme::Beach);
        service.save_to_disk(&path).unwrap();

        let loaded = CountdownService::load_from_disk(&path, None).unwrap();
        assert_eq!(loaded.config(), service.config());
        assert_eq!(loaded.phase(), CountdownPhase::Unset);
    }

    #[test]
    fn test_load_file_without_target_key_keeps_default_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("countdown.json");
        std::fs::write(&path, r#"{"eventName":"Party"}"#).unwrap();

        let loaded = CountdownService::load_from_disk(&path, Some(now())).unwrap();
        assert_eq!(loaded.config().event_name, "Party");
        assert_eq!(loaded.config().target(), Some(now()));
    }

    #[test]
    fn test_load_file_with_null_target_stays_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("countdown.json");
        std::fs::write(&path, r#"{"targetIso":null,"eventName":"Party"}"#).unwrap();

        let loaded = CountdownService::load_from_disk(&path, Some(now())).unwrap();
        assert_eq!(loaded.config().target(), None);
    }

    #[test]
    fn test_load_without_file_uses_default_target() {
        let dir = tempdir().unwrap();
        let default = Some(now());
        let loaded =
            CountdownService::load_from_disk(&dir.path().join("missing.json"), default).unwrap();
        assert_eq!(loaded.config().target(), default);
    }
}
