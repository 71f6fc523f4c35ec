use std::time::Instant;

use chrono::Utc;

use super::clipboard::{copy_share_link, ShareOutcome};
use super::confirm::ConfirmAction;
use super::form::FormCommand;
use super::CountdownApp;
use crate::services::countdown::PrimaryAction;
use crate::utils::date::to_input_value;

impl CountdownApp {
    pub(super) fn apply_form_commands(&mut self, commands: Vec<FormCommand>) {
        for command in commands {
            match command {
                FormCommand::SetEventName(name) => self.countdown_service.set_event_name(&name),
                FormCommand::SetPartnerName(name) => {
                    self.countdown_service.set_partner_name(&name)
                }
                FormCommand::SetDoneMessage(message) => {
                    self.countdown_service.set_done_message(&message)
                }
                FormCommand::SetBackgroundUrl(url) => self.countdown_service.set_background_url(&url),
                FormCommand::SetTheme(theme) => self.countdown_service.set_theme(theme),
                FormCommand::UploadBackground => self.start_background_upload(),
                FormCommand::ClearBackground => {
                    self.countdown_service.clear_background();
                    self.form.background_url.clear();
                }
                FormCommand::SetTarget => self.submit_target(),
                FormCommand::TogglePause => {
                    match self.countdown_service.toggle(Utc::now()) {
                        Some(PrimaryAction::Pause) => log::info!("Countdown paused"),
                        Some(PrimaryAction::Resume) => {
                            log::info!("Countdown resumed");
                            // The target moved by the paused time
                            if let Some(target) = self.countdown_service.config().target() {
                                self.form.target_input = to_input_value(target);
                            }
                        }
                        None => {}
                    }
                }
                FormCommand::RequestReset => {
                    self.confirm_dialog.request(ConfirmAction::ResetCountdown)
                }
                FormCommand::CopyShareLink => self.copy_share_link(),
            }
        }
    }

    fn submit_target(&mut self) {
        match self
            .countdown_service
            .prepare_target(&self.form.target_input, Utc::now())
        {
            Ok(proposal) if proposal.requires_confirmation => {
                self.confirm_dialog
                    .request(ConfirmAction::StartPastTarget { proposal });
            }
            Ok(proposal) => self.countdown_service.commit_target(proposal),
            Err(err) => {
                log::debug!("Rejected target input {:?}: {err}", self.form.target_input);
                self.toast_manager.error(err.to_string());
            }
        }
    }

    pub(super) fn execute_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::ResetCountdown => {
                self.countdown_service.reset();
                self.form.target_input.clear();
                self.toast_manager.info("Countdown reset");
            }
            ConfirmAction::StartPastTarget { proposal } => {
                self.countdown_service.commit_target(proposal);
            }
        }
    }

    fn copy_share_link(&mut self) {
        let link = self
            .countdown_service
            .share_link(&self.config.share_base_url);
        match copy_share_link(&mut self.clipboard, &link) {
            ShareOutcome::Copied => {
                self.link_copied_at = Some(Instant::now());
                self.share_fallback = None;
            }
            ShareOutcome::ManualCopy(link) => self.share_fallback = Some(link),
        }
    }
}
