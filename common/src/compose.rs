//! State of the "Create Message" screen.
//!
//! All changes go through [`ComposeState::apply`], which consumes the current
//! state and returns the next one. The UI layer only renders and dispatches.

use crate::error::ValidationError;
use crate::identity::Session;
use crate::message::NewMessage;
use crate::store::{StoreCode, StoreDirectory};
use crate::targeting::{Targeting, TargetingConfig, TargetingMode};

#[derive(Debug, Clone, PartialEq)]
pub enum ComposeAction {
    SetTitle(String),
    SetBody(String),
    SetManualInput(String),
    DirectoryLoaded(StoreDirectory),
    EnterManual,
    /// Apply the manual input box to the selection and clear the box.
    AddManualCodes,
    EnterList,
    ClosePicker,
    SetPickerQuery(String),
    Toggle(StoreCode),
    SendToAll,
    Remove(StoreCode),
    Reset,
    SubmitStarted,
    SubmitFailed,
    SubmitSucceeded,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeState {
    pub title: String,
    pub body: String,
    pub manual_input: String,
    pub picker_query: String,
    pub picker_open: bool,
    pub submitting: bool,
    directory: StoreDirectory,
    targeting: Targeting,
}

impl ComposeState {
    pub fn new(config: TargetingConfig) -> Self {
        Self {
            targeting: Targeting::new(config),
            ..Self::default()
        }
    }

    pub fn directory(&self) -> &StoreDirectory {
        &self.directory
    }

    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    pub fn mode(&self) -> TargetingMode {
        self.targeting.mode()
    }

    pub fn apply(mut self, action: ComposeAction) -> Self {
        match action {
            ComposeAction::SetTitle(title) => self.title = title,
            ComposeAction::SetBody(body) => self.body = body,
            ComposeAction::SetManualInput(raw) => self.manual_input = raw,
            ComposeAction::DirectoryLoaded(directory) => self.directory = directory,
            ComposeAction::EnterManual => {
                self.picker_open = false;
                self.targeting.enter_manual_mode();
            }
            ComposeAction::AddManualCodes => {
                let raw = std::mem::take(&mut self.manual_input);
                self.targeting.submit_manual_codes(&raw);
            }
            ComposeAction::EnterList => {
                self.targeting.enter_list_mode();
                self.picker_open = true;
            }
            ComposeAction::ClosePicker => self.picker_open = false,
            ComposeAction::SetPickerQuery(query) => self.picker_query = query,
            ComposeAction::Toggle(code) => {
                if let Err(e) = self.targeting.toggle_store(code) {
                    tracing::debug!("ignoring toggle: {e}");
                }
            }
            ComposeAction::SendToAll => {
                self.picker_open = false;
                self.targeting.send_to_all(&self.directory);
            }
            ComposeAction::Remove(code) => {
                self.targeting.remove_one(&code);
            }
            ComposeAction::Reset => {
                self.targeting.reset();
                self.picker_open = false;
                self.manual_input.clear();
            }
            ComposeAction::SubmitStarted => self.submitting = true,
            // Everything typed stays put so the operator can try again.
            ComposeAction::SubmitFailed => self.submitting = false,
            ComposeAction::SubmitSucceeded => {
                let directory = std::mem::take(&mut self.directory);
                let config = self.targeting.config();
                self = Self::new(config);
                self.directory = directory;
            }
        }
        self
    }

    /// Validate the draft and build the insert payload.
    ///
    /// Checks run in the order the operator sees them: subject and message
    /// first, then the store selection, then the session.
    pub fn prepare(&self, session: Option<&Session>) -> Result<NewMessage, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::BlankBody);
        }
        if self.targeting.is_empty() {
            return Err(ValidationError::NoTargets);
        }
        let session = session.ok_or(ValidationError::NotAuthenticated)?;
        Ok(NewMessage {
            title: self.title.clone(),
            body: self.body.clone(),
            list_of_stores: self.targeting.to_list(),
            user_id: session.user_id.clone(),
        })
    }

    /// Stores shown in the picker for the current search text.
    pub fn picker_rows(&self) -> Vec<(StoreCode, String, bool)> {
        self.directory
            .search(&self.picker_query)
            .into_iter()
            .map(|store| {
                let checked = self.targeting.contains(&store.code);
                (store.code.clone(), store.label(), checked)
            })
            .collect()
    }
}
