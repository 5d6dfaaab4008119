//! Store targeting for outbound messages.
//!
//! An operator picks exactly one way of choosing recipients: typing codes by
//! hand, ticking stores in the picker, or sending to every active store.
//! Switching between these discards the previous selection. Whatever the
//! route, the result is one ordered list of store codes attached to the
//! message on submit.

use std::collections::HashSet;
use std::str::FromStr;

use crate::error::TargetingError;
use crate::store::{StoreCode, StoreDirectory};

/// How recipients are being chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetingMode {
    #[default]
    None,
    Manual,
    List,
    All,
}

/// What to do with a code typed more than once in the manual entry box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Send the list exactly as typed.
    Keep,
    /// Keep the first occurrence of each code.
    #[default]
    Collapse,
}

impl FromStr for DuplicatePolicy {
    type Err = TargetingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "collapse" => Ok(Self::Collapse),
            other => Err(TargetingError::UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetingConfig {
    pub manual_duplicates: DuplicatePolicy,
}

/// Split a comma-separated list of codes, trimming each and dropping blanks.
///
/// Unknown codes are accepted as typed; nothing is checked against the
/// store directory.
pub fn parse_manual_codes(raw: &str, policy: DuplicatePolicy) -> Vec<StoreCode> {
    let codes = raw
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(StoreCode::from);

    match policy {
        DuplicatePolicy::Keep => codes.collect(),
        DuplicatePolicy::Collapse => {
            let mut seen = HashSet::new();
            codes.filter(|code| seen.insert(code.clone())).collect()
        }
    }
}

/// Selection state for one message being composed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Targeting {
    mode: TargetingMode,
    selected: Vec<StoreCode>,
    config: TargetingConfig,
}

impl Targeting {
    pub fn new(config: TargetingConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> TargetingMode {
        self.mode
    }

    pub fn config(&self) -> TargetingConfig {
        self.config
    }

    /// Selected codes in the order they were added.
    pub fn selected(&self) -> &[StoreCode] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, code: &StoreCode) -> bool {
        self.selected.contains(code)
    }

    /// Switch to typing codes by hand. Any earlier selection is dropped.
    pub fn enter_manual_mode(&mut self) {
        self.mode = TargetingMode::Manual;
        self.selected.clear();
    }

    /// Replace the selection with the codes typed into the manual box.
    pub fn submit_manual_codes(&mut self, raw: &str) {
        self.selected = parse_manual_codes(raw, self.config.manual_duplicates);
    }

    /// Switch to picking from the directory list.
    ///
    /// Coming from another mode starts an empty selection; re-opening the
    /// picker while already in list mode keeps what was ticked.
    pub fn enter_list_mode(&mut self) {
        if self.mode != TargetingMode::List {
            self.selected.clear();
        }
        self.mode = TargetingMode::List;
    }

    /// Add `code` if absent, remove it if present.
    pub fn toggle_store(&mut self, code: StoreCode) -> Result<(), TargetingError> {
        match self.mode {
            TargetingMode::Manual | TargetingMode::List => {}
            mode => return Err(TargetingError::NotSelecting(mode)),
        }
        if self.selected.contains(&code) {
            self.selected.retain(|c| c != &code);
        } else {
            self.selected.push(code);
        }
        Ok(())
    }

    /// Target every active store in `directory` as it stands right now.
    ///
    /// The codes are copied; stores added to the directory afterwards are not
    /// included unless this is called again.
    pub fn send_to_all(&mut self, directory: &StoreDirectory) {
        self.mode = TargetingMode::All;
        self.selected = directory.active_codes();
    }

    /// Drop one code from the selection without leaving the current mode.
    /// Returns whether anything was removed.
    pub fn remove_one(&mut self, code: &StoreCode) -> bool {
        let before = self.selected.len();
        self.selected.retain(|c| c != code);
        self.selected.len() != before
    }

    pub fn reset(&mut self) {
        self.mode = TargetingMode::None;
        self.selected.clear();
    }

    /// The list persisted as `list_of_stores`.
    pub fn to_list(&self) -> Vec<StoreCode> {
        self.selected.clone()
    }
}
