use crate::message::{Message, MessageId};
use crate::pager::Pager;

#[derive(Debug, Clone, PartialEq)]
pub enum MessageListAction {
    LoadStarted,
    Loaded { total_count: u64, messages: Vec<Message> },
    /// The load failed; whatever was on screen stays.
    LoadFailed,
    PreviousPage,
    NextPage,
    DeleteStarted(MessageId),
    /// The row is gone remotely; a reload of the current page follows.
    Deleted(MessageId),
    DeleteFailed(MessageId),
}

/// State of the message list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageListState {
    pager: Pager,
    messages: Vec<Message>,
    loading: bool,
    deleting: Option<MessageId>,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self {
            pager: Pager::default(),
            messages: Vec::new(),
            loading: true,
            deleting: None,
        }
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_deleting(&self, id: &MessageId) -> bool {
        self.deleting.as_ref() == Some(id)
    }

    /// "Page X of Y" caption under the table.
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.pager.page(), self.pager.total_pages())
    }

    pub fn apply(mut self, action: MessageListAction) -> Self {
        match action {
            MessageListAction::LoadStarted => self.loading = true,
            MessageListAction::Loaded {
                total_count,
                messages,
            } => {
                self.pager = self.pager.with_total(total_count);
                self.messages = messages;
                self.loading = false;
            }
            MessageListAction::LoadFailed => self.loading = false,
            MessageListAction::PreviousPage => self.pager = self.pager.previous(),
            MessageListAction::NextPage => self.pager = self.pager.next(),
            MessageListAction::DeleteStarted(id) => self.deleting = Some(id),
            MessageListAction::Deleted(id) | MessageListAction::DeleteFailed(id) => {
                if self.deleting.as_ref() == Some(&id) {
                    self.deleting = None;
                }
            }
        }
        self
    }
}
