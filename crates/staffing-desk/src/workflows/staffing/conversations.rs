//! Admin-side chat threads, one per worker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{JobId, Message, MessageId, Participant, StaffingError, Worker, WorkerId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub messages: Vec<Message>,
    /// Messages from the worker the admin has not opened yet.
    pub unread_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
}

/// Outgoing message as typed into the composer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageDraft {
    pub from: Participant,
    pub to: Participant,
    #[serde(default)]
    pub subject: String,
    pub content: String,
    #[serde(default)]
    pub job_id: Option<JobId>,
}

impl MessageDraft {
    pub fn into_message(
        self,
        id: MessageId,
        timestamp: DateTime<Utc>,
    ) -> Result<Message, StaffingError> {
        if self.content.trim().is_empty() {
            return Err(StaffingError::InvalidField {
                field: "content",
                expected: "non-empty message",
                value: self.content,
            });
        }
        // One side is always the admin desk, the other a worker.
        match (&self.from, &self.to) {
            (Participant::Admin, Participant::Worker(_))
            | (Participant::Worker(_), Participant::Admin) => {}
            _ => {
                return Err(StaffingError::InvalidField {
                    field: "to",
                    expected: "admin on exactly one side of the message",
                    value: format!("{} -> {}", self.from, self.to),
                })
            }
        }

        Ok(Message {
            id,
            from: self.from,
            to: self.to,
            subject: self.subject,
            content: self.content,
            timestamp,
            read: false,
            job_id: self.job_id,
        })
    }
}

fn between_admin_and(worker_id: &WorkerId, message: &Message) -> bool {
    match (&message.from, &message.to) {
        (Participant::Admin, to) => to.is_worker(worker_id),
        (from, Participant::Admin) => from.is_worker(worker_id),
        _ => false,
    }
}

/// Thread with one worker in timestamp order.
pub fn conversation_for(worker: &Worker, messages: &[Message]) -> Conversation {
    let mut thread: Vec<Message> = messages
        .iter()
        .filter(|message| between_admin_and(&worker.id, message))
        .cloned()
        .collect();
    thread.sort_by_key(|message| message.timestamp);

    let unread_count = thread
        .iter()
        .filter(|message| !message.read && message.to == Participant::Admin)
        .count();
    let last_message = thread.last().cloned();

    Conversation {
        worker_id: worker.id.clone(),
        worker_name: worker.name.clone(),
        messages: thread,
        unread_count,
        last_message,
    }
}

/// Threads for every worker with at least one message, in worker order.
pub fn conversations(workers: &[Worker], messages: &[Message]) -> Vec<Conversation> {
    workers
        .iter()
        .map(|worker| conversation_for(worker, messages))
        .filter(|conversation| !conversation.messages.is_empty())
        .collect()
}

/// Case-insensitive match on the worker name.
pub fn search_conversations(conversations: &[Conversation], query: &str) -> Vec<Conversation> {
    let needle = query.to_lowercase();
    conversations
        .iter()
        .filter(|conversation| conversation.worker_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Marks everything `counterpart` sent to `reader` as read.
pub fn mark_conversation_read(
    messages: &[Message],
    reader: &Participant,
    counterpart: &Participant,
) -> Vec<Message> {
    messages
        .iter()
        .map(|message| {
            if &message.to == reader && &message.from == counterpart {
                Message {
                    read: true,
                    ..message.clone()
                }
            } else {
                message.clone()
            }
        })
        .collect()
}
