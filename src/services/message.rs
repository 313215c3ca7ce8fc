//! Message resource component. Leaf of the cascade graph: nothing
//! depends on a message, so deletes never fan out.

use chrono::Utc;

use super::{Resources, ResourceError, validate};
use crate::api::types::{MessagePatchRequest, NewMessageRequest};
use crate::db::Store;
use crate::entities::messages;

const RESOURCE: &str = "Message";

pub struct MessageService {
    ctx: Resources,
}

impl MessageService {
    #[must_use]
    pub(crate) const fn new(ctx: Resources) -> Self {
        Self { ctx }
    }

    fn store(&self) -> &Store {
        &self.ctx.store
    }

    pub async fn list(&self) -> Result<Vec<messages::Model>, ResourceError> {
        Ok(self.store().list_messages().await?)
    }

    pub async fn get(&self, id: i32) -> Result<messages::Model, ResourceError> {
        self.store()
            .get_message(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))
    }

    pub async fn list_by_room(&self, room_id: i32) -> Result<Vec<messages::Model>, ResourceError> {
        Ok(self.store().list_messages_by_room(room_id).await?)
    }

    pub async fn create(&self, req: NewMessageRequest) -> Result<messages::Model, ResourceError> {
        validate::non_empty("text of message", &req.text)?;

        let created = match req.created {
            Some(ts) => {
                validate::past_only("created", ts)?;
                ts
            }
            None => Utc::now(),
        };

        self.check_room_id(req.room_id).await?;
        self.check_author_id(req.author_id).await?;

        let message = self
            .store()
            .insert_message(req.text, created, req.room_id, req.author_id)
            .await?;

        Ok(message)
    }

    pub async fn update_text(&self, id: i32, text: String) -> Result<messages::Model, ResourceError> {
        validate::non_empty("text of message", &text)?;

        let mut message = self
            .store()
            .get_message(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        message.text = text;
        Ok(self.store().save_message(message).await?)
    }

    /// Per-field patch; a zero `room_id`/`author_id` means "not
    /// provided" and skips the reference check entirely.
    pub async fn patch(
        &self,
        id: i32,
        patch: MessagePatchRequest,
    ) -> Result<messages::Model, ResourceError> {
        let mut message = self
            .store()
            .get_message(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        if let Some(text) = patch.text {
            validate::non_empty("text of message", &text)?;
            message.text = text;
        }
        if let Some(created) = patch.created {
            validate::past_only("created", created)?;
            message.created = created;
        }
        if patch.room_id != 0 {
            self.check_room_id(patch.room_id).await?;
            message.room_id = patch.room_id;
        }
        if patch.author_id != 0 {
            self.check_author_id(patch.author_id).await?;
            message.author_id = patch.author_id;
        }

        Ok(self.store().save_message(message).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ResourceError> {
        self.store().delete_message(id).await?;
        Ok(())
    }

    /// Idempotent: repeating the call after the room is already empty
    /// deletes zero rows and is not an error.
    pub async fn delete_all_by_room(&self, room_id: i32) -> Result<u64, ResourceError> {
        Ok(self.store().delete_messages_by_room(room_id).await?)
    }

    async fn check_room_id(&self, room_id: i32) -> Result<(), ResourceError> {
        match self.ctx.rooms().get(room_id).await {
            Ok(_) => Ok(()),
            Err(ResourceError::NotFound { .. }) => {
                Err(ResourceError::reference("Room", "roomId", room_id))
            }
            Err(other) => Err(other),
        }
    }

    async fn check_author_id(&self, author_id: i32) -> Result<(), ResourceError> {
        match self.ctx.people().get(author_id).await {
            Ok(_) => Ok(()),
            Err(ResourceError::NotFound { .. }) => {
                Err(ResourceError::reference("Person", "authorId", author_id))
            }
            Err(other) => Err(other),
        }
    }
}
