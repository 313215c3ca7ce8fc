//! Room resource component.
//!
//! Owns the `rooms` table. `get` is enriched with the room's messages
//! via the message component; `create`/`patch` validate `author_id`
//! against the person component. Deletes cascade into the message
//! component, attempting the message cleanup for each room before the
//! room rows themselves are removed.

use chrono::Utc;
use tracing::warn;

use super::{Resources, ResourceError, validate};
use crate::api::types::{NewRoomRequest, RoomPatchRequest};
use crate::db::Store;
use crate::entities::{messages, rooms};

const RESOURCE: &str = "Room";

pub struct RoomService {
    ctx: Resources,
}

impl RoomService {
    #[must_use]
    pub(crate) const fn new(ctx: Resources) -> Self {
        Self { ctx }
    }

    fn store(&self) -> &Store {
        &self.ctx.store
    }

    pub async fn list(&self) -> Result<Vec<rooms::Model>, ResourceError> {
        Ok(self.store().list_rooms().await?)
    }

    pub async fn get(&self, id: i32) -> Result<(rooms::Model, Vec<messages::Model>), ResourceError> {
        let room = self
            .store()
            .get_room(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        let room_messages = self.ctx.messages().list_by_room(room.id).await?;
        Ok((room, room_messages))
    }

    pub async fn list_by_author(&self, author_id: i32) -> Result<Vec<rooms::Model>, ResourceError> {
        Ok(self.store().list_rooms_by_author(author_id).await?)
    }

    pub async fn create(&self, req: NewRoomRequest) -> Result<rooms::Model, ResourceError> {
        self.check_name(&req.name).await?;

        let created = match req.created {
            Some(ts) => {
                validate::past_only("created", ts)?;
                ts
            }
            None => Utc::now(),
        };

        self.check_author_id(req.author_id).await?;

        let room = self
            .store()
            .insert_room(req.name, created, req.author_id)
            .await?;

        Ok(room)
    }

    pub async fn update_name(&self, id: i32, name: String) -> Result<rooms::Model, ResourceError> {
        self.check_name(&name).await?;

        let mut room = self
            .store()
            .get_room(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        room.name = name;
        Ok(self.store().save_room(room).await?)
    }

    /// Per-field patch; `author_id == 0` means "not provided" and
    /// never triggers a reference check.
    pub async fn patch(
        &self,
        id: i32,
        patch: RoomPatchRequest,
    ) -> Result<rooms::Model, ResourceError> {
        let mut room = self
            .store()
            .get_room(id)
            .await?
            .ok_or(ResourceError::not_found(RESOURCE, id))?;

        if let Some(name) = patch.name {
            self.check_name(&name).await?;
            room.name = name;
        }
        if let Some(created) = patch.created {
            validate::past_only("created", created)?;
            room.created = created;
        }
        if patch.author_id != 0 {
            self.check_author_id(patch.author_id).await?;
            room.author_id = patch.author_id;
        }

        Ok(self.store().save_room(room).await?)
    }

    /// Deletes the room after a best-effort sweep of its messages.
    pub async fn delete(&self, id: i32) -> Result<(), ResourceError> {
        if let Err(e) = self.ctx.messages().delete_all_by_room(id).await {
            warn!("Cascade delete of messages for room {id} failed: {e}");
        }

        self.store().delete_room(id).await?;
        Ok(())
    }

    /// Removes every room owned by `author_id`. The message cascade
    /// for a room is always attempted before the room batch is
    /// removed, so a fully successful run leaves no orphaned
    /// messages; a failure mid-sequence can (non-transactional,
    /// documented limitation).
    pub async fn delete_all_by_author(&self, author_id: i32) -> Result<u64, ResourceError> {
        let owned = self.store().list_rooms_by_author(author_id).await?;
        let message_component = self.ctx.messages();

        for room in &owned {
            if let Err(e) = message_component.delete_all_by_room(room.id).await {
                warn!("Cascade delete of messages for room {} failed: {e}", room.id);
            }
        }

        Ok(self.store().delete_rooms_by_author(author_id).await?)
    }

    async fn check_name(&self, name: &str) -> Result<(), ResourceError> {
        validate::non_empty("name of room", name)?;
        if self.store().get_room_by_name(name).await?.is_some() {
            return Err(ResourceError::duplicate(RESOURCE, name));
        }
        Ok(())
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
