use async_graphql::{Context, Result, Subscription};
use futures_util::Stream;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::gql::error::ResultExt;
use crate::gql::types::{BookingEvent, Role, UserNotification};

/// All subscription channels.
///
/// This is the explicit pub/sub replacement for the original product's
/// window-level custom event broadcast: workflow mutations publish here,
/// dashboards subscribe per ground or per user.
struct SubscriptionChannels {
    /// Per-ground booking event channels (owner dashboards)
    grounds: HashMap<Uuid, broadcast::Sender<BookingEvent>>,
    /// Per-user notification channels
    users: HashMap<Uuid, broadcast::Sender<UserNotification>>,
}

impl SubscriptionChannels {
    fn new() -> Self {
        Self {
            grounds: HashMap::new(),
            users: HashMap::new(),
        }
    }

    fn get_or_create_ground(&mut self, ground_id: Uuid) -> &broadcast::Sender<BookingEvent> {
        self.grounds
            .entry(ground_id)
            .or_insert_with(|| broadcast::channel(100).0)
    }

    fn get_or_create_user(&mut self, user_id: Uuid) -> &broadcast::Sender<UserNotification> {
        self.users
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(100).0)
    }
}

static CHANNELS: Lazy<Arc<Mutex<SubscriptionChannels>>> =
    Lazy::new(|| Arc::new(Mutex::new(SubscriptionChannels::new())));

/// Publish a booking event to the ground's channel. A channel whose last
/// subscriber is gone is dropped instead, so the maps do not grow without
/// bound.
pub fn publish_booking_event(ground_id: Uuid, event: BookingEvent) {
    let mut channels = CHANNELS.lock();
    match channels.grounds.get(&ground_id) {
        Some(sender) if sender.receiver_count() > 0 => {
            let _ = sender.send(event);
        }
        Some(_) => {
            channels.grounds.remove(&ground_id);
        }
        None => {}
    }
}

/// Drop a ground's channel outright (the ground was deleted). Live
/// subscriber streams end when the sender is dropped.
pub fn remove_ground_channel(ground_id: Uuid) {
    CHANNELS.lock().grounds.remove(&ground_id);
}

pub fn publish_user_notification(user_id: Uuid, notification: UserNotification) {
    let mut channels = CHANNELS.lock();
    match channels.users.get(&user_id) {
        Some(sender) if sender.receiver_count() > 0 => {
            let _ = sender.send(notification);
        }
        Some(_) => {
            channels.users.remove(&user_id);
        }
        None => {}
    }
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Booking created / cancelled / paid events for a ground.
    async fn ground_booking_events(
        &self,
        ground_id: async_graphql::ID,
    ) -> Result<impl Stream<Item = Result<BookingEvent, BroadcastStreamRecvError>>> {
        let ground_uuid = Uuid::parse_str(ground_id.as_str()).gql_err("Invalid ground ID")?;

        let receiver = {
            let mut channels = CHANNELS.lock();
            channels.get_or_create_ground(ground_uuid).subscribe()
        };

        Ok(BroadcastStream::new(receiver))
    }

    /// Per-user notification stream. Self or admin only.
    async fn user_notifications(
        &self,
        ctx: &Context<'_>,
        user_id: async_graphql::ID,
    ) -> Result<impl Stream<Item = Result<UserNotification, BroadcastStreamRecvError>>> {
        let user_uuid = Uuid::parse_str(user_id.as_str()).gql_err("Invalid user ID")?;

        let claims = ctx
            .data::<Claims>()
            .map_err(|_| async_graphql::Error::new("Authentication required"))?;
        let claims_role = Role::from(claims.role.clone());
        let is_self = claims.sub == user_uuid.to_string();
        if !is_self && !matches!(claims_role, Role::Admin | Role::SuperAdmin) {
            return Err(async_graphql::Error::new(
                "Access denied: you can only subscribe to your own notifications",
            ));
        }

        let receiver = {
            let mut channels = CHANNELS.lock();
            channels.get_or_create_user(user_uuid).subscribe()
        };

        Ok(BroadcastStream::new(receiver))
    }
}
