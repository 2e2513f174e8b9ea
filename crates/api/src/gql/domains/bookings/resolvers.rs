use async_graphql::{Context, Object, Result};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::auth::permissions::{require_ground_owner, require_user};
use crate::auth::Claims;
use crate::gql::error::{DbResultExt, ResultExt};
use crate::gql::subscriptions::{publish_booking_event, publish_user_notification};
use crate::gql::types::{
    NotificationType, PaginationInput, Role, UserNotification,
    TITLE_BOOKING_CANCELLED, TITLE_BOOKING_CONFIRMED,
};
use crate::state::AppState;
use infra::repos::bookings;

use super::service::{self, CreateBookingParams};
use super::types::{
    Booking, BookingEvent, BookingEventType, CreateBookingInput, TimeSlot, TimeSlotInput,
};

// BookingError implements Display, so `?` converts it into a GraphQL error
// via async-graphql's blanket From impl. The Db variant's message is the
// generic "database error"; details stay in the server logs.

#[derive(Default)]
pub struct BookingQuery;

#[Object]
impl BookingQuery {
    /// All unbooked slots for a ground on a date.
    async fn available_time_slots(
        &self,
        ctx: &Context<'_>,
        ground_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>> {
        let state = ctx.data::<AppState>()?;

        let rows = infra::repos::time_slots::list_available(&state.db, ground_id, date)
            .await
            .db_err()?;

        Ok(rows.into_iter().map(TimeSlot::from).collect())
    }

    /// The authenticated user's bookings, newest first, slots included.
    async fn my_bookings(
        &self,
        ctx: &Context<'_>,
        pagination: Option<PaginationInput>,
    ) -> Result<Vec<Booking>> {
        let user = require_user(ctx).await?;
        let user_id = Uuid::parse_str(user.id.as_str()).gql_err("Invalid user ID")?;

        let state = ctx.data::<AppState>()?;
        let limit_offset = pagination.unwrap_or_default().to_limit_offset();

        let rows = bookings::list_by_user(&state.db, user_id, limit_offset)
            .await
            .db_err()?;

        let hydrated = service::hydrate(&state.db, rows).await?;
        Ok(hydrated.into_iter().map(Booking::from).collect())
    }

    /// Bookings for a ground. Ground owner or admin only.
    async fn ground_bookings(
        &self,
        ctx: &Context<'_>,
        ground_id: Uuid,
        pagination: Option<PaginationInput>,
    ) -> Result<Vec<Booking>> {
        require_ground_owner(ctx, ground_id).await?;

        let state = ctx.data::<AppState>()?;
        let limit_offset = pagination.unwrap_or_default().to_limit_offset();

        let rows = bookings::list_by_ground(&state.db, ground_id, limit_offset)
            .await
            .db_err()?;

        let hydrated = service::hydrate(&state.db, rows).await?;
        Ok(hydrated.into_iter().map(Booking::from).collect())
    }
}

#[derive(Default)]
pub struct BookingMutation;

#[Object]
impl BookingMutation {
    /// Publish bookable slots on a ground for a date. Ground owner or admin.
    async fn create_time_slots(
        &self,
        ctx: &Context<'_>,
        ground_id: Uuid,
        date: NaiveDate,
        slots: Vec<TimeSlotInput>,
    ) -> Result<Vec<TimeSlot>> {
        require_ground_owner(ctx, ground_id).await?;

        if slots.is_empty() {
            return Err(async_graphql::Error::new("No slots provided"));
        }
        for slot in &slots {
            if slot.start_time >= slot.end_time {
                return Err(async_graphql::Error::new(
                    "Slot start time must precede its end time",
                ));
            }
        }

        let state = ctx.data::<AppState>()?;
        let mut tx = state.db.begin().await.db_err()?;

        let mut created = Vec::with_capacity(slots.len());
        for slot in slots {
            let row = infra::repos::time_slots::create(
                &mut *tx,
                infra::repos::time_slots::CreateTimeSlotData {
                    ground_id,
                    slot_date: date,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    price_cents: slot.price_cents,
                },
            )
            .await
            .db_err()?;
            created.push(TimeSlot::from(row));
        }

        tx.commit().await.db_err()?;

        tracing::info!(%ground_id, %date, count = created.len(), "Time slots published");
        Ok(created)
    }

    /// Book one or more slots on a ground. Authenticated users book under
    /// their account; anonymous callers must supply guest name and phone.
    async fn create_booking(
        &self,
        ctx: &Context<'_>,
        input: CreateBookingInput,
    ) -> Result<Booking> {
        let state = ctx.data::<AppState>()?;

        let user_id = match ctx.data::<Claims>() {
            Ok(claims) => Some(Uuid::parse_str(&claims.sub).gql_err("Invalid user ID")?),
            Err(_) => None,
        };

        if user_id.is_none() && (input.guest_name.is_none() || input.guest_phone.is_none()) {
            return Err(async_graphql::Error::new(
                "Guest bookings require a name and phone number",
            ));
        }

        let result = service::create_booking(
            &state.db,
            CreateBookingParams {
                user_id,
                guest_name: input.guest_name,
                guest_phone: input.guest_phone,
                ground_id: input.ground_id,
                slot_date: input.slot_date,
                slot_ids: input.slot_ids,
                sports_area_id: input.sports_area_id,
            },
        )
        .await?;

        let booking = Booking::from(result);
        publish_booking_event(
            input.ground_id,
            BookingEvent {
                event_type: BookingEventType::Created,
                booking: booking.clone(),
            },
        );

        Ok(booking)
    }

    /// Mark a pending booking as paid and confirmed. Called after external
    /// payment confirmation.
    async fn complete_payment(&self, ctx: &Context<'_>, booking_id: Uuid) -> Result<Booking> {
        let state = ctx.data::<AppState>()?;

        authorize_booking_access(ctx, state, booking_id).await?;

        let result = service::complete_payment(&state.db, booking_id).await?;
        let booking = Booking::from(result);

        publish_event_and_notify(
            &booking,
            BookingEventType::PaymentCompleted,
            NotificationType::BookingConfirmed,
            TITLE_BOOKING_CONFIRMED,
            format!(
                "Your booking at {} on {} is confirmed",
                booking.ground_name, booking.slot_date
            ),
        );

        Ok(booking)
    }

    /// Cancel a booking and release its slots. Idempotent.
    async fn cancel_booking(&self, ctx: &Context<'_>, booking_id: Uuid) -> Result<Booking> {
        let state = ctx.data::<AppState>()?;

        authorize_booking_access(ctx, state, booking_id).await?;

        let result = service::cancel_booking(&state.db, booking_id).await?;
        let booking = Booking::from(result);

        publish_event_and_notify(
            &booking,
            BookingEventType::Cancelled,
            NotificationType::BookingCancelled,
            TITLE_BOOKING_CANCELLED,
            format!(
                "Your booking at {} on {} was cancelled",
                booking.ground_name, booking.slot_date
            ),
        );

        Ok(booking)
    }
}

/// Booking mutations are allowed for the booking's user, the ground owner,
/// or an admin. Guest bookings (no user id) have no account to check, so
/// they stay open to the unauthenticated payment/cancel flow, mirroring the
/// original product.
async fn authorize_booking_access(
    ctx: &Context<'_>,
    state: &AppState,
    booking_id: Uuid,
) -> Result<()> {
    let booking = bookings::get_by_id(&state.db, booking_id)
        .await
        .db_err()?
        .ok_or_else(|| async_graphql::Error::new("Booking not found"))?;

    let Some(owner_user_id) = booking.user_id else {
        return Ok(());
    };

    let claims = ctx
        .data::<Claims>()
        .map_err(|_| async_graphql::Error::new("You must be logged in to perform this action"))?;

    if claims.sub == owner_user_id.to_string() {
        return Ok(());
    }

    let claims_role = Role::from(claims.role.clone());
    if matches!(claims_role, Role::Admin | Role::SuperAdmin) {
        return Ok(());
    }

    // Fall back to ground ownership
    require_ground_owner(ctx, booking.ground_id).await?;
    Ok(())
}

fn publish_event_and_notify(
    booking: &Booking,
    event_type: BookingEventType,
    notification_type: NotificationType,
    title: &str,
    message: String,
) {
    let ground_id = match Uuid::parse_str(booking.ground_id.as_str()) {
        Ok(id) => id,
        Err(_) => return,
    };

    publish_booking_event(
        ground_id,
        BookingEvent {
            event_type,
            booking: booking.clone(),
        },
    );

    if let Some(user_id) = booking
        .user_id
        .as_ref()
        .and_then(|id| Uuid::parse_str(id.as_str()).ok())
    {
        publish_user_notification(
            user_id,
            UserNotification {
                id: Uuid::new_v4().into(),
                user_id: user_id.into(),
                notification_type,
                title: title.to_string(),
                message,
                booking_id: Some(booking.id.clone()),
                created_at: Utc::now(),
            },
        );
    }
}
