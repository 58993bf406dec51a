pub mod booking;
pub mod event;
pub mod policy;
pub mod slot;
pub mod validation;
pub mod vapi;

pub use booking::{BookingConfirmation, BookingRequest};
pub use event::{
    Attendee, CalendarEventDraft, CreatedEvent, EventDateTime, ExtendedProperties,
    ReminderMethod, ReminderOverride, Reminders,
};
pub use policy::{BookingField, BookingPolicy, BookingProfile};
pub use slot::{ResolvedSlot, SlotRule};
pub use validation::{Rejection, RejectionReason, ValidationResult};
pub use vapi::BookingPayload;
