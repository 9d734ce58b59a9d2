pub mod registration;

pub use registration::{BuildingForm, BuildingRegistration, RegistrationError, RegistrationReply};
