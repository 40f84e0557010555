//! Producer and veterinarian accounts as seen by the checkpoint workflows.

pub mod domain;
pub mod repository;

pub use domain::{
    eq_ignore_case, Address, GeoPoint, UserAccount, UserId, UserProfile, UserRole,
    VeterinarianProfile,
};
pub use repository::UserRepository;
