pub mod auth_response;
pub mod ids;
pub mod user;

pub use auth_response::AuthResponse;
pub use ids::UserId;
pub use user::{NewUser, PublicUser, UserRecord};
