//! Request and response DTOs for the web API.

mod request;
mod response;

pub use request::{AdminSignupRequest, LoginRequest, OfficerSignupRequest};
pub use response::{LoginResponse, MessageResponse, UserResponse};
