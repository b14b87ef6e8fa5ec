pub mod claims;
pub mod current_user;
pub mod error;
pub mod jwt_validator;


pub use claims::Claims;
pub use current_user::CurrentUser;
pub use error::{AuthError, Result};
pub use jwt_validator::JwtValidator;
