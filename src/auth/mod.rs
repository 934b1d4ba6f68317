pub mod identity;
pub mod middleware;
pub mod utils;

pub use identity::{CurrentUser, UserRole};
pub use middleware::{AuthenticatedUser, IdentityMiddleware};
pub use utils::{extract_user_from_context, require_admin, require_owner_or_admin};
