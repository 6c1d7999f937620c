mod auth;
mod normalize;
mod permissions;
mod table;
mod vocab;

pub use auth::authenticate;
pub use normalize::fold_key;
pub use permissions::{resolve_permissions, PermissionSet};
pub use table::{RowRecord, Sheet};
pub use vocab::{is_level_up, is_sm_unit, LEVEL_UP, SM_UNITS};
