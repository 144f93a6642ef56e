//! Authentication: session guard, sign-in/sign-up forms, authenticated calls

mod authed;
mod context;
mod forms;

pub use authed::AuthedApi;
pub use context::SessionGuard;
pub use forms::{AuthForms, AuthFormError};
