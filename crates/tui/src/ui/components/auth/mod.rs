//! Account screen: sign in, register and reset password tabs.
//!
//! Everything here is client-side. Fields validate locally (email shape,
//! password strength and confirmation, required picks) and the submit path
//! posts an honest banner about the absent account service instead of
//! pretending a request succeeded. Banners expire on the runtime tick.

mod auth_component;
mod state;

pub use auth_component::AuthComponent;
pub use state::{AuthSlot, AuthState, AuthTab, MESSAGE_TTL, StatusMessage};
