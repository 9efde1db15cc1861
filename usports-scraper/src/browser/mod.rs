pub mod identity;
pub mod provider;
pub mod session;

pub use identity::Identity;
pub use provider::WebDriverProvider;
pub use session::{BrowserConfig, BrowserKind, new_session};
