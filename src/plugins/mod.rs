pub mod traits;
pub mod notifiers;

pub use traits::{Notifier, NotifierBox};
pub use notifiers::EmailNotifier;
