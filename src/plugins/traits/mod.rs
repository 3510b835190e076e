pub mod notifier;

pub use notifier::{ChangeType, NotificationEvent, Notifier, NotifierBox};
