pub mod commands;
pub mod input;
pub mod notify;
pub mod services;
pub mod workspace;

pub use commands::{CommandError, WorkspaceCommand};
pub use notify::{Notifier, Toast, ToastLevel};
pub use services::ServiceError;
pub use workspace::{Workspace, ATTRIBUTES_PANEL, LAYERS_PANEL};
