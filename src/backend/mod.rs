pub mod actor;
pub mod messages;
pub mod picker;

pub use actor::BackendActor;
pub use messages::{BackendCommand, BackendEvent, DownloadForm, PlaylistChoice};
pub use picker::{ChannelPicker, Selection, SelectionPrompt, StreamPicker};
