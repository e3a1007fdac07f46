pub mod notes_extractor;
pub mod reporter;
pub mod update_session;
pub mod update_tracker;

pub use notes_extractor::NotesExtractor;
pub use reporter::Reporter;
pub use update_session::UpdateSession;
