//! Data models for the events server

pub mod enums;
pub mod event;
pub mod logistics;
pub mod participant;

// Re-export commonly used types
pub use enums::Tache;
pub use event::Event;
pub use logistics::Logistics;
pub use participant::Participant;
