mod engine;
mod session;
mod track;

pub use engine::{AudioEngine, EngineNotice, NullEngine, SkipDirection};
pub use session::{PlaybackSession, PlaybackStatus};
pub use track::{Track, TrackQueue, TrackSource};
