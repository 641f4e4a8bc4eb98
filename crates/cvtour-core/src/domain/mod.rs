//! Domain model (markers, steps, session state, events, errors, welcome text).

pub mod errors;
pub mod events;
pub mod ids;
pub mod marker;
pub mod session;
pub mod step;
pub mod welcome;

pub use self::errors::{DriverError, OverlayError, StorageError, TourError};
pub use self::events::{DriverEvent, PromptChoice};
pub use self::ids::{OverlayId, SessionId};
pub use self::marker::{CompletionMarker, UnknownToken};
pub use self::session::{Termination, TourSession, TourState};
pub use self::step::{ElementRef, Placement, StepDescriptor};
pub use self::welcome::WelcomeContent;
