//! EcoLearn session engine - scored, timed challenge sessions
//!
//! One state machine drives every game mode: draw items from a catalog,
//! put them in front of the player one at a time, judge responses, keep
//! score, and watch the clock. Game modes differ only in content and in a
//! [`SessionConfig`].
//!
//! # Architecture
//!
//! - **Content**: opaque prompts plus [`Resolve`] implementations, collected
//!   into a validated [`Catalog`]
//! - **Session**: the command-driven state machine; every mutation returns a
//!   [`Transition`] or rejects untouched
//! - **Scoring**: pure delta arithmetic in [`ScoringPolicy`]
//! - **Clock**: tick-driven countdowns; hosts own all timers and honor
//!   [`Directive`]s
//! - **Invariants**: first-class state properties checked after every
//!   command in debug builds
//!
//! # Example
//!
//! ```
//! use ecolearn_engine::{
//!     Catalog, ChallengeItem, Difficulty, Outcome, Session, SessionConfig, TimerScope,
//! };
//! use rand::SeedableRng;
//!
//! let items = (0..3)
//!     .map(|n| {
//!         ChallengeItem::new(
//!             format!("fact-{n}"),
//!             format!("Statement #{n}"),
//!             "general",
//!             Difficulty::Easy,
//!             100,
//!             |response: &bool| {
//!                 if *response {
//!                     Outcome::Correct
//!                 } else {
//!                     Outcome::Incorrect
//!                 }
//!             },
//!         )
//!     })
//!     .collect();
//! let catalog = Catalog::new(items)?;
//!
//! let config = SessionConfig::default()
//!     .with_item_count(3)
//!     .with_timer_scope(TimerScope::PerSession { seconds: 60 });
//! let mut session = Session::new(config)?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! session.start(&catalog, &mut rng)?;
//! session.submit(&true)?;
//! session.advance()?;
//! assert_eq!(*session.score(), 100);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clock;
mod command;
mod config;
mod content;
mod phase;
mod scoring;
mod session;
mod snapshot;

// Invariants stay addressable for tests and hosts
pub mod invariants;

// Crate-level exports - Clock
pub use clock::{ClockError, SessionClock, TimerScope};

// Crate-level exports - Commands and directives
pub use command::{CommandError, CommandKind, Directive, StartError, TICK_PERIOD_MS};

// Crate-level exports - Configuration
pub use config::{ConfigError, SessionConfig};

// Crate-level exports - Content
pub use content::{
    Catalog, CatalogError, ChallengeItem, Difficulty, ItemFilter, ItemId, Outcome, Resolve,
    SampleError,
};

// Crate-level exports - Phases and records
pub use phase::{ItemOutcome, PhaseKind, ResolutionRecord, SessionPhase, SessionSummary};

// Crate-level exports - Scoring
pub use scoring::ScoringPolicy;

// Crate-level exports - Session machine
pub use session::{Session, Transition};

// Crate-level exports - Snapshots
pub use snapshot::{CurrentItem, SessionSnapshot};
