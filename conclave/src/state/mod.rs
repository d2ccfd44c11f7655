//! Shared state for team graphs.
//!
//! One [`TeamState`] flows through every cycle of one team graph invocation. Nodes never
//! mutate it directly: they return a [`StateUpdate`] (inside a `Command`) and the runner
//! applies it before scheduling the next cycle.
//!
//! # Main types
//!
//! - [`TeamState`]: append-only message history plus the last supervisor decision (`next`).
//! - [`StateUpdate`]: messages to append and an optional new `next`; also the payload of
//!   each stream snapshot.
//!
//! # Example
//!
//! ```rust
//! use conclave::{Message, StateUpdate, TeamState};
//!
//! let mut state = TeamState::from_user("Find the three largest cities in France");
//! state.apply(&StateUpdate::messages(vec![Message::user("Paris, Marseille, Lyon").with_name("search")]));
//! assert_eq!(state.messages.len(), 2);
//! ```

mod team_state;

pub use team_state::{StateUpdate, TeamState};
