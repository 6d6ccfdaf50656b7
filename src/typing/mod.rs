//! Typing animation engine.
//!
//! - **machine**: the pure tick-by-tick state machine (`TypingMachine`)
//! - **engine**: the timer loop driving a machine into a `TextSink`
//!
//! # State Machine
//!
//! ```text
//! Typing ──(phrase complete)──► ErasingPause ──► Erasing
//!    ▲                                              │
//!    └──── AdvancePause ◄──(phrase erased, index+1)─┘
//! ```

use std::io;
use thiserror::Error;

pub mod engine;
pub mod machine;

pub use engine::{ChannelSink, TextSink, TypingEngine, TypingHandle, MIN_TICK};
pub use machine::{Mode, PhraseList, Tick, TypingConfig, TypingMachine};

#[derive(Error, Debug)]
pub enum TypingError {
    #[error("Phrase list is empty")]
    EmptyPhraseList,

    #[error("Phrase {index} is empty")]
    EmptyPhrase { index: usize },

    #[error("Failed to spawn typing thread: {0}")]
    Spawn(#[source] io::Error),
}
