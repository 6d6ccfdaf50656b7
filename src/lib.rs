//! typecycle library
//!
//! - **typing**: the typing animation engine (state machine + timer loop)
//! - **config**: `~/.typecycle/config.toml` and color schemes
//! - **prefs**: the persisted dark/light theme preference
//! - **counter**: count-up animation for the stats row
//! - **contact**: contact form validation and delivery
//! - **ui**: crossterm renderer and key mapping
//!
//! # Architecture
//!
//! ```text
//! main loop (ui thread)
//! ├── HeroRenderer ◄── HeroView ◄── mpsc::Receiver<String>
//! │                                        ▲
//! │                                  ChannelSink
//! │                                        │
//! ├── TypingHandle ──stop──► typing thread (TypingMachine)
//! └── CounterGroup (advanced once per frame)
//! ```

pub mod config;
pub mod contact;
pub mod counter;
pub mod prefs;
pub mod typing;
pub mod ui;
