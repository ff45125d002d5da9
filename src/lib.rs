//! face-recorder - camera capture session that streams detected faces
//!
//! A recorder state machine drives camera authorization, capture session
//! configuration and per-frame face metadata, and reports every state
//! change and face batch to a listener.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the recorder state model, and errors
//! - **Application**: The recorder, its collaborators, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (dispatch queue, simulated camera, config file)
//! - **CLI**: Command-line interface, argument parsing, and output

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
