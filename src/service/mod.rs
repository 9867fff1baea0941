//! Service integrations for external collaborators.
//!
//! This module contains the clients and servers used by the clinic portal:
//! - The portal backend client (HTTP, or offline when no backend is configured)
//! - Voice capture (an external speech-to-text program)
//! - The demo backend server
//!
//! Each client module defines both a generic trait and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod portal;
pub mod server;
pub mod voice;
