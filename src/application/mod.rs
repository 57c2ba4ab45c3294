// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports to the collaborators the playback core drives.
//!
//! The core never talks to the network or the native media stack directly;
//! it emits effects that the screen turns into calls on these ports.

pub mod port;
