//! Engine tests: creation and catalog plumbing, cancellation/mute control,
//! graceful degradation, and segment sequencing, driven through a scripted
//! stub capability.

pub mod helpers;
pub mod stubs;
