//! Machine and effect seams for the event-driven auth flows.
//!
//! Machines are pure state machines: they interpret events and decide on
//! commands. State lives inside the machine and `decide` is synchronous, no
//! IO. Effects execute commands against remote collaborators and report
//! what happened as new events; application-level failures come back as
//! events so the machine can route recovery, while `Err` is reserved for
//! faults no state transition can answer.

use anyhow::Result;
use async_trait::async_trait;

/// A pure state machine that interprets events and decides on commands.
pub trait Machine {
    /// The event type this machine handles.
    type Event;

    /// The command type this machine can emit.
    type Command;

    /// Process one event, update internal state, and optionally request IO.
    ///
    /// Called synchronously and serially; at most one command per event.
    fn decide(&mut self, event: &Self::Event) -> Option<Self::Command>;
}

/// Executes commands against external collaborators.
#[async_trait]
pub trait Effect<C, D>: Send + Sync {
    /// The event type produced by executed commands.
    type Event;

    /// Perform the IO a command asks for and report the resulting fact.
    async fn execute(&self, command: C, deps: &D) -> Result<Self::Event>;
}
