use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle phase of an ingestion loop.
///
/// `Idle -> Running -> Stopped`; `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl Phase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Running,
            2 => Self::Stopped,
            _ => Self::Idle,
        }
    }
}

/// Shared run/stop flag.
///
/// Each transition is a single compare-and-swap, so a late `start` can never
/// bring a stopped loop back to life.
#[derive(Debug, Default)]
pub struct RunState {
    phase: AtomicU8,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// `Idle -> Running`. Returns the phase observed if the transition did not apply.
    pub fn start(&self) -> Result<(), Phase> {
        self.transition(Phase::Idle, Phase::Running)
    }

    /// `Running -> Stopped`. Returns `true` if this call performed the transition.
    pub fn stop(&self) -> bool {
        self.transition(Phase::Running, Phase::Stopped).is_ok()
    }

    /// Move to `Stopped` from any phase. Used when the loop ends on its own
    /// or a never-started controller is shut down.
    pub fn finish(&self) -> bool {
        self.phase.swap(Phase::Stopped as u8, Ordering::AcqRel) != Phase::Stopped as u8
    }

    fn transition(&self, from: Phase, to: Phase) -> Result<(), Phase> {
        self.phase
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(Phase::from_u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        assert_eq!(RunState::new().phase(), Phase::Idle);
    }

    #[test]
    fn start_then_stop() {
        let state = RunState::new();
        assert!(state.start().is_ok());
        assert!(state.is_running());
        assert!(state.stop());
        assert_eq!(state.phase(), Phase::Stopped);
    }

    #[test]
    fn start_twice_reports_running() {
        let state = RunState::new();
        state.start().unwrap();
        assert_eq!(state.start(), Err(Phase::Running));
    }

    #[test]
    fn stopped_is_terminal() {
        let state = RunState::new();
        state.start().unwrap();
        state.stop();
        assert_eq!(state.start(), Err(Phase::Stopped));
        assert!(!state.stop());
        assert_eq!(state.phase(), Phase::Stopped);
    }

    #[test]
    fn stop_on_idle_is_noop() {
        let state = RunState::new();
        assert!(!state.stop());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn finish_from_any_phase() {
        let state = RunState::new();
        assert!(state.finish());
        assert!(!state.finish());
        assert_eq!(state.phase(), Phase::Stopped);
    }
}
