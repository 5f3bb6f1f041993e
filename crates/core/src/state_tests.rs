use super::*;
use yare::parameterized;

#[parameterized(
    exiting = {"E", State::Exiting},
    held = {"H", State::Held},
    queued = {"Q", State::Queued},
    running = {"R", State::Running},
    moving = {"T", State::Moving},
    waiting = {"W", State::Waiting},
    suspended = {"S", State::Suspended},
    unsubmitted = {"U", State::Unsubmitted},
    unrecognised = {"Z", State::Unknown},
    empty = {"", State::Unknown},
)]
fn parse_code_cases(code: &str, expected: State) {
    assert_eq!(State::parse_code(code), expected);
}

#[test]
fn is_running_only_true_for_running() {
    assert!(State::Running.is_running());
    assert!(!State::Queued.is_running());
}

#[test]
fn is_queued_only_true_for_queued() {
    assert!(State::Queued.is_queued());
    assert!(!State::Running.is_queued());
}

#[test]
fn terminal_states_are_completed_and_failed() {
    assert!(State::Completed.is_terminal());
    assert!(State::Failed.is_terminal());
    assert!(!State::Running.is_terminal());
    assert!(!State::Alert.is_terminal());
}

#[test]
fn string_value_roundtrips() {
    for state in [
        State::Exiting,
        State::Held,
        State::Queued,
        State::Running,
        State::Moving,
        State::Waiting,
        State::Suspended,
        State::Unknown,
        State::Unsubmitted,
        State::Completed,
        State::Failed,
        State::Alert,
    ] {
        let s = state.as_str();
        assert_eq!(State::from_str_value(s).unwrap(), state);
    }
}

#[test]
fn from_str_value_rejects_unrecognised() {
    assert!(State::from_str_value("bogus").is_err());
}
