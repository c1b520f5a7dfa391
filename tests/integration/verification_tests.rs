use crate::fixtures::*;
use litmock::{Expectation, Mock, MockError};

fn repository() -> litmock::VerifiableMock<dyn UserRepository> {
    Mock::of::<dyn UserRepository>()
        .setup(user_repository::get_by_id, User::new(1, "Test"))
        .build()
        .unwrap()
}

#[test]
fn test_once_passes_when_called_once() {
    let mock = repository();
    mock.object().get_by_id(1);
    mock.verify(user_repository::get_by_id).once().unwrap();
}

#[test]
fn test_once_fails_when_not_called() {
    let mock = repository();
    let err = mock.verify(user_repository::get_by_id).once().unwrap_err();
    match err {
        MockError::VerificationFailed {
            member,
            expected,
            actual,
        } => {
            assert_eq!(member, "get_by_id");
            assert_eq!(expected, Expectation::Exactly(1));
            assert_eq!(actual, 0);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_called_twice_fails_once_and_passes_times_two() {
    let mock = repository();
    mock.object().get_by_id(1);
    mock.object().get_by_id(1);

    let err = mock.verify(user_repository::get_by_id).once().unwrap_err();
    assert!(matches!(err, MockError::VerificationFailed { actual: 2, .. }));
    assert_eq!(err.to_string(), "Expected 1 call to get_by_id, but received 2");
    mock.verify(user_repository::get_by_id).times(2).unwrap();
}

#[test]
fn test_times_at_least_and_never() {
    let mock = repository();
    for id in 0..3 {
        mock.object().get_by_id(id);
    }

    mock.verify(user_repository::get_by_id).times(3).unwrap();
    mock.verify(user_repository::get_by_id).at_least(2).unwrap();
    mock.verify(user_repository::get_by_id).at_least(3).unwrap();
    assert!(mock.verify(user_repository::get_by_id).at_least(4).is_err());
    mock.verify(user_repository::delete).never().unwrap();
}

#[test]
fn test_counts_are_keyed_by_member_not_arguments() {
    let mock = repository();
    mock.object().get_by_id(1);
    mock.object().get_by_id(2);
    mock.verify(user_repository::get_by_id).times(2).unwrap();
}

#[test]
fn test_verification_does_not_change_counts() {
    let mock = repository();
    mock.object().get_by_id(1);
    for _ in 0..5 {
        mock.verify(user_repository::get_by_id).once().unwrap();
        let _ = mock.verify(user_repository::get_by_id).times(4);
    }
    assert_eq!(mock.call_count(user_repository::get_by_id).unwrap(), 1);
}

#[test]
fn test_no_other_calls_passes_after_verifying_everything() {
    let mock = repository();
    mock.object().get_by_id(1);
    mock.verify(user_repository::get_by_id).once().unwrap();
    mock.verify_no_other_calls().unwrap();
}

#[test]
fn test_no_other_calls_ignores_uncalled_members() {
    let mock = repository();
    mock.verify_no_other_calls().unwrap();
}

#[test]
fn test_no_other_calls_lists_unverified_members() {
    let mock = Mock::of::<dyn UserRepository>().build().unwrap();

    let user = mock.object().get_by_id(1);
    assert_eq!(user, User::default());
    mock.object().delete(3);

    let err = mock.verify_no_other_calls().unwrap_err();
    match &err {
        MockError::UnverifiedCalls { members } => {
            assert_eq!(members, &vec!["delete".to_string(), "get_by_id".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("get_by_id"));

    mock.verify(user_repository::delete).once().unwrap();
    let err = mock.verify_no_other_calls().unwrap_err();
    assert!(matches!(
        err,
        MockError::UnverifiedCalls { ref members } if members == &vec!["get_by_id".to_string()]
    ));
}

#[test]
fn test_failed_verification_does_not_mark_member() {
    let mock = repository();
    mock.object().get_by_id(1);
    assert!(mock.verify(user_repository::get_by_id).never().is_err());
    assert!(mock.verify_no_other_calls().is_err());
}

#[test]
fn test_with_argument_matches_any_recorded_call() {
    let mock = repository();
    mock.object().get_by_id(4);
    mock.object().get_by_id(9);

    mock.verify(user_repository::get_by_id)
        .with_argument::<i32>(0)
        .matching(|id| *id == 9)
        .unwrap();

    let err = mock
        .verify(user_repository::get_by_id)
        .with_argument::<i32>(0)
        .matching(|id| *id > 100)
        .unwrap_err();
    assert!(matches!(err, MockError::NoMatchingCall { position: 0, .. }));
}

#[test]
fn test_with_argument_alone_does_not_mark_member_verified() {
    let mock = repository();
    mock.object().get_by_id(7);
    mock.verify(user_repository::get_by_id)
        .with_argument::<i32>(0)
        .matching(|id| *id == 7)
        .unwrap();

    let err = mock.verify_no_other_calls().unwrap_err();
    assert!(matches!(
        err,
        MockError::UnverifiedCalls { ref members } if members == &vec!["get_by_id".to_string()]
    ));

    mock.verify(user_repository::get_by_id).once().unwrap();
    mock.verify_no_other_calls().unwrap();
}

#[test]
fn test_predicate_can_read_the_mock() {
    let mock = repository();
    mock.object().get_by_id(7);

    mock.verify(user_repository::get_by_id)
        .with_argument::<i32>(0)
        .matching(|id| *id == mock.call_count(user_repository::get_by_id).unwrap() as i32 + 6)
        .unwrap();
    mock.verify(user_repository::get_by_id)
        .with_argument::<i32>(0)
        .matching(|_| mock.calls(user_repository::get_by_id).unwrap().len() == 1)
        .unwrap();
}

#[test]
fn test_with_argument_reads_borrowed_parameters_owned() {
    let mock = Mock::of::<dyn UserRepository>().build().unwrap();
    let user = User::new(5, "Ada");
    let _ = mock.object().save_async(&user);

    mock.verify(user_repository::save_async)
        .with_argument::<User>(0)
        .matching(|saved| saved.name == "Ada")
        .unwrap();
}

#[test]
fn test_with_argument_wrong_type_or_position_never_matches() {
    let mock = repository();
    mock.object().get_by_id(4);

    assert!(mock
        .verify(user_repository::get_by_id)
        .with_argument::<i64>(0)
        .matching(|_| true)
        .is_err());
    assert!(mock
        .verify(user_repository::get_by_id)
        .with_argument::<i32>(1)
        .matching(|_| true)
        .is_err());
}

#[test]
fn test_calls_snapshot_keeps_argument_history() {
    let mock = Mock::of::<dyn EmailService>().build().unwrap();
    let _ = mock.object().send_async("a@example.com", "hello", "body");
    let _ = mock.object().send_async("b@example.com", "again", "body");

    let calls = mock.calls(email_service::send_async).unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].get::<String>(0).unwrap(), "a@example.com");
    assert_eq!(calls[1].get::<String>(1).unwrap(), "again");
}
