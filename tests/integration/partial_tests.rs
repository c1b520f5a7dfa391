use crate::fixtures::*;
use litmock::{caught_error, Mock, MockError};
use std::panic::{self, AssertUnwindSafe};

#[test]
fn test_partial_mock_returns_configured_member() {
    let expected = User::new(1, "Test");
    let mock = Mock::partial::<dyn UserRepository>()
        .only(user_repository::get_by_id, expected.clone())
        .build()
        .unwrap();

    assert_eq!(mock.object().get_by_id(1), expected);
}

#[test]
fn test_unconfigured_member_raises_not_implemented() {
    let mock = Mock::partial::<dyn UserRepository>()
        .only(user_repository::get_by_id, User::new(1, "Test"))
        .build()
        .unwrap();

    let payload = panic::catch_unwind(AssertUnwindSafe(|| mock.object().delete(1))).unwrap_err();
    match caught_error(payload.as_ref()) {
        Some(MockError::NotImplemented { owner, member }) => {
            assert_eq!(owner, "UserRepository");
            assert_eq!(member, "delete");
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[test]
fn test_unconfigured_call_is_still_recorded() {
    let mock = Mock::partial::<dyn UserRepository>().build().unwrap();

    for _ in 0..2 {
        let result = panic::catch_unwind(AssertUnwindSafe(|| mock.object().count()));
        assert!(result.is_err());
    }
    mock.verify(user_repository::count).times(2).unwrap();
}

#[test]
fn test_mock_keeps_working_after_a_raise() {
    let mock = Mock::partial::<dyn UserRepository>()
        .only(user_repository::count, 3)
        .build()
        .unwrap();

    let _ = panic::catch_unwind(AssertUnwindSafe(|| mock.object().delete(1)));
    assert_eq!(mock.object().count(), 3);
    mock.verify(user_repository::delete).once().unwrap();
    mock.verify(user_repository::count).once().unwrap();
    mock.verify_no_other_calls().unwrap();
}
