use crate::fixtures::*;
use litmock::Mock;

#[tokio::test]
async fn test_setup_async_boxed_future_returns_configured_value() {
    let mock = Mock::of::<dyn UserRepository>()
        .setup_async(user_repository::save_async, true)
        .build()
        .unwrap();

    assert!(mock.object().save_async(&User::default()).await);
}

#[tokio::test]
async fn test_setup_async_ready_future_returns_configured_value() {
    let expected = User::new(1, "Test");
    let mock = Mock::of::<dyn AsyncRepository>()
        .setup_async(async_repository::get_async, expected.clone())
        .build()
        .unwrap();

    assert_eq!(mock.object().get_async(1).await, expected);
}

#[tokio::test]
async fn test_async_fallback_is_completed_zero_value() {
    let mock = Mock::of::<dyn UserRepository>().build().unwrap();

    assert!(!mock.object().save_async(&User::default()).await);
    assert!(mock.object().get_all_async().await.is_empty());

    let repo = Mock::of::<dyn AsyncRepository>().build().unwrap();
    assert_eq!(repo.object().get_async(3).await, User::default());
}

#[tokio::test]
async fn test_async_member_verifies_like_sync() {
    let mock = Mock::of::<dyn UserRepository>()
        .setup_async(user_repository::save_async, true)
        .build()
        .unwrap();

    mock.object().save_async(&User::default()).await;
    mock.verify(user_repository::save_async).once().unwrap();
}

#[tokio::test]
async fn test_async_values_are_fresh_on_every_call() {
    let users = vec![User::new(1, "a"), User::new(2, "b")];
    let mock = Mock::of::<dyn UserRepository>()
        .setup_async(user_repository::get_all_async, users.clone())
        .build()
        .unwrap();

    let first = mock.object().get_all_async().await;
    let second = mock.object().get_all_async().await;
    assert_eq!(first, users);
    assert_eq!(second, users);
}

#[tokio::test]
async fn test_substitute_moves_into_spawned_task() {
    let mock = Mock::of::<dyn EmailService>()
        .setup_async(email_service::send_bulk_async, true)
        .build()
        .unwrap();
    let service = mock.shared();

    let sent = tokio::spawn(async move {
        service
            .send_bulk_async(vec!["a@example.com".to_string()], "news")
            .await
    })
    .await
    .unwrap();

    assert!(sent);
    mock.verify(email_service::send_bulk_async)
        .with_argument::<Vec<String>>(0)
        .matching(|recipients| recipients.len() == 1)
        .unwrap();
}
