use super::*;

/// Tests the stored user id survives an id cycle and disappears on flush.
///
/// Expected: Some(id) after set and cycle, None after flush
#[tokio::test]
async fn keeps_user_across_cycle_and_forgets_on_flush() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let auth_session = AuthSession::new(session);
    assert!(!auth_session.is_authenticated().await?);

    auth_session.set_user_id(7).await?;
    auth_session.cycle_id().await?;
    assert_eq!(auth_session.get_user_id().await?, Some(7));

    auth_session.flush().await?;
    assert_eq!(auth_session.get_user_id().await?, None);

    Ok(())
}
