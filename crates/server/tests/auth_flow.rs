use server::auth::AuthManager;
use server::error::Error;
use server::store;
use tempfile::{tempdir, TempDir};

const SECRET: &str = "test-signing-secret";

async fn setup() -> (TempDir, AuthManager) {
    let dir = tempdir().unwrap();
    let pool = store::init_db(&dir.path().join("test.sqlite"))
        .await
        .unwrap();
    (dir, AuthManager::new(pool, SECRET))
}

#[tokio::test]
async fn register_issues_token_with_matching_claims() {
    let (_dir, auth) = setup().await;

    let (user, token) = auth
        .register(
            "alice".to_string(),
            "a@x.com".to_string(),
            "secret1".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");

    let claims = auth.verify_token(&token).unwrap();
    assert_eq!(claims.id, user.id);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.email, "a@x.com");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let (_dir, auth) = setup().await;

    let err = auth
        .register(String::new(), "a@x.com".to_string(), "secret1".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = auth
        .register("alice".to_string(), String::new(), "secret1".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = auth
        .register("alice".to_string(), "a@x.com".to_string(), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn register_rejects_short_password() {
    let (_dir, auth) = setup().await;

    let err = auth
        .register(
            "alice".to_string(),
            "a@x.com".to_string(),
            "12345".to_string(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // The bound is on characters, not bytes: five characters in eight
    // bytes is still too short
    let err = auth
        .register(
            "bob".to_string(),
            "b@x.com".to_string(),
            "ñoñó1".to_string(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // Exactly six characters is accepted
    auth.register(
        "alice".to_string(),
        "a@x.com".to_string(),
        "123456".to_string(),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn duplicate_email_or_username_is_a_conflict() {
    let (_dir, auth) = setup().await;

    auth.register(
        "alice".to_string(),
        "a@x.com".to_string(),
        "secret1".to_string(),
    )
    .await
    .unwrap();

    // Same email, different username
    let err = auth
        .register(
            "alice2".to_string(),
            "a@x.com".to_string(),
            "secret1".to_string(),
        )
        .await
        .unwrap_err();
    let Error::Conflict(msg_email) = err else {
        panic!("expected Conflict, got {:?}", err);
    };

    // Same username, different email
    let err = auth
        .register(
            "alice".to_string(),
            "a2@x.com".to_string(),
            "secret1".to_string(),
        )
        .await
        .unwrap_err();
    let Error::Conflict(msg_username) = err else {
        panic!("expected Conflict, got {:?}", err);
    };

    // The message does not reveal which column collided
    assert_eq!(msg_email, msg_username);
}

#[tokio::test]
async fn login_returns_fresh_token_for_stored_user() {
    let (_dir, auth) = setup().await;

    let (registered, _) = auth
        .register(
            "alice".to_string(),
            "a@x.com".to_string(),
            "secret1".to_string(),
        )
        .await
        .unwrap();

    let (user, token) = auth
        .login("a@x.com".to_string(), "secret1".to_string())
        .await
        .unwrap();

    assert_eq!(user.id, registered.id);

    let claims = auth.verify_token(&token).unwrap();
    assert_eq!(claims.id, registered.id);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.email, "a@x.com");
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let (_dir, auth) = setup().await;

    auth.register(
        "alice".to_string(),
        "a@x.com".to_string(),
        "secret1".to_string(),
    )
    .await
    .unwrap();

    // Wrong password and unknown email fail identically
    let err = auth
        .login("a@x.com".to_string(), "wrongpass".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::LoginFail));

    let err = auth
        .login("nobody@x.com".to_string(), "secret1".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::LoginFail));

    // Missing fields are a validation error, not an auth error
    let err = auth
        .login(String::new(), "secret1".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let (_dir, auth) = setup().await;

    let (_, token) = auth
        .register(
            "alice".to_string(),
            "a@x.com".to_string(),
            "secret1".to_string(),
        )
        .await
        .unwrap();

    // Mutate a single character of the signature
    let mut tampered: Vec<char> = token.chars().collect();
    let last = tampered.len() - 1;
    tampered[last] = if tampered[last] == 'A' { 'B' } else { 'A' };
    let tampered: String = tampered.into_iter().collect();

    let err = auth.verify_token(&tampered).unwrap_err();
    assert!(matches!(err, Error::AuthFailInvalidToken));

    // Garbage is rejected the same way
    let err = auth.verify_token("not-a-token").unwrap_err();
    assert!(matches!(err, Error::AuthFailInvalidToken));
}

#[tokio::test]
async fn token_signed_with_other_key_is_rejected() {
    let (_dir, auth) = setup().await;
    let dir2 = tempdir().unwrap();
    let pool2 = store::init_db(&dir2.path().join("other.sqlite"))
        .await
        .unwrap();
    let other = AuthManager::new(pool2, "a-different-secret");

    let (_, token) = auth
        .register(
            "alice".to_string(),
            "a@x.com".to_string(),
            "secret1".to_string(),
        )
        .await
        .unwrap();

    let err = other.verify_token(&token).unwrap_err();
    assert!(matches!(err, Error::AuthFailInvalidToken));
}

#[tokio::test]
async fn expired_token_is_rejected() {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use server::models::Claims;

    let (_dir, auth) = setup().await;

    // Signed with the right key but two hours past expiry, well beyond
    // the validation leeway
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        id: 1,
        username: "alice".to_string(),
        email: "a@x.com".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let err = auth.verify_token(&token).unwrap_err();
    assert!(matches!(err, Error::AuthFailInvalidToken));
}
