//! Signup and login flow against a real embedded database

use ems_server::core::{Config, ServerState};
use ems_server::db::repository::AccountRepository;
use ems_server::services::{AccountService, SignupInput};
use ems_server::utils::AppError;
use tempfile::TempDir;

async fn test_state() -> (ServerState, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = Config::with_overrides(dir.path(), 0);
    let state = ServerState::initialize(config).await.expect("init state");
    (state, dir)
}

fn service(state: &ServerState) -> AccountService {
    AccountService::new(state.db.clone(), state.jwt.clone())
}

fn input(username: &str, email: &str, password: &str) -> SignupInput {
    SignupInput {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn signup_then_login_round_trip() {
    let (state, _dir) = test_state().await;
    let accounts = service(&state);

    let (token, account) = accounts
        .signup(input("ann", "Ann@Example.com", "secret1"))
        .await
        .expect("signup succeeds");
    assert!(!token.is_empty());
    assert_eq!(account.email, "ann@example.com");

    let claims = state.jwt.verify(&token).expect("token verifies");
    assert_eq!(claims.sub, account.id.to_string());

    // Login works by username and by (case-insensitive) email
    let (_, by_username) = accounts.login("ann", "secret1").await.expect("by username");
    assert_eq!(by_username.id, account.id);

    let (_, by_email) = accounts
        .login("ANN@EXAMPLE.COM", "secret1")
        .await
        .expect("by email");
    assert_eq!(by_email.id, account.id);
}

#[tokio::test]
async fn rejected_signup_creates_no_account() {
    let (state, _dir) = test_state().await;
    let accounts = service(&state);

    let err = accounts
        .signup(input("bob", "bob@example.com", "abc"))
        .await
        .unwrap_err();
    match err {
        AppError::Validation(messages) => {
            assert_eq!(messages, vec!["Password must be at least 6 characters"])
        }
        other => panic!("expected Validation, got {other:?}"),
    }

    let repo = AccountRepository::new(state.db.clone());
    assert!(repo.find_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let (state, _dir) = test_state().await;
    let accounts = service(&state);

    accounts
        .signup(input("ann", "Ann@Example.com", "secret1"))
        .await
        .expect("first signup");

    let err = accounts
        .signup(input("bob", "ANN@example.COM", "secret2"))
        .await
        .unwrap_err();
    match err {
        AppError::AlreadyExists(message) => assert_eq!(message, "Email already registered"),
        other => panic!("expected AlreadyExists, got {other:?}"),
    }

    // Only the first account made it into storage
    let repo = AccountRepository::new(state.db.clone());
    assert!(repo.find_by_username("ann").await.unwrap().is_some());
    assert!(repo.find_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let (state, _dir) = test_state().await;
    let accounts = service(&state);

    accounts
        .signup(input("ann", "ann@example.com", "secret1"))
        .await
        .expect("first signup");

    let err = accounts
        .signup(input("ann", "other@example.com", "secret2"))
        .await
        .unwrap_err();
    match err {
        AppError::AlreadyExists(message) => assert_eq!(message, "Username already registered"),
        other => panic!("expected AlreadyExists, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_password_and_unknown_account_answer_identically() {
    let (state, _dir) = test_state().await;
    let accounts = service(&state);

    accounts
        .signup(input("ann", "ann@example.com", "secret1"))
        .await
        .expect("signup");

    let wrong_password = accounts.login("ann", "wrong-password").await.unwrap_err();
    let unknown_account = accounts.login("nobody", "secret1").await.unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_account, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_account.to_string());
}

#[tokio::test]
async fn racing_duplicate_signups_produce_exactly_one_account() {
    let (state, _dir) = test_state().await;
    let first = service(&state);
    let second = service(&state);

    let (a, b) = tokio::join!(
        first.signup(input("race", "race@example.com", "secret1")),
        second.signup(input("race", "race@example.com", "secret2")),
    );

    // Whichever ordering the scheduler picks, exactly one wins
    assert_eq!(
        a.is_ok() as u8 + b.is_ok() as u8,
        1,
        "one signup must win, one must lose"
    );
    for outcome in [a, b] {
        if let Err(err) = outcome {
            assert!(matches!(err, AppError::AlreadyExists(_)), "got {err:?}");
        }
    }
}
