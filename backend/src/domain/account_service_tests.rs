//! Behaviour of the password account service against mocked ports.

use std::sync::Arc;

use chrono::TimeDelta;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then};

use super::*;
use crate::domain::ports::{MockAccountService, MockPasswordHasher, MockTokenCodec, MockUserRepository};
use crate::domain::{TokenClaims, UserAccount, UserId, Username};
use crate::test_support::{MutableClock, fixture_now};

type Service = PasswordAccountService<MockUserRepository, MockPasswordHasher, MockTokenCodec>;

fn account(id: i64, name: &str) -> UserAccount {
    UserAccount {
        user: User::new(UserId::new(id), Username::new(name).expect("valid username")),
        password_hash: PasswordHash::new("$argon2id$stored"),
    }
}

fn live_claims(subject: &str) -> TokenClaims {
    TokenClaims {
        subject: subject.to_owned(),
        issued_at: fixture_now(),
        expires_at: fixture_now() + TimeDelta::hours(24),
    }
}

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::default())
}

fn service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenCodec,
    clock: Arc<MutableClock>,
) -> Service {
    PasswordAccountService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens), clock)
}

#[rstest]
#[tokio::test]
async fn signup_hashes_and_stores_the_account(clock: Arc<MutableClock>) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|new| new.username.as_str() == "alice" && new.password_hash.as_str() == "hashed")
        .returning(|_| Ok(account(1, "alice")));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|plain| plain == "secret1")
        .returning(|_| Ok(PasswordHash::new("hashed")));

    let svc = service(users, hasher, MockTokenCodec::new(), clock);
    let creds = SignupCredentials::try_from_parts("alice", "secret1").expect("valid");
    let user = svc.signup(&creds).await.expect("signup succeeds");
    assert_eq!(user.username().as_str(), "alice");
}

#[rstest]
#[case::found_before_insert(true)]
#[case::rejected_by_store(false)]
#[tokio::test]
async fn signup_duplicate_is_conflict(#[case] precheck_hits: bool, clock: Arc<MutableClock>) {
    let mut users = MockUserRepository::new();
    let mut hasher = MockPasswordHasher::new();
    if precheck_hits {
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(account(1, "alice"))));
        hasher.expect_hash().never();
    } else {
        users.expect_find_by_username().returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|_| Err(UserPersistenceError::duplicate_username("alice")));
        hasher
            .expect_hash()
            .returning(|_| Ok(PasswordHash::new("hashed")));
    }

    let svc = service(users, hasher, MockTokenCodec::new(), clock);
    let creds = SignupCredentials::try_from_parts("alice", "secret1").expect("valid");
    let err = svc.signup(&creds).await.expect_err("duplicate rejected");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "Username already registered");
}

#[rstest]
#[tokio::test]
async fn login_issues_token_at_clock_time(clock: Arc<MutableClock>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Ok(Some(account(1, "alice"))));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(true));
    let mut tokens = MockTokenCodec::new();
    tokens
        .expect_issue()
        .withf(|subject, issued_at| subject == "alice" && *issued_at == fixture_now())
        .returning(|_, at| Ok(AccessToken::new("signed", at + TimeDelta::hours(24))));

    let svc = service(users, hasher, tokens, clock);
    let creds = LoginCredentials::try_from_parts("alice", "secret1").expect("valid");
    let token = svc.login(&creds).await.expect("login succeeds");
    assert_eq!(token.as_str(), "signed");
}

#[given("a login attempt for an unknown user")]
fn unknown_user_attempt() -> (MockUserRepository, MockPasswordHasher) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok(PasswordHash::new("$argon2id$decoy")));
    hasher
        .expect_verify()
        .times(1)
        .withf(|plain, hash| plain == "wrong-pass" && hash.as_str() == "$argon2id$decoy")
        .returning(|_, _| Ok(false));
    (users, hasher)
}

#[given("a login attempt with the wrong password")]
fn wrong_password_attempt() -> (MockUserRepository, MockPasswordHasher) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Ok(Some(account(1, "alice"))));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(false));
    (users, hasher)
}

async fn check_credentials(
    attempt: (MockUserRepository, MockPasswordHasher),
    clock: Arc<MutableClock>,
) -> Error {
    let (users, hasher) = attempt;
    let mut tokens = MockTokenCodec::new();
    tokens.expect_issue().never();
    let svc = service(users, hasher, tokens, clock);
    let creds = LoginCredentials::try_from_parts("alice", "wrong-pass").expect("valid");
    svc.login(&creds).await.expect_err("login must fail")
}

#[then("the failure does not reveal which part was wrong")]
fn the_failure_is_generic(err: Error) {
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "Incorrect username or password");
}

#[rstest]
#[tokio::test]
async fn login_failures_are_indistinguishable(clock: Arc<MutableClock>) {
    let unknown = check_credentials(unknown_user_attempt(), Arc::clone(&clock)).await;
    let wrong = check_credentials(wrong_password_attempt(), clock).await;
    assert_eq!(unknown, wrong);
    the_failure_is_generic(unknown);
    the_failure_is_generic(wrong);
}

#[rstest]
#[tokio::test]
async fn unknown_users_reuse_one_decoy_hash(clock: Arc<MutableClock>) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok(PasswordHash::new("$argon2id$decoy")));
    hasher.expect_verify().times(3).returning(|_, _| Ok(false));

    let svc = service(users, hasher, MockTokenCodec::new(), clock);
    for name in ["nobody", "ghost", "nobody"] {
        let creds = LoginCredentials::try_from_parts(name, "secret1").expect("valid");
        let err = svc.login(&creds).await.expect_err("unknown user");
        assert_eq!(err.message(), "Incorrect username or password");
    }
}

#[rstest]
#[tokio::test]
async fn authenticate_resolves_live_token(clock: Arc<MutableClock>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .withf(|name| name == "alice")
        .returning(|_| Ok(Some(account(1, "alice"))));
    let mut tokens = MockTokenCodec::new();
    tokens
        .expect_decode()
        .returning(|_| Ok(live_claims("alice")));

    let svc = service(users, MockPasswordHasher::new(), tokens, clock);
    let user = svc.authenticate("signed").await.expect("token accepted");
    assert_eq!(user.id(), UserId::new(1));
}

#[rstest]
#[tokio::test]
async fn authenticate_rejects_token_at_expiry(clock: Arc<MutableClock>) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().never();
    let mut tokens = MockTokenCodec::new();
    tokens
        .expect_decode()
        .returning(|_| Ok(live_claims("alice")));

    clock.advance(TimeDelta::hours(24));
    let svc = service(users, MockPasswordHasher::new(), tokens, clock);
    let err = svc.authenticate("signed").await.expect_err("expired");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case::bad_signature(Err(TokenError::invalid("signature")), None)]
#[case::deleted_user(Ok(live_claims("ghost")), Some(None))]
#[tokio::test]
async fn authenticate_rejects_unusable_tokens(
    #[case] decoded: Result<TokenClaims, TokenError>,
    #[case] lookup: Option<Option<UserAccount>>,
    clock: Arc<MutableClock>,
) {
    let mut users = MockUserRepository::new();
    match lookup {
        Some(found) => {
            users
                .expect_find_by_username()
                .return_once(move |_| Ok(found));
        }
        None => {
            users.expect_find_by_username().never();
        }
    }
    let mut tokens = MockTokenCodec::new();
    tokens.expect_decode().return_once(move |_| decoded);

    let svc = service(users, MockPasswordHasher::new(), tokens, clock);
    let err = svc.authenticate("whatever").await.expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "Could not validate credentials");
}

#[rstest]
#[tokio::test]
async fn store_outage_is_service_unavailable(clock: Arc<MutableClock>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Err(UserPersistenceError::connection("refused")));
    let svc = service(users, MockPasswordHasher::new(), MockTokenCodec::new(), clock);
    let creds = LoginCredentials::try_from_parts("alice", "pw").expect("valid");
    let err = svc.login(&creds).await.expect_err("store down");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

fn accounts_returning(result: Result<User, Error>) -> MockAccountService {
    let mut accounts = MockAccountService::new();
    accounts.expect_authenticate().return_once(move |_| result);
    accounts
}

#[rstest]
#[tokio::test]
async fn optional_resolution_degrades_to_anonymous() {
    let none = MockAccountService::new();
    assert_eq!(
        resolve_optional(&none, None).await.expect("resolves"),
        Identity::Anonymous
    );

    let rejected = accounts_returning(Err(Error::unauthorized("bad")));
    assert_eq!(
        resolve_optional(&rejected, Some("tok")).await.expect("resolves"),
        Identity::Anonymous
    );

    let alice = account(1, "alice").user;
    let accepted = accounts_returning(Ok(alice.clone()));
    assert_eq!(
        resolve_optional(&accepted, Some("tok")).await.expect("resolves"),
        Identity::Identified(alice)
    );
}

#[rstest]
#[tokio::test]
async fn optional_resolution_propagates_outages() {
    let down = accounts_returning(Err(Error::service_unavailable("down")));
    let err = resolve_optional(&down, Some("tok")).await.expect_err("outage");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn mandatory_resolution_requires_a_token() {
    let accounts = MockAccountService::new();
    let err = resolve_mandatory(&accounts, None).await.expect_err("missing");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "Not authenticated");
}
