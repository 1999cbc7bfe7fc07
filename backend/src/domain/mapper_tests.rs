//! Tests for the namespace mapping service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockAuthenticator, MockNamespaceCreationPolicy, MockNamespaceStore};
use crate::domain::{ErrorKind, Validator};
use rstest::{fixture, rstest};

type MockMapper = IdMapper<MockAuthenticator, MockNamespaceStore, MockNamespaceCreationPolicy>;

#[fixture]
fn validator() -> Validator {
    Validator::default()
}

fn make_mapper(
    authenticator: MockAuthenticator,
    store: MockNamespaceStore,
    policy: MockNamespaceCreationPolicy,
) -> MockMapper {
    IdMapper::new(Arc::new(authenticator), Arc::new(store), Arc::new(policy))
}

fn user(validator: &Validator, authsource: &str, name: &str) -> User {
    User::try_from_strings(validator, authsource, name).expect("valid user")
}

fn namespace_id(validator: &Validator, raw: &str) -> NamespaceId {
    NamespaceId::new(validator, raw).expect("valid namespace id")
}

fn credential(validator: &Validator, authsource: &str, token: &str) -> Credential {
    Credential::new(
        AuthsourceId::new(validator, authsource).expect("valid authsource"),
        Token::new(validator, token).expect("valid token"),
    )
}

fn authenticating_as(user: User) -> MockAuthenticator {
    let mut authenticator = MockAuthenticator::new();
    authenticator
        .expect_authenticate()
        .times(1)
        .returning(move |_, _| Ok(user.clone()));
    authenticator
}

fn storing(namespace: Namespace) -> MockNamespaceStore {
    let mut store = MockNamespaceStore::new();
    store
        .expect_get()
        .times(1)
        .return_once(move |_| Ok(Some(namespace)));
    store
}

#[rstest]
#[tokio::test]
async fn public_namespaces_are_read_without_authenticating(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let namespace = Namespace::new(
        id.clone(),
        true,
        [user(&validator, "bar", "baz"), user(&validator, "bag", "bat")],
    );
    let mut authenticator = MockAuthenticator::new();
    authenticator.expect_authenticate().never();

    let mapper = make_mapper(
        authenticator,
        storing(namespace.clone()),
        MockNamespaceCreationPolicy::new(),
    );
    let bogus = credential(&validator, "as", "not_a_real_token");

    let anonymous = mapper.get_namespace(&id, None).await.expect("public read");
    assert_eq!(anonymous, namespace);
    assert_eq!(anonymous.authorized_users().len(), 2);

    let mut store = MockNamespaceStore::new();
    store
        .expect_get()
        .return_once(move |_| Ok(Some(namespace)));
    let mut authenticator = MockAuthenticator::new();
    authenticator.expect_authenticate().never();
    let mapper = make_mapper(authenticator, store, MockNamespaceCreationPolicy::new());
    assert!(mapper.get_namespace(&id, Some(bogus)).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn missing_namespaces_are_reported(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let mut store = MockNamespaceStore::new();
    store.expect_get().times(1).return_once(|_| Ok(None));

    let mapper = make_mapper(
        MockAuthenticator::new(),
        store,
        MockNamespaceCreationPolicy::new(),
    );
    let err = mapper.get_namespace(&id, None).await.expect_err("absent");
    assert_eq!(err.kind(), ErrorKind::NoSuchNamespace);
    assert_eq!(err.message(), "50010 No such namespace: foo");
}

#[rstest]
#[tokio::test]
async fn private_namespaces_require_a_credential(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let namespace = Namespace::new(id.clone(), false, [user(&validator, "as", "ada")]);

    let mapper = make_mapper(
        MockAuthenticator::new(),
        storing(namespace),
        MockNamespaceCreationPolicy::new(),
    );
    let err = mapper.get_namespace(&id, None).await.expect_err("no token");
    assert_eq!(err.kind(), ErrorKind::NoToken);
}

#[rstest]
#[tokio::test]
async fn private_namespaces_are_readable_by_members(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let member = user(&validator, "as", "ada");
    let namespace = Namespace::new(id.clone(), false, [member.clone()]);

    let mapper = make_mapper(
        authenticating_as(member),
        storing(namespace.clone()),
        MockNamespaceCreationPolicy::new(),
    );
    let found = mapper
        .get_namespace(&id, Some(credential(&validator, "as", "tokey")))
        .await
        .expect("member read");
    assert_eq!(found, namespace);
}

#[rstest]
#[tokio::test]
async fn private_namespaces_refuse_non_members(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let namespace = Namespace::new(id.clone(), false, [user(&validator, "as", "ada")]);

    let mapper = make_mapper(
        authenticating_as(user(&validator, "as", "bob")),
        storing(namespace),
        MockNamespaceCreationPolicy::new(),
    );
    let err = mapper
        .get_namespace(&id, Some(credential(&validator, "as", "tokey")))
        .await
        .expect_err("non member");
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(
        err.message(),
        "20000 Unauthorized: User as/bob may not read namespace foo"
    );
}

#[rstest]
#[case(AuthenticationError::invalid_token(), ErrorKind::InvalidToken)]
#[case(AuthenticationError::unknown_authsource("as"), ErrorKind::InvalidToken)]
#[case(AuthenticationError::unavailable("timeout"), ErrorKind::Internal)]
#[tokio::test]
async fn authentication_failures_are_classified(
    validator: Validator,
    #[case] failure: AuthenticationError,
    #[case] expected: ErrorKind,
) {
    let id = namespace_id(&validator, "foo");
    let namespace = Namespace::new(id.clone(), false, [user(&validator, "as", "ada")]);
    let mut authenticator = MockAuthenticator::new();
    authenticator
        .expect_authenticate()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let mapper = make_mapper(
        authenticator,
        storing(namespace),
        MockNamespaceCreationPolicy::new(),
    );
    let err = mapper
        .get_namespace(&id, Some(credential(&validator, "as", "tokey")))
        .await
        .expect_err("authentication fails");
    assert_eq!(err.kind(), expected);
}

#[rstest]
#[tokio::test]
async fn foreign_users_from_an_authsource_are_faults(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let mut policy = MockNamespaceCreationPolicy::new();
    policy.expect_can_create_namespace().never();
    let mut store = MockNamespaceStore::new();
    store.expect_create().never();

    let mapper = make_mapper(
        authenticating_as(user(&validator, "other", "ada")),
        store,
        policy,
    );
    let creds = credential(&validator, "as", "tokey");
    let err = mapper
        .create_namespace(creds.authsource(), creds.token(), &id)
        .await
        .expect_err("mismatched authsource");
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[rstest]
#[tokio::test]
async fn create_stores_a_private_namespace_owned_by_the_caller(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let creator = user(&validator, "as", "ada");
    let expected = Namespace::created_by(id.clone(), creator.clone());

    let mut policy = MockNamespaceCreationPolicy::new();
    policy
        .expect_can_create_namespace()
        .times(1)
        .return_const(true);
    let mut store = MockNamespaceStore::new();
    store
        .expect_create()
        .withf(move |namespace| *namespace == expected)
        .times(1)
        .return_once(|_| Ok(()));

    let mapper = make_mapper(authenticating_as(creator), store, policy);
    let creds = credential(&validator, "as", "tokey");
    mapper
        .create_namespace(creds.authsource(), creds.token(), &id)
        .await
        .expect("created");
}

#[rstest]
#[tokio::test]
async fn create_refuses_callers_without_creation_authority(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let mut policy = MockNamespaceCreationPolicy::new();
    policy
        .expect_can_create_namespace()
        .times(1)
        .return_const(false);
    let mut store = MockNamespaceStore::new();
    store.expect_create().never();

    let mapper = make_mapper(authenticating_as(user(&validator, "as", "ada")), store, policy);
    let creds = credential(&validator, "as", "tokey");
    let err = mapper
        .create_namespace(creds.authsource(), creds.token(), &id)
        .await
        .expect_err("unauthorized");
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(
        err.message(),
        "20000 Unauthorized: User as/ada may not create namespaces"
    );
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_tokens_before_consulting_the_policy(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let mut authenticator = MockAuthenticator::new();
    authenticator
        .expect_authenticate()
        .times(1)
        .return_once(|_, _| Err(AuthenticationError::invalid_token()));
    let mut policy = MockNamespaceCreationPolicy::new();
    policy.expect_can_create_namespace().never();
    let mut store = MockNamespaceStore::new();
    store.expect_create().never();

    let mapper = make_mapper(authenticator, store, policy);
    let creds = credential(&validator, "as", "tokey");
    let err = mapper
        .create_namespace(creds.authsource(), creds.token(), &id)
        .await
        .expect_err("invalid token");
    assert_eq!(err.message(), "10020 Invalid token");
}

#[rstest]
#[case(NamespaceStoreError::already_exists("foo"), ErrorKind::NamespaceExists)]
#[case(NamespaceStoreError::connection("refused"), ErrorKind::Internal)]
#[case(NamespaceStoreError::query("syntax"), ErrorKind::Internal)]
#[tokio::test]
async fn create_classifies_store_failures(
    validator: Validator,
    #[case] failure: NamespaceStoreError,
    #[case] expected: ErrorKind,
) {
    let id = namespace_id(&validator, "foo");
    let mut policy = MockNamespaceCreationPolicy::new();
    policy.expect_can_create_namespace().return_const(true);
    let mut store = MockNamespaceStore::new();
    store
        .expect_create()
        .times(1)
        .return_once(move |_| Err(failure));

    let mapper = make_mapper(authenticating_as(user(&validator, "as", "ada")), store, policy);
    let creds = credential(&validator, "as", "tokey");
    let err = mapper
        .create_namespace(creds.authsource(), creds.token(), &id)
        .await
        .expect_err("store failure");
    assert_eq!(err.kind(), expected);
}

#[rstest]
#[tokio::test]
async fn read_store_faults_are_unclassified(validator: Validator) {
    let id = namespace_id(&validator, "foo");
    let mut store = MockNamespaceStore::new();
    store
        .expect_get()
        .times(1)
        .return_once(|_| Err(NamespaceStoreError::connection("refused")));

    let mapper = make_mapper(
        MockAuthenticator::new(),
        store,
        MockNamespaceCreationPolicy::new(),
    );
    let err = mapper.get_namespace(&id, None).await.expect_err("fault");
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.app_code(), None);
    assert_eq!(err.message(), "namespace store unavailable: refused");
}
