use std::sync::Arc;
use std::thread;

use proptest::prelude::*;

use realmkit_auth::{
    AuthenticationError, HashSettings, InMemoryRealmSource, MemoryOrg, MemoryUser, PermissionInfo,
    RealmAdapter, RealmPrincipal, SystemUser, UsernamePasswordToken,
};
use realmkit_core::{DescribableEnum, describable_enum};

describable_enum! {
    /// Roles used by the document service these scenarios model.
    pub enum DocRole: &'static str {
        Admin => ("ADMIN", "Administrator"),
        Editor => ("EDITOR", "Edits documents"),
        Viewer => ("VIEWER", "Reads documents"),
    }
}

type Realm = RealmAdapter<InMemoryRealmSource<DocRole>>;

fn realm_with(users: Vec<MemoryUser>) -> Realm {
    let source = InMemoryRealmSource::new(HashSettings::new("SHA-256", 0));
    for user in users {
        source.add_user(user).unwrap();
    }
    RealmAdapter::new(source).unwrap()
}

fn token(login: &str) -> UsernamePasswordToken {
    UsernamePasswordToken::new(login, "irrelevant")
}

#[test]
fn alice_bob_carol_authentication_records() {
    realmkit_observability::init();

    let realm = realm_with(vec![
        MemoryUser::new("alice", "h1").with_salt("s1"),
        MemoryUser::new("bob", "h2"),
    ]);

    let alice = realm.authentication_info(&token("alice")).unwrap().unwrap();
    assert_eq!(alice.principal.login_name(), "alice");
    assert_eq!(alice.credentials, "h1");
    assert_eq!(alice.credentials_salt.as_deref(), Some(&b"s1"[..]));
    assert_eq!(alice.realm_name, "memory");

    let bob = realm.authentication_info(&token("bob")).unwrap().unwrap();
    assert_eq!(bob.principal.system_user().login_name(), "bob");
    assert_eq!(bob.credentials, "h2");
    assert_eq!(bob.credentials_salt, None);

    assert!(realm.authentication_info(&token("carol")).unwrap().is_none());
}

#[test]
fn whitespace_salt_is_treated_as_absent() {
    let realm = realm_with(vec![MemoryUser::new("dave", "h3").with_salt("   ")]);
    let info = realm.authentication_info(&token("dave")).unwrap().unwrap();
    assert_eq!(info.credentials_salt, None);
}

#[test]
fn alice_authorization_without_org() {
    let source = InMemoryRealmSource::new(HashSettings::default());
    let alice = source.add_user(MemoryUser::new("alice", "h1").with_salt("s1")).unwrap();
    source.grant_role(alice, None, DocRole::Admin).unwrap();
    source.grant_role(alice, None, DocRole::Editor).unwrap();
    source
        .grant_permission(alice, None, PermissionInfo::new("doc:read"))
        .unwrap();
    let realm = RealmAdapter::new(source).unwrap();

    let principal = realm
        .authentication_info(&token("alice"))
        .unwrap()
        .unwrap()
        .principal;
    let info = realm.authorization_info(&principal).unwrap();

    assert_eq!(info.sorted_roles(), vec!["ADMIN", "EDITOR"]);
    assert_eq!(info.sorted_permissions(), vec!["doc:read"]);
}

#[test]
fn user_without_grants_gets_empty_sets() {
    let realm = realm_with(vec![MemoryUser::new("bob", "h2")]);
    let principal = realm.authentication_info(&token("bob")).unwrap().unwrap().principal;

    let info = realm.authorization_info(&principal).unwrap();
    assert!(info.roles.is_empty());
    assert!(info.permissions.is_empty());
}

#[test]
fn org_scoped_principal_sees_org_grants_only() {
    let source = InMemoryRealmSource::new(HashSettings::default());
    let alice = source.add_user(MemoryUser::new("alice", "h1")).unwrap();
    let north = source.add_org(MemoryOrg::new("north")).unwrap();
    source.grant_role(alice, None, DocRole::Viewer).unwrap();
    source.grant_role(alice, Some(north), DocRole::Editor).unwrap();
    source
        .grant_permission(alice, Some(north), PermissionInfo::new("doc:*"))
        .unwrap();
    let realm = RealmAdapter::new(source).unwrap();

    let global = realm.authentication_info(&token("alice")).unwrap().unwrap().principal;
    let scoped = global.with_org(north);

    let global_info = realm.authorization_info(&global).unwrap();
    assert_eq!(global_info.sorted_roles(), vec!["VIEWER"]);
    assert!(!global_info.is_permitted(&PermissionInfo::new("doc:write")));

    let scoped_info = realm.authorization_info(&scoped).unwrap();
    assert_eq!(scoped_info.sorted_roles(), vec!["EDITOR"]);
    assert!(scoped_info.is_permitted(&PermissionInfo::new("doc:write")));
}

#[test]
fn full_login_round_trip() {
    let settings = HashSettings::new("SHA-512", 3);
    let matcher = realmkit_auth::HashedCredentialsMatcher::from_settings(&settings).unwrap();
    let stored = matcher.hash_credentials(b"correct horse", Some(b"salt-9"));

    let source = InMemoryRealmSource::<DocRole>::new(settings);
    source
        .add_user(MemoryUser::new("erin", stored).with_salt("salt-9"))
        .unwrap();
    let realm = RealmAdapter::new(source).unwrap();

    let ok = realm.authenticate(&UsernamePasswordToken::new("erin", "correct horse"));
    assert!(ok.is_ok());

    let bad = realm.authenticate(&UsernamePasswordToken::new("erin", "battery staple"));
    assert!(matches!(bad, Err(AuthenticationError::IncorrectCredentials)));

    let unknown = realm.authenticate(&UsernamePasswordToken::new("frank", "correct horse"));
    assert!(matches!(unknown, Err(AuthenticationError::UnknownAccount)));
}

#[test]
fn default_iterations_apply_when_unconfigured() {
    let realm = realm_with(vec![]);
    assert_eq!(realm.matcher().iterations(), 1024);
}

#[test]
fn concurrent_logins_share_one_adapter() {
    let settings = HashSettings::new("SHA-256", 8);
    let matcher = realmkit_auth::HashedCredentialsMatcher::from_settings(&settings).unwrap();
    let source = InMemoryRealmSource::<DocRole>::new(settings);
    for n in 0..8 {
        let password = format!("pw-{n}");
        let salt = format!("salt-{n}");
        let stored = matcher.hash_credentials(password.as_bytes(), Some(salt.as_bytes()));
        source
            .add_user(MemoryUser::new(format!("user-{n}"), stored).with_salt(salt))
            .unwrap();
    }
    let realm = Arc::new(RealmAdapter::new(source).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let realm = Arc::clone(&realm);
            thread::spawn(move || {
                let token = UsernamePasswordToken::new(format!("user-{n}"), format!("pw-{n}"));
                realm.authenticate(&token).is_ok()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Any login name that was never registered yields no record.
    #[test]
    fn unknown_login_names_yield_no_record(login in "[a-z]{1,12}") {
        prop_assume!(login != "alice");
        let realm = realm_with(vec![MemoryUser::new("alice", "h1")]);
        prop_assert!(realm.authentication_info(&token(&login)).unwrap().is_none());
    }

    /// Non-blank salts reach the record byte-for-byte.
    #[test]
    fn non_blank_salt_is_carried_unchanged(salt in "\\PC*[^\\s]\\PC*") {
        let realm = realm_with(vec![MemoryUser::new("alice", "h1").with_salt(salt.clone())]);
        let info = realm.authentication_info(&token("alice")).unwrap().unwrap();
        prop_assert_eq!(info.credentials_salt, Some(salt.into_bytes()));
    }

    /// The role set is exactly the set of granted role values.
    #[test]
    fn role_set_is_exactly_granted_values(picks in prop::collection::vec(0usize..3, 0..12)) {
        let source = InMemoryRealmSource::new(HashSettings::default());
        let alice = source.add_user(MemoryUser::new("alice", "h1")).unwrap();
        let roles = [DocRole::Admin, DocRole::Editor, DocRole::Viewer];
        for &idx in &picks {
            source.grant_role(alice, None, roles[idx]).unwrap();
        }
        let realm = RealmAdapter::new(source).unwrap();
        let principal = realm.authentication_info(&token("alice")).unwrap().unwrap().principal;

        let info = realm.authorization_info(&principal).unwrap();

        let mut expected: Vec<&str> = picks.iter().map(|&idx| roles[idx].value()).collect();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(info.sorted_roles(), expected);
    }

    /// The permission set is exactly the set of granted permissions.
    #[test]
    fn permission_set_is_exactly_granted_values(
        picks in prop::collection::vec(0usize..4, 0..12)
    ) {
        let source = InMemoryRealmSource::<DocRole>::new(HashSettings::default());
        let alice = source.add_user(MemoryUser::new("alice", "h1")).unwrap();
        let grants = ["doc:read", "doc:write", "invoice:*", "*"];
        for &idx in &picks {
            source
                .grant_permission(alice, None, PermissionInfo::new(grants[idx]))
                .unwrap();
        }
        let realm = RealmAdapter::new(source).unwrap();
        let principal = realm.authentication_info(&token("alice")).unwrap().unwrap().principal;

        let info = realm.authorization_info(&principal).unwrap();

        let mut expected: Vec<&str> = picks.iter().map(|&idx| grants[idx]).collect();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(info.sorted_permissions(), expected);
        prop_assert!(info.roles.is_empty());
    }
}
