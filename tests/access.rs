use axum_delivery_api::error::AppError;
use axum_delivery_api::middleware::auth::{
    AuthUser, ROLE_CLIENT, ROLE_COURIER, ROLE_OWNER, ensure_owner_role, ensure_owns, ensure_role,
};
use uuid::Uuid;

fn user_with_role(role: &str) -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: role.to_string(),
    }
}

#[test]
fn owner_role_passes_owner_check() {
    let owner = user_with_role(ROLE_OWNER);
    assert!(ensure_owner_role(&owner).is_ok());
}

#[test]
fn non_owner_roles_fail_owner_check() {
    for role in [ROLE_CLIENT, ROLE_COURIER] {
        let user = user_with_role(role);
        let err = ensure_owner_role(&user).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}

#[test]
fn ownership_check_requires_matching_user() {
    let user = user_with_role(ROLE_OWNER);
    assert!(ensure_owns(&user, user.user_id).is_ok());

    let err = ensure_owns(&user, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[test]
fn checks_compose_by_and() {
    // Both predicates must pass; an owner of the wrong object is still denied.
    let user = user_with_role(ROLE_OWNER);
    let other_owner = Uuid::new_v4();

    let combined = ensure_owner_role(&user).and_then(|_| ensure_owns(&user, other_owner));
    assert!(matches!(combined.unwrap_err(), AppError::Forbidden));

    let combined = ensure_owner_role(&user).and_then(|_| ensure_owns(&user, user.user_id));
    assert!(combined.is_ok());
}

#[test]
fn role_check_is_exact_match() {
    let courier = user_with_role(ROLE_COURIER);
    assert!(ensure_role(&courier, ROLE_COURIER).is_ok());
    assert!(matches!(
        ensure_role(&courier, ROLE_OWNER).unwrap_err(),
        AppError::Forbidden
    ));
}
