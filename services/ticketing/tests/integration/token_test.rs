use safeticket_auth_types::token::validate_identity_token;
use safeticket_ticketing::domain::repository::IdentityHasher;
use safeticket_ticketing::error::TicketingError;
use safeticket_ticketing::infra::hashing::Sha256IdentityHasher;
use safeticket_ticketing::usecase::token::IssueTokenUseCase;

use crate::helpers::{TEST_JWT_SECRET, TEST_SALT};

fn usecase() -> IssueTokenUseCase<Sha256IdentityHasher> {
    IssueTokenUseCase {
        hasher: Sha256IdentityHasher {
            salt: TEST_SALT.to_owned(),
        },
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        ttl_secs: 3600,
    }
}

#[test]
fn should_issue_token_for_hashed_passport_id() {
    let out = usecase().execute("AK0123456").unwrap();

    let expected = Sha256IdentityHasher {
        salt: TEST_SALT.to_owned(),
    }
    .hash("AK0123456")
    .unwrap();
    assert_eq!(out.hashed_identity, expected);

    let info = validate_identity_token(&out.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.hashed_identity, expected);
    assert_eq!(info.expires_at, out.expires_at);
}

#[test]
fn should_never_embed_raw_passport_id_in_token() {
    let out = usecase().execute("AK0123456").unwrap();
    assert!(!out.token.contains("AK0123456"));
    assert!(!out.hashed_identity.as_str().contains("AK0123456"));
}

#[test]
fn should_reject_blank_passport_id() {
    assert!(matches!(
        usecase().execute("  "),
        Err(TicketingError::MissingIdentity)
    ));
}

#[test]
fn should_issue_same_identity_for_same_passport_id() {
    let a = usecase().execute("AK0123456").unwrap();
    let b = usecase().execute(" AK0123456 ").unwrap();
    assert_eq!(a.hashed_identity, b.hashed_identity);
}
