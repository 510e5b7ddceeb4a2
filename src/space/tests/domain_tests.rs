//! Domain-focused tests for space value types and roles.

use crate::space::domain::{ParseSpaceRoleError, SpaceDomainError, SpaceName, SpaceRole};
use rstest::rstest;

#[rstest]
#[case("admin", SpaceRole::Admin)]
#[case("member", SpaceRole::Member)]
#[case("  ADMIN  ", SpaceRole::Admin)]
fn space_role_parses_storage_strings(#[case] raw: &str, #[case] expected: SpaceRole) {
    assert_eq!(SpaceRole::try_from(raw), Ok(expected));
}

#[rstest]
fn space_role_rejects_unknown_values() {
    assert_eq!(
        SpaceRole::try_from("owner"),
        Err(ParseSpaceRoleError("owner".to_owned()))
    );
}

#[rstest]
#[case(SpaceRole::Admin, SpaceRole::Admin, true)]
#[case(SpaceRole::Admin, SpaceRole::Member, true)]
#[case(SpaceRole::Member, SpaceRole::Admin, false)]
#[case(SpaceRole::Member, SpaceRole::Member, true)]
fn role_admission_is_ordered(
    #[case] held: SpaceRole,
    #[case] required: SpaceRole,
    #[case] expected: bool,
) {
    assert_eq!(held.admits(required), expected);
}

#[rstest]
fn space_name_trims_and_validates() {
    let name = SpaceName::new("  Frontend  ").expect("valid name");
    assert_eq!(name.as_str(), "Frontend");
}

#[rstest]
#[case("")]
#[case("   ")]
fn space_name_rejects_empty_values(#[case] raw: &str) {
    assert_eq!(SpaceName::new(raw), Err(SpaceDomainError::EmptySpaceName));
}

#[rstest]
fn role_round_trips_through_storage_string() {
    for role in [SpaceRole::Admin, SpaceRole::Member] {
        assert_eq!(SpaceRole::try_from(role.as_str()), Ok(role));
    }
}
