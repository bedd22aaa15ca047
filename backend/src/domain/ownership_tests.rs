//! Tests for owner reference normalization and ownership checks.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{MealDraft, MealId, MealType};

const ALICE: &str = "65a1f0c2b3d4e5f60718293a";
const BOB: &str = "65a1f0c2b3d4e5f60718293b";

fn meal_owned_by(id: &str, owner: OwnerRef) -> Meal {
    Meal::new(MealDraft {
        id: MealId::new(id).expect("valid meal id"),
        owner,
        caption: "toast".to_owned(),
        meal_type: MealType::Breakfast,
        meal_date: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).single(),
        likes: Vec::new(),
        comments: Vec::new(),
    })
}

#[fixture]
fn alice() -> UserId {
    UserId::new(ALICE).expect("valid user id")
}

#[rstest]
#[case(OwnerRef::typed(ALICE))]
#[case(OwnerRef::text(ALICE))]
#[case(OwnerRef::typed(ALICE.to_uppercase()))]
#[case(OwnerRef::text(ALICE.to_uppercase()))]
fn normalize_accepts_both_encodings(#[case] reference: OwnerRef, alice: UserId) {
    assert_eq!(normalize(&reference), Ok(alice));
}

#[rstest]
#[case(OwnerRef::typed(""), OwnerRefEncoding::Typed)]
#[case(OwnerRef::text("not-a-key"), OwnerRefEncoding::Text)]
#[case(OwnerRef::text(format!(" {ALICE}")), OwnerRefEncoding::Text)]
#[case(OwnerRef::typed("65a1f0c2b3d4e5f6071829"), OwnerRefEncoding::Typed)]
fn normalize_rejects_malformed_references(
    #[case] reference: OwnerRef,
    #[case] encoding: OwnerRefEncoding,
) {
    let err = normalize(&reference).expect_err("malformed reference");
    assert_eq!(err.encoding, encoding);
    assert_eq!(err.value, reference.raw());
}

#[rstest]
#[case(OwnerRef::typed(ALICE))]
#[case(OwnerRef::text(ALICE))]
#[case(OwnerRef::text(ALICE.to_uppercase()))]
fn normalize_is_idempotent(#[case] reference: OwnerRef) {
    let once = normalize(&reference).expect("valid reference");
    let twice = normalize(&OwnerRef::from(once)).expect("canonical reference");
    assert_eq!(once, twice);
}

#[rstest]
#[case(OwnerRef::typed(ALICE), true)]
#[case(OwnerRef::text(ALICE), true)]
#[case(OwnerRef::typed(BOB), false)]
#[case(OwnerRef::text(BOB), false)]
#[case(OwnerRef::text("garbage"), false)]
fn is_owner_matches_regardless_of_encoding(
    #[case] reference: OwnerRef,
    #[case] expected: bool,
    alice: UserId,
) {
    let meal = meal_owned_by("65b000000000000000000001", reference);
    assert_eq!(is_owner(&meal, &alice), expected);
}

#[rstest]
fn find_by_owner_includes_both_encodings(alice: UserId) {
    let meals = vec![
        meal_owned_by("65b000000000000000000001", OwnerRef::typed(ALICE)),
        meal_owned_by("65b000000000000000000002", OwnerRef::text(BOB)),
        meal_owned_by("65b000000000000000000003", OwnerRef::text(ALICE)),
        meal_owned_by("65b000000000000000000004", OwnerRef::text("broken")),
    ];

    let owned: Vec<String> = find_by_owner(meals, &alice)
        .iter()
        .map(|meal| meal.id().to_string())
        .collect();

    assert_eq!(
        owned,
        vec!["65b000000000000000000001", "65b000000000000000000003"]
    );
}

#[rstest]
#[case(r#"{"$oid":"65a1f0c2b3d4e5f60718293a"}"#, OwnerRefEncoding::Typed)]
#[case(r#""65a1f0c2b3d4e5f60718293a""#, OwnerRefEncoding::Text)]
fn owner_ref_deserializes_stored_encodings(#[case] json: &str, #[case] encoding: OwnerRefEncoding) {
    let reference: OwnerRef = serde_json::from_str(json).expect("stored reference");
    assert_eq!(reference.encoding(), encoding);
    assert_eq!(reference.raw(), ALICE);
}

#[rstest]
fn canonical_form_serializes_as_typed_reference(alice: UserId) {
    let value = serde_json::to_value(OwnerRef::from(alice)).expect("serialize reference");
    assert_eq!(value, serde_json::json!({ "$oid": ALICE }));
}

#[rstest]
#[case(OwnerRef::typed(ALICE), true)]
#[case(OwnerRef::typed(ALICE.to_uppercase()), false)]
#[case(OwnerRef::text(ALICE), false)]
#[case(OwnerRef::typed("broken"), false)]
fn is_canonical_requires_lowercase_typed_form(#[case] reference: OwnerRef, #[case] expected: bool) {
    assert_eq!(reference.is_canonical(), expected);
}
