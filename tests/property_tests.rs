//! Integration property tests for scoring-core.
//!
//! These tests validate field contracts, routing precedence and the
//! never-panics guarantee of the HTTP boundary using property-based testing.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use scoring_core::web::{RequestAdapter, ScoringService};
use scoring_core::{
    Context, FieldDescriptor, FieldErrorKind, MethodRouter, OnlineScoreRequest, ServiceConfig,
    StatusCode,
};
use serde_json::{json, Value};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

// Strategy: arbitrary JSON values, a few levels deep
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z0-9@. ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,10}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

// Strategy: any descriptor kind with any flags
fn arb_descriptor() -> impl Strategy<Value = FieldDescriptor> {
    (
        prop_oneof![
            Just(FieldDescriptor::char()),
            Just(FieldDescriptor::arguments()),
            Just(FieldDescriptor::email()),
            Just(FieldDescriptor::phone()),
            Just(FieldDescriptor::date()),
            Just(FieldDescriptor::birthday()),
            Just(FieldDescriptor::gender()),
            Just(FieldDescriptor::client_ids()),
        ],
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(d, required, nullable)| {
            let d = if required { d.required() } else { d };
            if nullable {
                d.nullable()
            } else {
                d
            }
        })
}

proptest! {
    /// Property: a required field that is absent always fails as missing
    #[test]
    fn proptest_required_absent_always_fails(descriptor in arb_descriptor()) {
        let result = descriptor.parse_on(None, today());
        if descriptor.is_required() {
            prop_assert_eq!(result.unwrap_err().kind(), FieldErrorKind::Missing);
        } else {
            prop_assert_eq!(result, Ok(None));
        }
    }

    /// Property: parsing arbitrary JSON never panics, and empty values follow `nullable`
    #[test]
    fn proptest_parse_never_panics(descriptor in arb_descriptor(), value in arb_json()) {
        let result = descriptor.parse_on(Some(&value), today());
        if descriptor.is_empty(&value) {
            if descriptor.is_nullable() {
                prop_assert_eq!(result, Ok(None));
            } else {
                prop_assert_eq!(result.unwrap_err().kind(), FieldErrorKind::Empty);
            }
        }
    }

    /// Property: every 11-digit string starting with 7 is a valid phone
    #[test]
    fn proptest_valid_phones_accepted(rest in "[0-9]{10}") {
        let phone = format!("7{}", rest);
        let d = FieldDescriptor::phone();
        prop_assert!(d.parse_on(Some(&json!(phone)), today()).is_ok());
    }

    /// Property: phones not starting with 7, or of the wrong length, are rejected
    #[test]
    fn proptest_invalid_phones_rejected(
        first in "[0-689]",
        rest in "[0-9]{10}",
        short in "7[0-9]{0,9}",
    ) {
        let d = FieldDescriptor::phone();
        let wrong_prefix = format!("{}{}", first, rest);
        prop_assert!(d.parse_on(Some(&json!(wrong_prefix)), today()).is_err());
        prop_assert!(d.parse_on(Some(&json!(short)), today()).is_err());
    }

    /// Property: a string is a valid email iff it contains '@'
    #[test]
    fn proptest_email_iff_at_sign(s in "[a-z@.]{1,20}") {
        let d = FieldDescriptor::email();
        let ok = d.parse_on(Some(&json!(s)), today()).is_ok();
        prop_assert_eq!(ok, s.contains('@'));
    }

    /// Property: only 0, 1, 2 are genders
    #[test]
    fn proptest_gender_closed_set(n in -10i64..10) {
        let d = FieldDescriptor::gender();
        let ok = d.parse_on(Some(&json!(n)), today()).is_ok();
        prop_assert_eq!(ok, (0..=2).contains(&n));
    }

    /// Property: online_score is valid whenever a full pair is present
    #[test]
    fn proptest_online_score_pair_rule(
        first_name in prop::option::of("[a-z]{1,8}"),
        last_name in prop::option::of("[a-z]{1,8}"),
        gender in prop::option::of(0u8..3),
    ) {
        let mut args = serde_json::Map::new();
        if let Some(v) = &first_name { args.insert("first_name".into(), json!(v)); }
        if let Some(v) = &last_name { args.insert("last_name".into(), json!(v)); }
        if let Some(v) = gender { args.insert("gender".into(), json!(v)); }

        let request = OnlineScoreRequest::new_on(&Value::Object(args), today());
        let expected = first_name.is_some() && last_name.is_some();
        prop_assert_eq!(request.record().is_valid(), expected);
    }

    /// Property: any envelope missing a required key is 422, whatever the method
    #[test]
    fn proptest_invalid_envelope_is_422(method in "[a-z_]{1,20}", token in "[a-f0-9]{0,16}") {
        let router = MethodRouter::from_config(ServiceConfig::default());
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let mut ctx = Context::new("prop");

        let outcome = router.handle_at(
            &json!({"login": "h&f", "token": token, "method": method}),
            &mut ctx,
            now,
        );
        prop_assert_eq!(outcome.code, StatusCode::InvalidRequest);
    }

    /// Property: a well-formed envelope with a random token is always 403
    #[test]
    fn proptest_random_token_is_403(
        account in "[a-z&]{0,12}",
        login in "[a-z&]{1,12}",
        token in "[a-f0-9]{0,128}",
    ) {
        let router = MethodRouter::from_config(ServiceConfig::default());
        let mut ctx = Context::new("prop");

        let outcome = router.handle(
            &json!({
                "account": account,
                "login": login,
                "token": token,
                "method": "online_score",
                "arguments": {"phone": "79175002040", "email": "a@b.c"},
            }),
            &mut ctx,
        );
        prop_assert_eq!(outcome.code, StatusCode::Forbidden);
    }

    /// Property: arbitrary bodies never panic and always produce exactly one reply
    #[test]
    fn proptest_service_never_panics(body in arb_json(), raw in prop::collection::vec(any::<u8>(), 0..64)) {
        let service = ScoringService::from_config(ServiceConfig::default());

        for payload in [body.to_string().into_bytes(), raw] {
            let reply = service.handle(&RequestAdapter::new("/method/", payload));
            let object = reply.body.as_object().unwrap();

            prop_assert_eq!(object.len(), 2);
            prop_assert_eq!(&object["code"], &json!(reply.status.as_u16()));
            prop_assert!(object.contains_key("response") != object.contains_key("error"));
        }
    }
}
