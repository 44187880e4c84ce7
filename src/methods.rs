//! Method handlers. They run only on validated, authenticated requests.

use rand::seq::IndexedRandom;
use serde_json::{json, Map, Value};

use crate::context::Context;
use crate::requests::{ClientsInterestsRequest, OnlineScoreRequest};

/// Score returned to the admin caller.
pub const ADMIN_SCORE: u32 = 42;

/// Catalogue placeholder interests are drawn from.
pub const INTERESTS: [&str; 10] = [
    "books", "hi-tech", "pets", "tv", "travel", "music", "cinema", "geek", "otus", "sport",
];

const INTERESTS_PER_CLIENT: usize = 2;

/// Handles `online_score`: records `has` and returns `{"score": <number>}`.
pub fn online_score(request: &OnlineScoreRequest, is_admin: bool, ctx: &mut Context) -> Value {
    ctx.record_has(request.has());

    if is_admin {
        return json!({ "score": ADMIN_SCORE });
    }
    json!({ "score": score(request) })
}

/// Weighted sum of the filled-in fields; never negative.
pub fn score(request: &OnlineScoreRequest) -> f64 {
    let mut score = 0.0;
    if request.phone().is_some() {
        score += 1.5;
    }
    if request.email().is_some() {
        score += 1.5;
    }
    if request.birthday().is_some() && request.gender().is_some() {
        score += 1.5;
    }
    if request.first_name().is_some() && request.last_name().is_some() {
        score += 0.5;
    }
    score
}

/// Handles `clients_interests`: records `nclients` and maps each id to its interests.
pub fn clients_interests(request: &ClientsInterestsRequest, ctx: &mut Context) -> Value {
    let ids = request.client_ids();
    ctx.record_nclients(ids.len());

    let interests: Map<String, Value> = ids
        .iter()
        .map(|id| (id.to_string(), json!(interests_for(*id))))
        .collect();
    Value::Object(interests)
}

/// Placeholder interests for one client.
pub fn interests_for(_client_id: i64) -> Vec<&'static str> {
    INTERESTS
        .choose_multiple(&mut rand::rng(), INTERESTS_PER_CLIENT)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn full_request_scores_five() {
        let request = OnlineScoreRequest::new_on(
            &json!({
                "phone": "79175002040",
                "email": "stupnikov@otus.ru",
                "first_name": "Stanislav",
                "last_name": "Stupnikov",
                "birthday": "01.01.1990",
                "gender": 1,
            }),
            today(),
        );
        let mut ctx = Context::new("t");

        let response = online_score(&request, false, &mut ctx);

        assert_eq!(response, json!({"score": 5.0}));
        assert_eq!(ctx.has().unwrap().len(), 6);
    }

    #[test]
    fn partial_requests_score_by_pairs() {
        let cases = [
            (json!({"phone": "79175002040", "email": "a@b"}), 3.0),
            (json!({"first_name": "a", "last_name": "b"}), 0.5),
            (json!({"gender": 0, "birthday": "01.01.2000"}), 1.5),
        ];
        for (args, expected) in cases {
            let request = OnlineScoreRequest::new_on(&args, today());
            assert!(request.record().is_valid());
            assert_eq!(score(&request), expected, "{args}");
        }
    }

    #[test]
    fn admin_always_scores_42() {
        let request =
            OnlineScoreRequest::new_on(&json!({"first_name": "a", "last_name": "b"}), today());
        let mut ctx = Context::new("t");

        assert_eq!(online_score(&request, true, &mut ctx), json!({"score": 42}));
        assert_eq!(ctx.has().unwrap(), ["first_name", "last_name"]);
    }

    #[test]
    fn interests_are_keyed_by_stringified_id() {
        let request =
            ClientsInterestsRequest::new_on(&json!({"client_ids": [1, 2, 3, 4]}), today());
        let mut ctx = Context::new("t");

        let response = clients_interests(&request, &mut ctx);

        let map = response.as_object().unwrap();
        assert_eq!(map.len(), 4);
        for id in ["1", "2", "3", "4"] {
            let tags = map[id].as_array().unwrap();
            assert_eq!(tags.len(), INTERESTS_PER_CLIENT);
            assert!(tags.iter().all(|t| INTERESTS.contains(&t.as_str().unwrap())));
        }
        assert_eq!(ctx.nclients(), Some(4));
    }

    #[test]
    fn duplicate_ids_collapse_but_count() {
        let request = ClientsInterestsRequest::new_on(&json!({"client_ids": [5, 5]}), today());
        let mut ctx = Context::new("t");

        let response = clients_interests(&request, &mut ctx);

        assert_eq!(response.as_object().unwrap().len(), 1);
        assert_eq!(ctx.nclients(), Some(2));
    }

    #[test]
    fn interests_are_distinct_per_client() {
        for id in 0..20 {
            let tags = interests_for(id);
            assert_eq!(tags.len(), 2);
            assert_ne!(tags[0], tags[1]);
        }
    }
}
