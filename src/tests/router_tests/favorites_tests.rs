use crate::tests::utils::{body_json, get, get_with_session, ids, listed, post_json, session_for, test_state};
use serde_json::json;

#[test]
fn favorites_require_a_session() {
    let state = test_state(&[listed("1", 1, "FLINT")]);

    assert_eq!(get(&state, "/properties/saved-properties").status(), 401);
    assert_eq!(
        get_with_session(&state, "/properties/saved-properties", "forged").status(),
        401
    );

    let resp = post_json(
        &state,
        "/properties/save-property",
        None,
        json!({ "propertyId": "1" }),
    );
    assert_eq!(resp.status(), 401);
}

#[test]
fn save_list_check_and_remove() {
    let state = test_state(&[
        listed("1", 1, "FLINT"),
        listed("2", 2, "FLINT"),
        listed("3", 3, "FLINT"),
    ]);
    let token = session_for(&state, "user-a");

    for id in ["3", "1", "1"] {
        let resp = post_json(
            &state,
            "/properties/save-property",
            Some(&token),
            json!({ "propertyId": id }),
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(body_json(resp), json!({ "success": true }));
    }

    let saved = body_json(get_with_session(&state, "/properties/saved-properties", &token));
    assert_eq!(ids(&saved), vec!["1", "3"]);
    assert_eq!(saved["metadata"], json!({ "total": 2 }));

    let check = |id: &str| {
        body_json(get_with_session(
            &state,
            &format!("/properties/saved-property?propertyId={id}"),
            &token,
        ))
    };
    assert_eq!(check("3"), json!({ "success": true }));
    assert_eq!(check("2"), json!({ "success": false }));

    let resp = post_json(
        &state,
        "/properties/remove-saved-property",
        Some(&token),
        json!({ "propertyId": "3" }),
    );
    assert_eq!(resp.status(), 200);
    assert_eq!(check("3"), json!({ "success": false }));
}

#[test]
fn favorites_are_per_user() {
    let state = test_state(&[listed("1", 1, "FLINT")]);
    let alice = session_for(&state, "alice");
    let bob = session_for(&state, "bob");

    post_json(
        &state,
        "/properties/save-property",
        Some(&alice),
        json!({ "propertyId": "1" }),
    );

    let bobs = body_json(get_with_session(&state, "/properties/saved-properties", &bob));
    assert_eq!(bobs["metadata"]["total"], 0);
}

#[test]
fn missing_or_unknown_property_id_is_rejected() {
    let state = test_state(&[listed("1", 1, "FLINT")]);
    let token = session_for(&state, "user-a");

    let missing = post_json(&state, "/properties/save-property", Some(&token), json!({}));
    assert_eq!(missing.status(), 400);

    let blank_check = get_with_session(&state, "/properties/saved-property", &token);
    assert_eq!(blank_check.status(), 400);

    let unknown = post_json(
        &state,
        "/properties/save-property",
        Some(&token),
        json!({ "propertyId": "nope" }),
    );
    assert_eq!(unknown.status(), 404);
}

#[test]
fn form_encoded_bodies_are_accepted() {
    let state = test_state(&[listed("7", 1, "FLINT")]);
    let token = session_for(&state, "user-a");

    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri("/properties/save-property")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Cookie", format!("session={token}"))
        .body(astra::Body::from("propertyId=7".to_string()))
        .unwrap();
    assert_eq!(crate::tests::utils::send(&state, req).status(), 200);

    let saved = body_json(get_with_session(&state, "/properties/saved-properties", &token));
    assert_eq!(ids(&saved), vec!["7"]);
}
