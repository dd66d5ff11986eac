// src/tests/router_tests/listing_tests.rs

use crate::domain::property::Property;
use crate::tests::utils::{body_json, get, ids, listed, test_state};
use serde_json::json;

fn dataset() -> Vec<Property> {
    vec![
        Property {
            square_feet: Some(800),
            zip: Some("48503".into()),
            property_class: Some("Res Imp".into()),
            ..listed("1", 100_000, "X")
        },
        Property {
            square_feet: Some(2_000),
            zip: Some("48504".into()),
            property_class: Some("Com Imp".into()),
            featured: true,
            ..listed("2", 250_000, "Y")
        },
        Property {
            square_feet: Some(1_500),
            zip: Some("48503".into()),
            property_class: Some("Res Imp".into()),
            ..listed("3", 50_000, "X")
        },
    ]
}

#[test]
fn no_parameters_apply_defaults_and_baseline_only() {
    let mut props = dataset();
    // Missing parcel id and missing address: never listed.
    props.push(Property {
        parcel_id: None,
        ..listed("4", 10, "X")
    });
    props.push(Property {
        address: None,
        ..listed("5", 10, "X")
    });
    let state = test_state(&props);

    let resp = get(&state, "/properties");
    assert_eq!(resp.status(), 200);
    let page = body_json(resp);

    assert_eq!(ids(&page), vec!["1", "2", "3"]);
    assert_eq!(page["metadata"], json!({ "total": 3, "limit": 30, "offset": 0 }));
}

#[test]
fn price_is_an_inclusive_maximum() {
    let state = test_state(&[listed("1", 100_000, "X"), listed("2", 250_000, "Y")]);

    let page = body_json(get(&state, "/properties?price=200000"));

    assert_eq!(ids(&page), vec!["1"]);
    assert_eq!(page["metadata"]["total"], 1);

    let page = body_json(get(&state, "/properties?price=250000"));
    assert_eq!(ids(&page), vec!["1", "2"]);
}

#[test]
fn price_and_sqft_must_both_hold() {
    let state = test_state(&dataset());

    // 1: cheap but small, 2: big but expensive, 3: cheap and big enough.
    let page = body_json(get(&state, "/properties?price=120000&sqft=1000"));

    assert_eq!(ids(&page), vec!["3"]);
    assert_eq!(page["metadata"]["total"], 1);
}

#[test]
fn sort_orders_by_price_both_ways() {
    let state = test_state(&dataset());

    let asc = body_json(get(&state, "/properties?sort=price,asc"));
    let desc = body_json(get(&state, "/properties?sort=price,desc"));

    let prices = |page: &serde_json::Value| -> Vec<i64> {
        page["properties"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["price"].as_i64().unwrap())
            .collect()
    };

    assert_eq!(prices(&asc), vec![50_000, 100_000, 250_000]);
    assert_eq!(prices(&desc), vec![250_000, 100_000, 50_000]);
}

#[test]
fn repeated_requests_are_identical() {
    let state = test_state(&dataset());

    let first = body_json(get(&state, "/properties?city=x&limit=2"));
    let second = body_json(get(&state, "/properties?city=x&limit=2"));

    assert_eq!(first, second);
    assert_eq!(ids(&first), vec!["1", "3"]);
}

#[test]
fn pages_do_not_overlap_and_total_ignores_paging() {
    let state = test_state(&dataset());

    let p1 = body_json(get(&state, "/properties?limit=2&offset=0&sort=zip,asc"));
    let p2 = body_json(get(&state, "/properties?limit=2&offset=2&sort=zip,asc"));

    assert_eq!(ids(&p1), vec!["1", "3"]);
    assert_eq!(ids(&p2), vec!["2"]);
    assert_eq!(p2["metadata"], json!({ "total": 3, "limit": 2, "offset": 2 }));
}

#[test]
fn membership_and_flag_filters() {
    let state = test_state(&dataset());

    let by_zip = body_json(get(&state, "/properties?zip=48504,99999"));
    assert_eq!(ids(&by_zip), vec!["2"]);

    let by_class = body_json(get(&state, "/properties?propertyClass=Res%20Imp"));
    assert_eq!(ids(&by_class), vec!["1", "3"]);

    let featured = body_json(get(&state, "/properties?featured=true"));
    assert_eq!(ids(&featured), vec!["2"]);

    let not_featured = body_json(get(&state, "/properties?featured=false"));
    assert_eq!(ids(&not_featured), vec!["1", "3"]);
}

#[test]
fn search_term_matches_address_or_parcel_case_insensitively() {
    let state = test_state(&[
        Property {
            address: Some("12 Elm Street".into()),
            ..listed("a", 1, "FLINT")
        },
        Property {
            parcel_id: Some("ELM-0001".into()),
            ..listed("b", 1, "FLINT")
        },
        listed("c", 1, "FLINT"),
    ]);

    let page = body_json(get(&state, "/properties?searchTerm=elm"));

    assert_eq!(ids(&page), vec!["a", "b"]);
    assert_eq!(page["metadata"]["total"], 2);
}

#[test]
fn search_term_wildcards_match_literally() {
    let state = test_state(&[
        Property {
            address: Some("100% OFF AVE".into()),
            ..listed("a", 1, "FLINT")
        },
        listed("b", 1, "FLINT"),
    ]);

    let page = body_json(get(&state, "/properties?searchTerm=%25"));
    assert_eq!(ids(&page), vec!["a"]);
}

#[test]
fn unknown_property_class_is_rejected_with_its_name() {
    let state = test_state(&dataset());

    let resp = get(&state, "/properties?propertyClass=Res%20Imp,Castle");
    assert_eq!(resp.status(), 400);

    let body = body_json(resp);
    assert_eq!(
        body,
        json!({ "errors": [
            { "field": "propertyClass", "message": "unknown property class: Castle" }
        ] })
    );
}

#[test]
fn every_invalid_field_is_reported_at_once() {
    let state = test_state(&dataset());

    let resp = get(&state, "/properties?price=abc&featured=maybe");
    assert_eq!(resp.status(), 400);

    let errors = body_json(resp)["errors"].as_array().unwrap().clone();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "price");
    assert_eq!(errors[1]["field"], "featured");
}

#[test]
fn sort_outside_whitelist_is_rejected() {
    let state = test_state(&dataset());

    let resp = get(&state, "/properties?sort=id;drop%20table%20properties,asc");
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["errors"][0]["field"], "sort");

    // The table is still there.
    assert_eq!(get(&state, "/properties").status(), 200);
}

#[test]
fn oversized_pages_are_rejected() {
    let state = test_state(&dataset());

    let resp = get(&state, "/properties?limit=5000");
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_json(resp)["errors"][0]["message"],
        "limit must not exceed 100"
    );
}

#[test]
fn search_and_city_fold_non_ascii_letters() {
    let state = test_state(&[
        Property {
            address: Some("12 café st".into()),
            ..listed("a", 1, "Zürich")
        },
        Property {
            address: Some("9 CAFÉ RD".into()),
            ..listed("b", 1, "FLINT")
        },
        listed("c", 1, "FLINT"),
    ]);

    let lower = body_json(get(&state, "/properties?searchTerm=caf%C3%A9"));
    assert_eq!(ids(&lower), vec!["a", "b"]);

    let upper = body_json(get(&state, "/properties?searchTerm=CAF%C3%89"));
    assert_eq!(ids(&upper), vec!["a", "b"]);

    let city = body_json(get(&state, "/properties?city=z%C3%BCrich"));
    assert_eq!(ids(&city), vec!["a"]);
}

#[test]
fn minimum_filters_are_inclusive_and_skip_nulls() {
    let state = test_state(&[
        Property {
            lot_size: Some(0.25),
            bedrooms: Some(3.0),
            bathrooms: Some(1.5),
            ..listed("a", 1, "FLINT")
        },
        Property {
            lot_size: Some(0.1),
            bedrooms: Some(2.0),
            bathrooms: Some(1.0),
            ..listed("b", 1, "FLINT")
        },
        // No measurements at all.
        listed("c", 1, "FLINT"),
    ]);

    let lot = body_json(get(&state, "/properties?lotSize=0.25"));
    assert_eq!(ids(&lot), vec!["a"]);

    let beds = body_json(get(&state, "/properties?bedrooms=2"));
    assert_eq!(ids(&beds), vec!["a", "b"]);

    let baths = body_json(get(&state, "/properties?bathrooms=1.5"));
    assert_eq!(ids(&baths), vec!["a"]);

    let any_baths = body_json(get(&state, "/properties?bathrooms=0"));
    assert_eq!(ids(&any_baths), vec!["a", "b"]);
    assert_eq!(any_baths["metadata"]["total"], 2);
}
