//! Integration tests driving resources through the registry.

use std::path::PathBuf;

use tf_mapper::{ResourceData, Value};
use tf_twilio::resources::phone_number;
use tf_twilio::{Provider, ProviderConfig, ResourceRegistry};

const PHONE_NUMBER: &str = include_str!("fixtures/incoming_phone_number.json");
const KEY_CREATED: &str = include_str!("fixtures/key_created.json");
const KEY_FETCHED: &str = include_str!("fixtures/key_fetched.json");

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn phone_number_response_populates_state_json() {
    let registry = ResourceRegistry::builtin();
    let mut state = registry.new_state("twilio_phone_number").unwrap();

    registry
        .apply_response("twilio_phone_number", PHONE_NUMBER, &mut state)
        .unwrap();
    let json = state.to_json();

    assert_eq!(json["id"], "PNaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    assert_eq!(json["number"], "+18089255327");
    assert_eq!(json["is_mms_capable"], true);
    assert_eq!(json["date_created"], "2015-07-30T20:12:31+00:00");
    assert_eq!(json["voice"][0]["caller_id_enabled"], true);
    assert_eq!(json["voice"][0]["primary_url"], "https://example.com/voice");
    assert_eq!(json["emergency"][0]["status"], "Active");
    assert_eq!(json["status_callback"][0]["http_method"], "POST");
    assert_eq!(json["country_code"], "");
}

#[test]
fn phone_number_update_params_mirror_state() {
    let registry = ResourceRegistry::builtin();
    let resource = registry.get("twilio_phone_number").unwrap();
    let mut state = registry.new_state("twilio_phone_number").unwrap();
    registry
        .apply_response("twilio_phone_number", PHONE_NUMBER, &mut state)
        .unwrap();

    let params = resource.create_params(&state).unwrap();

    assert_eq!(params.get("FriendlyName"), Some("(808) 925-5327"));
    assert_eq!(params.get("AddressSid"), Some("AD2a0747eba6abf96b7e3c3ff0b4530f6e"));
    assert_eq!(params.get("SmsUrl"), Some("https://example.com/sms"));
    assert_eq!(params.get("VoiceCallerIdLookup"), Some("true"));
    assert_eq!(params.get("EmergencyAddressSid"), Some("AD0123456789abcdef0123456789abcdef"));
    assert_eq!(params.get("SmsFallbackUrl"), None);
    assert_eq!(params.get("StatusCallback"), None);
    assert_eq!(params.get("TrunkSid"), None);
}

#[test]
fn purchase_flow_builds_search_and_buy_params() {
    let registry = ResourceRegistry::builtin();
    let mut state = registry.new_state("twilio_phone_number").unwrap();
    state.set("country_code", Value::from("US")).unwrap();
    state.set("area_code", Value::from("808")).unwrap();
    state.set("search", Value::from("925")).unwrap();
    state.set("friendly_name", Value::from("front desk")).unwrap();

    let area_code = state.get("area_code").unwrap();
    let search = state.get("search").unwrap();
    let search_params =
        phone_number::search_params(area_code.as_str().unwrap_or_default(), search.as_str().unwrap_or_default());
    assert_eq!(search_params.encode(), "AreaCode=808&Contains=925*");

    let buy = phone_number::purchase_params(&state, "+1 808-925-5327").unwrap();
    assert_eq!(buy.encode(), "FriendlyName=front+desk&PhoneNumber=%2B18089255327");
}

#[test]
fn key_secret_survives_refresh() {
    let registry = ResourceRegistry::builtin();
    let mut state = registry.new_state("twilio_key").unwrap();

    registry.apply_response("twilio_key", KEY_CREATED, &mut state).unwrap();
    registry.apply_response("twilio_key", KEY_FETCHED, &mut state).unwrap();

    assert_eq!(state.get("secret"), Some(Value::from("0123456789abcdef0123456789abcdef")));
    assert_eq!(state.get("date_updated"), Some(Value::from("2016-06-14T09:00:00+00:00")));
}

#[test]
fn failed_decode_leaves_state_untouched() {
    let registry = ResourceRegistry::builtin();
    let mut state = registry.new_state("twilio_key").unwrap();
    registry.apply_response("twilio_key", KEY_CREATED, &mut state).unwrap();
    let before = state.to_json();

    let err = registry
        .apply_response("twilio_key", r#"{"sid": 42}"#, &mut state)
        .unwrap_err();

    assert!(err.to_string().starts_with("failed to decode twilio_key response"));
    assert_eq!(state.to_json(), before);
}

#[test]
fn provider_configures_from_toml_file() {
    let config = ProviderConfig::load(&fixture_path("provider.toml")).unwrap();
    config.validate().unwrap();

    let provider = Provider::new();
    let mut block = tf_mapper::MemoryResourceData::new(provider.schema());
    block.set("account_sid", Value::from(config.account_sid.as_str())).unwrap();
    block.set("auth_token", Value::from(config.auth_token.as_str())).unwrap();
    block
        .set("endpoint", Value::from(config.endpoint.as_deref().unwrap_or_default()))
        .unwrap();

    let context = provider.configure(&block).unwrap();
    assert_eq!(context.config(), &config);
    assert_eq!(
        context.account_url(),
        "https://api.example.com/2010-04-01/Accounts/AC0123456789abcdef0123456789abcdef"
    );
}

#[test]
fn every_registered_resource_rejects_empty_body() {
    let provider = Provider::new();
    let registry = provider.resources();

    for type_name in registry.type_names() {
        let mut state = registry.new_state(type_name).unwrap();
        assert!(registry.apply_response(type_name, "", &mut state).is_err(), "{type_name}");
        assert_eq!(state.id(), "", "{type_name}");
    }
}
