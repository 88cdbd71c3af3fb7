use super::*;
use crate::theme::variant::{Intensity, Variant};

#[test]
fn layer_choice_names_round_trip() {
    for choice in LayerChoice::ALL {
        assert_eq!(choice.as_str().parse::<LayerChoice>().unwrap(), choice);
        assert_eq!(choice.to_string(), choice.as_str());
    }
    assert!("sparkles".parse::<LayerChoice>().is_err());
    let parsed: LayerChoice = serde_json::from_str("\"celestial\"").unwrap();
    assert_eq!(parsed, LayerChoice::Celestial);
}

#[test]
fn build_returns_the_named_layer() {
    let env = LayerEnv {
        variant: Variant::Philosophical,
        intensity: Intensity::High,
        mobile: false,
    };
    for choice in LayerChoice::ALL {
        assert_eq!(choice.build(env).name(), choice.as_str());
    }
}
