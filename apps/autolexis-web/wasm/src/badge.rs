//! Presentational mapping from a risk tier to a display badge.

use contract_types::RiskTier;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskBadge {
    label: String,
    css_class: String,
}

#[wasm_bindgen]
impl RiskBadge {
    #[wasm_bindgen(getter)]
    pub fn label(&self) -> String {
        self.label.clone()
    }

    #[wasm_bindgen(getter, js_name = cssClass)]
    pub fn css_class(&self) -> String {
        self.css_class.clone()
    }
}

pub fn badge_for(tier: RiskTier) -> RiskBadge {
    let css_class = match tier {
        RiskTier::Low => "risk-low",
        RiskTier::Medium => "risk-medium",
        RiskTier::High => "risk-high",
    };
    RiskBadge {
        label: tier.as_str().to_uppercase(),
        css_class: css_class.to_string(),
    }
}

/// Shell-facing variant over the serialized tier. Unknown strings get a
/// neutral badge rather than an error.
#[wasm_bindgen(js_name = badgeForRisk)]
pub fn badge_for_risk(tier: &str) -> RiskBadge {
    match tier.parse::<RiskTier>() {
        Ok(tier) => badge_for(tier),
        Err(_) => RiskBadge {
            label: tier.to_uppercase(),
            css_class: "risk-unknown".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_mapping() {
        assert_eq!(badge_for(RiskTier::Low).css_class(), "risk-low");
        assert_eq!(badge_for(RiskTier::Medium).css_class(), "risk-medium");
        assert_eq!(badge_for(RiskTier::High).css_class(), "risk-high");
        assert_eq!(badge_for(RiskTier::High).label(), "HIGH");
    }

    #[test]
    fn test_unknown_tier_gets_neutral_badge() {
        let badge = badge_for_risk("critical");
        assert_eq!(badge.css_class(), "risk-unknown");
        assert_eq!(badge.label(), "CRITICAL");
    }
}
