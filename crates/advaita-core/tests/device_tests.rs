use advaita_core::device::*;

const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36";
const PHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";

#[test]
fn mobile_agents_are_recognised() {
    assert!(is_mobile_agent(PHONE));
    assert!(is_mobile_agent("Opera Mini/8.0"));
    assert!(is_mobile_agent("Mozilla/5.0 (Linux; Android 14)"));
    assert!(!is_mobile_agent(DESKTOP));
}

#[test]
fn narrow_viewports_skip_the_intro() {
    assert!(should_skip_intro(768.0, DESKTOP, ""));
    assert!(!should_skip_intro(769.0, DESKTOP, ""));
    assert!(should_skip_intro(1440.0, PHONE, ""));
}

#[test]
fn explicit_flag_wins() {
    assert!(should_skip_intro(1920.0, DESKTOP, "?skipIntro=1"));
    assert!(should_skip_intro(1920.0, DESKTOP, "?lang=en&skipIntro"));
    assert!(!should_skip_intro(320.0, PHONE, "?skipIntro=false"));
    // unknown values fall back to the device class
    assert!(!should_skip_intro(1920.0, DESKTOP, "?skipIntro=maybe"));
}

#[test]
fn skip_flag_parsing() {
    assert_eq!(skip_flag(""), None);
    assert_eq!(skip_flag("?skipintro=YES"), Some(true));
    assert_eq!(skip_flag("skipIntro=0"), Some(false));
    assert_eq!(skip_flag("?other=1"), None);
}
