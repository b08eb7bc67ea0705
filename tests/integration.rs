//! End-to-end flow tests over the scripted driver
//!
//! These tests script whole screens the way the terminal presents them and
//! run the public flow helpers against them, asserting the exact order of
//! taps, the typed card credentials and the localized copy checks.

use apos_autotest::access::Accessor;
use apos_autotest::driver::mock::MockDriver;
use apos_autotest::fixtures::FixtureData;
use apos_autotest::flows::sale::{self, Choice};
use apos_autotest::flows::{self, elements};
use apos_autotest::Error;

use std::time::Duration;

const FIXTURE_JSON: &str = r#"{
    "cards": {
        "mastercard": { "PAN": "5413330089020011", "expiration": "1230", "cvc": "999" },
        "expired":    { "PAN": "5413330089020029", "expiration": "0119", "cvc": "999" }
    },
    "currency": { "CZK": "Kč", "EUR": "€" },
    "amounts_tips": { "small": "1", "round": "10" },
    "amounts_cashback": { "min": "10", "mid": "500" },
    "cashback_limits": { "min": "10", "max": "3000" }
}"#;

fn fixture() -> FixtureData {
    serde_json::from_str(FIXTURE_JSON).unwrap()
}

/// Script the screens a tip sale walks through: idle selector, keypad,
/// offer dialog, entry screen and card-read screen
fn script_tip_sale(driver: &MockDriver, amount_line: &str, offers: &[&str]) {
    driver.set_text(&elements::currency_label(), "Kč");
    driver.present(&elements::currency_option("CZK"));
    for d in '0'..='9' {
        driver.present(&elements::keypad_digit(d));
    }
    driver.present(&elements::keypad_ok());
    driver.queue_texts(&elements::text_view(), offers);
    driver.set_text(&elements::yes_button(), "ANO");
    driver.set_text(&elements::no_button(), "NE");
    driver.set_text(&elements::input_text(), "0");
    driver.set_text(&elements::title(), "Prodej");
    driver.set_text(
        &elements::card_text_view(),
        "Přiložte, vložte nebo protáhněte kartu",
    );
    driver.set_text(&elements::amount_text_view(), amount_line);
    driver.present(&elements::manual_entry_button());
    driver.present(&elements::pan_input());
    driver.present(&elements::expiry_input());
    driver.present(&elements::cvv_input());
    driver.present(&elements::confirm_button());
}

#[tokio::test]
async fn accepted_tip_sale_taps_in_order_and_shows_grouped_total() {
    let driver = MockDriver::new();
    // 1000 + 5 tip, grouped with a non-breaking space
    script_tip_sale(
        &driver,
        "1\u{a0}005\u{a0}Kč",
        &[flows::TIP_OFFER, flows::TIP_ENTRY],
    );

    let fixture = fixture();
    let accessor = Accessor::new(&driver);
    let card = fixture.card("mastercard").unwrap();

    sale::sale_with_tip(&accessor, &fixture, "1000", "CZK", card, "5", Choice::Accept)
        .await
        .unwrap();

    let expected: Vec<String> = [
        elements::currency_label(),
        elements::currency_option("CZK"),
        elements::keypad_digit('1'),
        elements::keypad_digit('0'),
        elements::keypad_digit('0'),
        elements::keypad_digit('0'),
        elements::keypad_ok(),
        elements::yes_button(),
        elements::keypad_digit('5'),
        elements::keypad_ok(),
        elements::manual_entry_button(),
        elements::confirm_button(),
    ]
    .iter()
    .map(|l| l.to_string())
    .collect();
    assert_eq!(driver.click_log(), expected);

    assert_eq!(driver.typed(&elements::pan_input()), ["5413330089020011"]);
    assert_eq!(driver.typed(&elements::expiry_input()), ["1230"]);
    assert_eq!(driver.typed(&elements::cvv_input()), ["999"]);
}

#[tokio::test]
async fn declined_tip_sale_keeps_base_amount() {
    let driver = MockDriver::new();
    script_tip_sale(&driver, "200\u{a0}Kč", &[flows::TIP_OFFER]);

    let fixture = fixture();
    let accessor = Accessor::new(&driver);
    let card = fixture.card("mastercard").unwrap();

    sale::sale_with_tip(&accessor, &fixture, "200", "CZK", card, "5", Choice::Decline)
        .await
        .unwrap();

    assert_eq!(driver.click_count(&elements::no_button()), 1);
    assert_eq!(driver.click_count(&elements::yes_button()), 0);
    // Declining never opens the tip entry keypad for "5"
    assert_eq!(driver.click_count(&elements::keypad_digit('5')), 0);
}

#[tokio::test]
async fn wrong_displayed_total_is_an_assertion_fault() {
    let driver = MockDriver::new();
    // Terminal shows the base amount where the tip-inclusive total belongs
    script_tip_sale(
        &driver,
        "1\u{a0}000\u{a0}Kč",
        &[flows::TIP_OFFER, flows::TIP_ENTRY],
    );

    let fixture = fixture();
    let accessor = Accessor::new(&driver);
    let card = fixture.card("mastercard").unwrap();

    let err = sale::sale_with_tip(&accessor, &fixture, "1000", "CZK", card, "5", Choice::Accept)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Assertion { .. }), "got {err:?}");
    // The fault is logical, so nothing downstream of the check was tapped
    assert_eq!(driver.click_count(&elements::manual_entry_button()), 0);
}

#[tokio::test]
async fn stale_taps_mid_flow_are_retried_transparently() {
    let driver = MockDriver::new();
    script_tip_sale(
        &driver,
        "1\u{a0}005\u{a0}Kč",
        &[flows::TIP_OFFER, flows::TIP_ENTRY],
    );
    // The offer dialog re-renders twice under the tap
    driver.fail_stale_clicks(&elements::yes_button(), 2);

    let fixture = fixture();
    let accessor = Accessor::new(&driver);
    let card = fixture.card("mastercard").unwrap();

    sale::sale_with_tip(&accessor, &fixture, "1000", "CZK", card, "5", Choice::Accept)
        .await
        .unwrap();
    assert_eq!(driver.click_count(&elements::yes_button()), 1);
}

#[tokio::test]
async fn over_limit_cashback_shows_announcement_and_is_confirmed() {
    let driver = MockDriver::new();
    let fixture = fixture();
    let announcement = sale::cashback_limit_announcement(&fixture, "5000").unwrap();

    script_tip_sale(
        &driver,
        "unused",
        &[flows::CASHBACK_OFFER, flows::CASHBACK_ENTRY, &announcement],
    );
    // ANO on the offer dialog becomes POTVRDIT on the rejection screen
    driver.queue_texts(&elements::yes_button(), &["ANO", "POTVRDIT"]);

    let accessor = Accessor::new(&driver).with_poll_interval(Duration::from_millis(5));
    let card = fixture.card("mastercard").unwrap();

    sale::sale_with_cashback(
        &accessor,
        &fixture,
        "100",
        "CZK",
        card,
        "5000",
        Choice::Accept,
        false,
    )
    .await
    .unwrap();
    sale::assert_cashback_rejected(&accessor, &fixture, "5000", Duration::from_secs(1))
        .await
        .unwrap();

    // Rejection means the card-read screen never appeared
    assert_eq!(driver.click_count(&elements::manual_entry_button()), 0);
    assert_eq!(driver.click_count(&elements::yes_button()), 2);
}

#[tokio::test]
async fn expired_card_decline_is_acknowledged() {
    let driver = MockDriver::new();
    driver.set_text(&elements::text_view(), flows::EXPIRED_CARD);
    driver.set_text(&elements::no_button(), flows::ACKNOWLEDGE_LABEL);

    let accessor = Accessor::new(&driver).with_poll_interval(Duration::from_millis(5));
    sale::acknowledge_decline(&accessor, flows::EXPIRED_CARD, Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(driver.click_count(&elements::no_button()), 1);
}
