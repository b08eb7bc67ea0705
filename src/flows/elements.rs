//! Well-known element locators of the terminal application
//!
//! Locators are stateless and reused across calls; nothing here touches
//! the driver.

use crate::driver::Locator;

/// Resource id namespace of the application under test
const ID_PREFIX: &str = "com.payten.apos:id";

fn res_id(name: &str) -> Locator {
    Locator::id(format!("{}/{}", ID_PREFIX, name))
}

/// Hamburger button on the idle screen; its presence marks the idle root
pub fn side_menu_button() -> Locator {
    res_id("side_menu_button")
}

/// Screen title bar
pub fn title() -> Locator {
    res_id("title")
}

/// Main prompt text of the current screen
pub fn text_view() -> Locator {
    res_id("text_view")
}

/// Amount input field
pub fn input_text() -> Locator {
    res_id("input_text")
}

/// Currency label beside the amount input
pub fn currency_label() -> Locator {
    res_id("currency")
}

pub fn yes_button() -> Locator {
    res_id("yes_button")
}

pub fn no_button() -> Locator {
    res_id("no_button")
}

pub fn confirm_button() -> Locator {
    res_id("confirm_button")
}

pub fn cancel_button() -> Locator {
    res_id("cancel_button")
}

/// Amount line on the card-read screen
pub fn amount_text_view() -> Locator {
    res_id("amount_text_view")
}

/// Card prompt line on the card-read screen
pub fn card_text_view() -> Locator {
    res_id("card_text_view")
}

/// One key of the virtual numeric keypad
pub fn keypad_digit(digit: char) -> Locator {
    res_id(&format!("btn_keypad_{}", digit))
}

/// Green confirm key of the numeric keypad
pub fn keypad_ok() -> Locator {
    res_id("btn_keypad_ok")
}

/// Manual card entry fields
pub fn pan_input() -> Locator {
    res_id("pan_input")
}

pub fn expiry_input() -> Locator {
    res_id("expiry_input")
}

pub fn cvv_input() -> Locator {
    res_id("cvv_input")
}

/// Manual entry switch on the card-read screen
pub fn manual_entry_button() -> Locator {
    Locator::exact_text("Ruční zadání")
}

/// One option of the currency selector, by currency code
pub fn currency_option(code: &str) -> Locator {
    Locator::exact_text(code)
}

/// Side menu entries
pub fn settings_menu_item() -> Locator {
    Locator::exact_text("Nastavení")
}

pub fn initialization_item() -> Locator {
    Locator::exact_text("Inicializace")
}

pub fn delete_batch_item() -> Locator {
    Locator::exact_text("Smazání dávky")
}
