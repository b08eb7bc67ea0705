//! Transaction flow helpers
//!
//! Compose accessor calls into the operator-level actions of a
//! transaction: currency selection, keypad entry, tip/cashback prompts,
//! manual card entry. Every assertion mismatch is fatal immediately and
//! carries expected-vs-actual detail; the retry policy below this layer
//! never applies to logical failures.

pub mod elements;
pub mod idle;
pub mod money;
pub mod sale;
pub mod settings;

use crate::access::Accessor;
use crate::common::{Error, Result};
use crate::driver::Locator;

// Localized copy displayed by the terminal. Czech is the terminal's
// default locale; the strings are asserted verbatim.
pub const SALE_TITLE: &str = "Prodej";
pub const SALE_CASHBACK_TITLE: &str = "Prodej + Cashback";
pub const TIP_OFFER: &str = "Přejete si spropitné?";
pub const TIP_ENTRY: &str = "Zadejte spropitné";
pub const CASHBACK_OFFER: &str = "Přejete si cashback?";
pub const CASHBACK_ENTRY: &str = "Zadejte cashback";
pub const YES_LABEL: &str = "ANO";
pub const NO_LABEL: &str = "NE";
pub const CARD_PROMPT: &str = "Přiložte, vložte nebo protáhněte kartu";
pub const ACKNOWLEDGE_LABEL: &str = "BERU NA VĚDOMÍ";
pub const CONFIRM_LABEL: &str = "POTVRDIT";
pub const EXPIRED_CARD: &str = "Expirovaná karta";
pub const UNSUPPORTED_CARD: &str = "Nepodporovaná karta";
pub const PROFILE_DOWNLOADED: &str = "Profil úspěšně stažen";
// "častka" is what the terminal actually renders
pub const CASHBACK_LIMIT_HEADER: &str = "Cashback překročil limit nastavený na terminálu";

/// Assert that the node's text contains `expected`
pub async fn assert_text_contains(
    accessor: &Accessor<'_>,
    locator: &Locator,
    expected: &str,
    subject: &str,
) -> Result<()> {
    let actual = accessor.read_text(locator).await?;
    if actual.contains(expected) {
        Ok(())
    } else {
        Err(Error::assertion(subject, expected, actual))
    }
}

/// Assert that the node's text equals `expected` exactly
pub async fn assert_text_equals(
    accessor: &Accessor<'_>,
    locator: &Locator,
    expected: &str,
    subject: &str,
) -> Result<()> {
    let actual = accessor.read_text(locator).await?;
    if actual == expected {
        Ok(())
    } else {
        Err(Error::assertion(subject, expected, actual))
    }
}
