//! Sale flows with optional tip or cashback
//!
//! Each helper is a strict sequence: every step's postcondition is the
//! next step's precondition (currency must be selected before keypad entry
//! means anything, the tip prompt must be answered before the card-read
//! screen exists).

use std::time::Duration;

use crate::access::Accessor;
use crate::common::Result;
use crate::fixtures::{CardRecord, FixtureData};

use super::{
    assert_text_contains, assert_text_equals, elements, money, ACKNOWLEDGE_LABEL,
    CARD_PROMPT, CASHBACK_ENTRY, CASHBACK_LIMIT_HEADER, CASHBACK_OFFER, CONFIRM_LABEL, NO_LABEL,
    SALE_CASHBACK_TITLE, SALE_TITLE, TIP_ENTRY, TIP_OFFER, YES_LABEL,
};

/// Operator's answer to the tip or cashback offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Accept,
    Decline,
}

/// Select the transaction currency from the idle screen's selector
pub async fn select_currency(accessor: &Accessor<'_>, code: &str) -> Result<()> {
    accessor.click(&elements::currency_label()).await?;
    accessor.click(&elements::currency_option(code)).await?;
    Ok(())
}

/// Enter a value digit by digit on the virtual numeric keypad and confirm
pub async fn enter_amount(accessor: &Accessor<'_>, amount: &str) -> Result<()> {
    for digit in amount.chars() {
        accessor.click(&elements::keypad_digit(digit)).await?;
    }
    accessor.click(&elements::keypad_ok()).await?;
    Ok(())
}

/// Submit card credentials through the manual entry surface
pub async fn enter_card(accessor: &Accessor<'_>, card: &CardRecord) -> Result<()> {
    accessor.click(&elements::manual_entry_button()).await?;
    accessor.send_keys(&elements::pan_input(), &card.pan).await?;
    accessor
        .send_keys(&elements::expiry_input(), &card.expiration)
        .await?;
    accessor.send_keys(&elements::cvv_input(), &card.cvc).await?;
    accessor.click(&elements::confirm_button()).await?;
    Ok(())
}

/// Approve a manually entered transaction on the confirmation screen
pub async fn approve_manual_transaction(accessor: &Accessor<'_>, wait: Duration) -> Result<()> {
    accessor
        .wait_present(&elements::confirm_button(), wait)
        .await?;
    accessor.click(&elements::confirm_button()).await?;
    Ok(())
}

/// Assert the tip/cashback offer screen: prompt copy and button labels
async fn assert_offer(accessor: &Accessor<'_>, prompt: &str) -> Result<()> {
    assert_text_contains(accessor, &elements::text_view(), prompt, "offer prompt").await?;
    assert_text_contains(accessor, &elements::no_button(), NO_LABEL, "decline label").await?;
    assert_text_contains(accessor, &elements::yes_button(), YES_LABEL, "accept label").await?;
    Ok(())
}

/// Assert the extra-amount entry screen: prompt, zero default, currency
async fn assert_entry_defaults(
    accessor: &Accessor<'_>,
    prompt: &str,
    currency_label: &str,
) -> Result<()> {
    assert_text_contains(accessor, &elements::text_view(), prompt, "entry prompt").await?;
    assert_text_equals(accessor, &elements::input_text(), "0", "entry default amount").await?;
    assert_text_equals(
        accessor,
        &elements::currency_label(),
        currency_label,
        "entry default currency",
    )
    .await?;
    Ok(())
}

/// Assert the card-read screen: formatted total, title, card prompt
async fn assert_card_read_screen(
    accessor: &Accessor<'_>,
    amount: &str,
    currency_label: &str,
    title: &str,
) -> Result<()> {
    let line = money::display_with_currency(amount, currency_label)?;
    assert_text_contains(accessor, &elements::amount_text_view(), &line, "card-read amount")
        .await?;
    assert_text_contains(accessor, &elements::title(), title, "card-read title").await?;
    assert_text_contains(accessor, &elements::card_text_view(), CARD_PROMPT, "card prompt")
        .await?;
    Ok(())
}

/// Manual sale with a tip offer
///
/// Selects the currency, enters the amount, answers the tip offer per
/// `choice` (entering `tip_amount` when accepted), verifies the card-read
/// screen against the exact decimal total and submits the card.
pub async fn sale_with_tip(
    accessor: &Accessor<'_>,
    fixture: &FixtureData,
    amount: &str,
    currency: &str,
    card: &CardRecord,
    tip_amount: &str,
    choice: Choice,
) -> Result<()> {
    let label = fixture.currency_label(currency)?;

    select_currency(accessor, currency).await?;
    enter_amount(accessor, amount).await?;

    assert_offer(accessor, TIP_OFFER).await?;

    let total = match choice {
        Choice::Accept => {
            accessor.click(&elements::yes_button()).await?;
            assert_entry_defaults(accessor, TIP_ENTRY, label).await?;
            enter_amount(accessor, tip_amount).await?;
            money::sum_amounts(amount, tip_amount)?
        }
        Choice::Decline => {
            accessor.click(&elements::no_button()).await?;
            amount.to_string()
        }
    };

    assert_card_read_screen(accessor, &total, label, SALE_TITLE).await?;
    enter_card(accessor, card).await?;
    Ok(())
}

/// Manual sale with a cashback offer
///
/// Parallel to [`sale_with_tip`]; the accepted path titles the card-read
/// screen `Prodej + Cashback`. With `expect_approve` false the card-read
/// assertions and card entry are skipped (rejection screens follow
/// instead).
pub async fn sale_with_cashback(
    accessor: &Accessor<'_>,
    fixture: &FixtureData,
    amount: &str,
    currency: &str,
    card: &CardRecord,
    cashback_amount: &str,
    choice: Choice,
    expect_approve: bool,
) -> Result<()> {
    let label = fixture.currency_label(currency)?;

    select_currency(accessor, currency).await?;
    enter_amount(accessor, amount).await?;

    assert_offer(accessor, CASHBACK_OFFER).await?;

    let (total, title) = match choice {
        Choice::Accept => {
            accessor.click(&elements::yes_button()).await?;
            assert_entry_defaults(accessor, CASHBACK_ENTRY, label).await?;
            enter_amount(accessor, cashback_amount).await?;
            (money::sum_amounts(amount, cashback_amount)?, SALE_CASHBACK_TITLE)
        }
        Choice::Decline => {
            accessor.click(&elements::no_button()).await?;
            (amount.to_string(), SALE_TITLE)
        }
    };

    if expect_approve {
        assert_card_read_screen(accessor, &total, label, title).await?;
        enter_card(accessor, card).await?;
    }
    Ok(())
}

/// Render the cashback limit announcement as the terminal displays it
pub fn cashback_limit_announcement(fixture: &FixtureData, cashback_amount: &str) -> Result<String> {
    Ok(format!(
        "{}\n\nZadána častka: {}\nMaximum: {}\nMinimum: {}\n",
        CASHBACK_LIMIT_HEADER,
        money::two_decimals(cashback_amount)?,
        money::two_decimals(&fixture.cashback_limits.max)?,
        money::two_decimals(&fixture.cashback_limits.min)?,
    ))
}

/// Assert the cashback-over-limit rejection and confirm it away
pub async fn assert_cashback_rejected(
    accessor: &Accessor<'_>,
    fixture: &FixtureData,
    cashback_amount: &str,
    wait: Duration,
) -> Result<()> {
    let announcement = cashback_limit_announcement(fixture, cashback_amount)?;

    accessor
        .wait_text_contains(&elements::text_view(), CASHBACK_LIMIT_HEADER, wait)
        .await?;
    assert_text_contains(
        accessor,
        &elements::text_view(),
        &announcement,
        "cashback limit announcement",
    )
    .await?;
    assert_text_contains(accessor, &elements::title(), SALE_TITLE, "rejection title").await?;
    assert_text_equals(
        accessor,
        &elements::yes_button(),
        CONFIRM_LABEL,
        "rejection confirm label",
    )
    .await?;
    accessor.click(&elements::yes_button()).await?;
    Ok(())
}

/// Wait for a card decline announcement, verify its copy and the
/// acknowledge control, and dismiss it
pub async fn acknowledge_decline(
    accessor: &Accessor<'_>,
    message: &str,
    wait: Duration,
) -> Result<()> {
    accessor
        .wait_text_contains(&elements::text_view(), message, wait)
        .await?;
    accessor.wait_present(&elements::no_button(), wait).await?;
    assert_text_equals(
        accessor,
        &elements::no_button(),
        ACKNOWLEDGE_LABEL,
        "decline acknowledge label",
    )
    .await?;
    accessor.click(&elements::no_button()).await?;
    Ok(())
}
