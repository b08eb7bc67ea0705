//! Idle screen assertions

use crate::access::Accessor;
use crate::common::Result;
use crate::fixtures::FixtureData;

use super::{assert_text_contains, assert_text_equals, elements, SALE_TITLE};

/// Assert the idle screen: default currency label, zero amount, sale title
pub async fn assert_idle_screen(
    accessor: &Accessor<'_>,
    fixture: &FixtureData,
    default_currency: &str,
) -> Result<()> {
    let label = fixture.currency_label(default_currency)?;

    assert_text_contains(accessor, &elements::currency_label(), label, "idle currency").await?;
    assert_text_equals(accessor, &elements::input_text(), "0", "idle amount").await?;
    assert_text_contains(accessor, &elements::title(), SALE_TITLE, "idle title").await?;
    Ok(())
}
