//! Manual sale with cashback

use crate::flows::idle::assert_idle_screen;
use crate::flows::sale::{
    approve_manual_transaction, assert_cashback_rejected, sale_with_cashback, Choice,
};

use super::{Scenario, ScenarioContext, ScenarioFuture};

const DEFAULT_CURRENCY: &str = "CZK";

/// Cashback amount above the terminal's configured maximum
const OVER_LIMIT_CASHBACK: &str = "5000";

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "sale_cashback_multicurrency",
            profile: "APOS0001",
            description:
                "Verify approving manual sale+cashback in various currencies. Terminal default - CZK.",
            source: module_path!(),
            run: run_multicurrency,
        },
        Scenario {
            name: "sale_cashback_declined",
            profile: "APOS0001",
            description:
                "Verify manual sale + declining cashback in various currencies. Terminal default - CZK.",
            source: module_path!(),
            run: run_declined,
        },
        Scenario {
            name: "sale_cashback_over_limit",
            profile: "APOS0001",
            description:
                "Verify rejection of a cashback amount above the terminal limit, with bounds in the announcement.",
            source: module_path!(),
            run: run_over_limit,
        },
    ]
}

fn run_multicurrency<'a>(ctx: &'a ScenarioContext<'a>) -> ScenarioFuture<'a> {
    Box::pin(async move {
        let card = ctx.fixture.card("mastercard")?;
        let amount = "1";

        for currency in ctx.fixture.currency.keys() {
            for cashback_amount in ctx.fixture.amounts_cashback.values() {
                sale_with_cashback(
                    ctx.accessor,
                    ctx.fixture,
                    amount,
                    currency,
                    card,
                    cashback_amount,
                    Choice::Accept,
                    true,
                )
                .await?;

                approve_manual_transaction(ctx.accessor, ctx.ui_wait()).await?;
                assert_idle_screen(ctx.accessor, ctx.fixture, DEFAULT_CURRENCY).await?;
            }
        }
        Ok(())
    })
}

fn run_declined<'a>(ctx: &'a ScenarioContext<'a>) -> ScenarioFuture<'a> {
    Box::pin(async move {
        let card = ctx.fixture.card("mastercard")?;
        let amount = "1";

        for currency in ctx.fixture.currency.keys() {
            sale_with_cashback(
                ctx.accessor,
                ctx.fixture,
                amount,
                currency,
                card,
                "0",
                Choice::Decline,
                true,
            )
            .await?;

            approve_manual_transaction(ctx.accessor, ctx.ui_wait()).await?;
            assert_idle_screen(ctx.accessor, ctx.fixture, DEFAULT_CURRENCY).await?;
        }
        Ok(())
    })
}

fn run_over_limit<'a>(ctx: &'a ScenarioContext<'a>) -> ScenarioFuture<'a> {
    Box::pin(async move {
        let card = ctx.fixture.card("mastercard")?;

        sale_with_cashback(
            ctx.accessor,
            ctx.fixture,
            "1",
            DEFAULT_CURRENCY,
            card,
            OVER_LIMIT_CASHBACK,
            Choice::Accept,
            false,
        )
        .await?;

        assert_cashback_rejected(ctx.accessor, ctx.fixture, OVER_LIMIT_CASHBACK, ctx.ui_wait())
            .await?;
        assert_idle_screen(ctx.accessor, ctx.fixture, DEFAULT_CURRENCY).await?;
        Ok(())
    })
}
