//! Manual sale with tip

use crate::flows::idle::assert_idle_screen;
use crate::flows::sale::{
    acknowledge_decline, approve_manual_transaction, sale_with_tip, Choice,
};
use crate::flows::{EXPIRED_CARD, UNSUPPORTED_CARD};

use super::{Scenario, ScenarioContext, ScenarioFuture};

/// Terminal default currency used by the idle-screen check
const DEFAULT_CURRENCY: &str = "CZK";

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "sale_tip_multicurrency",
            profile: "APOS0015",
            description:
                "Verify approving manual sale+tip in various currencies. Terminal default - CZK.",
            source: module_path!(),
            run: run_multicurrency,
        },
        Scenario {
            name: "sale_tip_declined",
            profile: "APOS0015",
            description:
                "Verify manual sale + declining tip in various currencies. Terminal default - CZK.",
            source: module_path!(),
            run: run_declined,
        },
        Scenario {
            name: "sale_tip_expired_card",
            profile: "APOS0015",
            description: "Verify declining manual sale+tip with an expired card.",
            source: module_path!(),
            run: run_expired_card,
        },
        Scenario {
            name: "sale_tip_invalid_pan",
            profile: "APOS0015",
            description: "Verify declining manual sale+tip with an invalid PAN.",
            source: module_path!(),
            run: run_invalid_pan,
        },
    ]
}

fn run_multicurrency<'a>(ctx: &'a ScenarioContext<'a>) -> ScenarioFuture<'a> {
    Box::pin(async move {
        let card = ctx.fixture.card("mastercard")?;
        let amount = "1";

        for currency in ctx.fixture.currency.keys() {
            for tip_amount in ctx.fixture.amounts_tips.values() {
                sale_with_tip(
                    ctx.accessor,
                    ctx.fixture,
                    amount,
                    currency,
                    card,
                    tip_amount,
                    Choice::Accept,
                )
                .await?;

                approve_manual_transaction(ctx.accessor, ctx.ui_wait()).await?;

                // Device must come back to idle between iterations
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
        let tip_amount = "0";

        for currency in ctx.fixture.currency.keys() {
            sale_with_tip(
                ctx.accessor,
                ctx.fixture,
                amount,
                currency,
                card,
                tip_amount,
                Choice::Decline,
            )
            .await?;

            approve_manual_transaction(ctx.accessor, ctx.ui_wait()).await?;
            assert_idle_screen(ctx.accessor, ctx.fixture, DEFAULT_CURRENCY).await?;
        }
        Ok(())
    })
}

fn run_expired_card<'a>(ctx: &'a ScenarioContext<'a>) -> ScenarioFuture<'a> {
    Box::pin(async move {
        let card = ctx.fixture.card("expired")?;

        sale_with_tip(
            ctx.accessor,
            ctx.fixture,
            "1",
            DEFAULT_CURRENCY,
            card,
            "1",
            Choice::Accept,
        )
        .await?;

        acknowledge_decline(ctx.accessor, EXPIRED_CARD, ctx.ui_wait()).await?;
        assert_idle_screen(ctx.accessor, ctx.fixture, DEFAULT_CURRENCY).await?;
        Ok(())
    })
}

fn run_invalid_pan<'a>(ctx: &'a ScenarioContext<'a>) -> ScenarioFuture<'a> {
    Box::pin(async move {
        let card = ctx.fixture.card("invalid_PAN")?;

        sale_with_tip(
            ctx.accessor,
            ctx.fixture,
            "1",
            DEFAULT_CURRENCY,
            card,
            "1",
            Choice::Accept,
        )
        .await?;

        acknowledge_decline(ctx.accessor, UNSUPPORTED_CARD, ctx.ui_wait()).await?;
        assert_idle_screen(ctx.accessor, ctx.fixture, DEFAULT_CURRENCY).await?;
        Ok(())
    })
}
