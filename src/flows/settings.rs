//! Settings surface actions

use crate::access::Accessor;
use crate::common::Result;

use super::elements;

/// Open the settings surface from the idle screen and start profile
/// initialization
pub async fn start_init_from_idle(accessor: &Accessor<'_>) -> Result<()> {
    accessor.click(&elements::side_menu_button()).await?;
    accessor.click(&elements::settings_menu_item()).await?;
    accessor.click(&elements::initialization_item()).await?;
    Ok(())
}

/// Delete the open transaction batch from the settings surface
///
/// Run as scenario teardown so stored transactions never leak into the
/// next scenario's totals.
pub async fn delete_batch(accessor: &Accessor<'_>) -> Result<()> {
    accessor.click(&elements::side_menu_button()).await?;
    accessor.click(&elements::settings_menu_item()).await?;
    accessor.click(&elements::delete_batch_item()).await?;
    accessor.click(&elements::confirm_button()).await?;
    accessor.click(&elements::cancel_button()).await?;
    Ok(())
}
