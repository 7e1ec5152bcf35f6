//! Live summary container: hands the page's room to the channel runner and
//! swaps the container markup on every update.

use crate::components::link_highlight::setup_document_link_highlight;
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::net::live_channel::spawn_live_channel;
use crate::util::dom;

/// Start the live channel if the page has a summary container with a room.
///
/// # Errors
///
/// Fails if the document cannot be queried.
pub fn setup_live_summary(config: &SiteConfig) -> Result<(), SiteError> {
    let summary = &config.summary;
    let Some(container) = dom::document()?.get_element_by_id(&summary.container_id) else {
        return Ok(());
    };
    let Some(room_id) = container.get_attribute(&summary.room_attribute).filter(|id| !id.is_empty()) else {
        log::debug!("summary container has no room; live updates off");
        return Ok(());
    };

    let summary = summary.clone();
    spawn_live_channel(room_id, config.channel.clone(), move |html| {
        let Ok(Some(container)) = dom::document().map(|doc| doc.get_element_by_id(&summary.container_id)) else {
            log::warn!("summary container disappeared; update dropped");
            return;
        };
        container.set_inner_html(html);
        if let Err(e) = setup_document_link_highlight(&summary) {
            log::warn!("document highlight after update: {e}");
        }
    });
    Ok(())
}
