//! Hover-highlighting of documents referenced by summary links.
//!
//! Hovering a document link inside the summary container marks every element
//! tagged with that document's class; leaving the link clears the mark. Must
//! run again whenever the container's markup is replaced, since replaced
//! anchors lose their listeners.

use crate::config::SummaryConfig;
use crate::error::SiteError;
use crate::util::doc_links::DocLinkPattern;
use crate::util::dom;

/// Wire hover listeners on every document link in the summary container.
///
/// Returns the number of links wired. A page without the container wires
/// nothing.
///
/// # Errors
///
/// Fails if the document cannot be queried or a listener cannot be attached.
pub fn setup_document_link_highlight(config: &SummaryConfig) -> Result<usize, SiteError> {
    let Some(container) = dom::document()?.get_element_by_id(&config.container_id) else {
        return Ok(0);
    };
    let pattern = DocLinkPattern::from_config(config);

    let mut wired = 0;
    for link in dom::query_all_in(&container, "a")? {
        let Some(target) = link.get_attribute("href").and_then(|href| pattern.highlight_target(&href)) else {
            continue;
        };
        for (event, on) in [("mouseover", true), ("mouseout", false)] {
            let tag = target.clone();
            let class = config.highlight_class.clone();
            dom::listen(link.as_ref(), event, move |_| {
                if let Err(e) = dom::toggle_class_on_tagged(&tag, &class, on) {
                    log::warn!("document highlight: {e}");
                }
            })?;
        }
        wired += 1;
    }
    log::debug!("document highlight wired {wired} links");
    Ok(wired)
}
