//! Summary card for one tender in the search results.

use leptos::prelude::*;

use crate::services::tenders::{Tender, format_value};

/// Shows category, issuing organization, location, value and deadline.
#[component]
pub fn TenderCard(tender: Tender) -> impl IntoView {
	let Tender {
		tender_id,
		organization,
		category,
		location,
		value,
		deadline,
		description,
		link,
		..
	} = tender;

	view! {
		<article class="tender-card" data-tender-id=tender_id>
			<span class="tender-category">{category}</span>
			<h3>{organization}</h3>
			<p class="tender-description">{description}</p>
			<dl>
				<dt>"Location"</dt>
				<dd>{location}</dd>
				<dt>"Value"</dt>
				<dd>{format_value(value)}</dd>
				<dt>"Deadline"</dt>
				<dd>{deadline}</dd>
			</dl>
			<a href=link target="_blank" rel="noopener noreferrer">
				"View Details"
			</a>
		</article>
	}
}
